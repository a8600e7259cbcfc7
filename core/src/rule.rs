use std::hash::Hash;

use itertools::Itertools;

use crate::symbol::GrammarSymbol;

/// A nonterminal of a context-free grammar.
///
/// It is identified by its display name, and offers one or more choices,
/// sequences of grammar symbols that can be reduced to it in a parsing
/// action.
///
/// Productions are meant to be declared once, as `static` items:
///
/// ```ignore
/// static UNIT: Production = Production::new("Unit", &[
///     &[GrammarSymbol::terminal(&NUMBER)],
///     &[
///         GrammarSymbol::text("("),
///         GrammarSymbol::terminal(&OPERATOR),
///         GrammarSymbol::production("Unit"),
///         GrammarSymbol::production("Unit"),
///         GrammarSymbol::text(")"),
///     ],
/// ]);
/// ```
#[derive(Debug)]
pub struct Production {
    name: &'static str,
    sequences: &'static [&'static [GrammarSymbol]],
}

impl Production {
    /// Creates a new production.
    ///
    /// # Panics
    /// Panics if there are no sequences, or one of them is empty. In a
    /// `static` initializer this is a compile-time error.
    pub const fn new(name: &'static str, sequences: &'static [&'static [GrammarSymbol]]) -> Self {
        assert!(!sequences.is_empty(), "a production needs at least one sequence");

        let mut i = 0;
        while i < sequences.len() {
            assert!(!sequences[i].is_empty(), "a production sequence cannot be empty");
            i += 1;
        }

        Self { name, sequences }
    }

    pub fn display_name(&self) -> &'static str {
        self.name
    }

    pub fn sequences(&self) -> &'static [&'static [GrammarSymbol]] {
        self.sequences
    }

    /// Splits the production into its rules, in declaration order.
    pub fn rules(&'static self) -> impl Iterator<Item = Rule> {
        (0..self.sequences.len()).map(move |index| Rule {
            production: self,
            index,
        })
    }

    /// The symbol expecting this production.
    pub fn symbol(&self) -> GrammarSymbol {
        GrammarSymbol::production(self.name)
    }

    /// Does any sequence mention the symbol?
    pub fn contains(&self, symbol: &GrammarSymbol) -> bool {
        self.sequences.iter().any(|seq| seq.contains(symbol))
    }
}

/// Two productions are equal if they are the same object, or share a name
/// and every pair of corresponding rules is equal.
impl PartialEq for Production {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || self.name == other.name && self.sequences == other.sequences
    }
}

impl Eq for Production {}

impl Hash for Production {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ::= {}",
            self.name,
            self.sequences
                .iter()
                .map(|seq| seq.iter().join(" "))
                .join(" | ")
        )
    }
}

/// One alternative of a production; the unit of reduction.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    production: &'static Production,
    index: usize,
}

impl Rule {
    /// Returns the `index`-th alternative of the production, if it exists.
    pub fn new(production: &'static Production, index: usize) -> Option<Self> {
        (index < production.sequences.len()).then_some(Self { production, index })
    }

    pub fn production(&self) -> &'static Production {
        self.production
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn symbols(&self) -> &'static [GrammarSymbol] {
        self.production.sequences[self.index]
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols().len()
    }

    /// Always false: sequences are never empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols().is_empty()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.production == other.production
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.production.hash(state);
        self.index.hash(state);
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ::= {}",
            self.production.name,
            self.symbols().iter().join(" ")
        )
    }
}
