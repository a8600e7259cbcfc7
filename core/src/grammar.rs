use std::collections::{HashMap, HashSet};

use crate::{
    error::{GrammarError, GrammarResult},
    item::{Configuration, Lookahead, LookaheadSet, State},
    rule::Production,
    symbol::GrammarSymbol,
};

/// A grammar
///
/// The productions a parser may reduce, and the goal production a successful
/// parse ends with. Production symbols refer to productions by name; the
/// grammar resolves them.
///
/// # Example
///
/// ```grammar
/// Goal ::= SOT EOT | SOT Unit EOT
/// Unit ::= NUMBER | "(" OPERATOR Unit Unit ")"
/// ```
///
/// ```ignore
/// let grammar = Grammar::new([&GOAL, &UNIT], &GOAL)?;
/// ```
#[derive(Debug)]
pub struct Grammar {
    productions: Vec<&'static Production>,
    goal: &'static Production,
    firsts: HashMap<&'static str, LookaheadSet>,
}

impl Grammar {
    /// Creates a new grammar.
    ///
    /// Returns an error if a production symbol names no production, if two
    /// different productions share a name, or if the goal is not among the
    /// productions.
    pub fn new<I>(productions: I, goal: &'static Production) -> GrammarResult<Self>
    where
        I: IntoIterator<Item = &'static Production>,
    {
        let mut registered: Vec<&'static Production> = Vec::default();

        for production in productions {
            match registered
                .iter()
                .find(|p| p.display_name() == production.display_name())
            {
                Some(existing) if **existing == *production => continue,
                Some(_) => {
                    return Err(GrammarError::DuplicatedProduction(
                        production.display_name().to_owned(),
                    ))
                }
                None => registered.push(production),
            }
        }

        if !registered.iter().any(|p| **p == *goal) {
            return Err(GrammarError::MissingGoal(goal.display_name().to_owned()));
        }

        for name in registered
            .iter()
            .flat_map(|p| p.sequences().iter().copied().flatten())
            .filter_map(GrammarSymbol::production_name)
        {
            if !registered.iter().any(|p| p.display_name() == name) {
                return Err(GrammarError::UnknownProduction(name.to_owned()));
            }
        }

        let firsts = registered
            .iter()
            .map(|p| (p.display_name(), Self::compute_first(&registered, p)))
            .collect();

        Ok(Self {
            productions: registered,
            goal,
            firsts,
        })
    }

    /// The production a complete parse reduces to.
    pub fn goal(&self) -> &'static Production {
        self.goal
    }

    /// Iterate over all productions of the grammar
    pub fn productions(&self) -> impl Iterator<Item = &'static Production> + '_ {
        self.productions.iter().copied()
    }

    /// Returns the production behind the name, if any.
    pub fn production(&self, name: &str) -> Option<&'static Production> {
        self.productions
            .iter()
            .find(|p| p.display_name() == name)
            .copied()
    }

    /// The lookaheads a derivation of the symbol can start with.
    pub fn first(&self, symbol: &GrammarSymbol) -> LookaheadSet {
        match Lookahead::of(symbol) {
            Some(lookahead) => LookaheadSet::from_iter([lookahead]),
            None => symbol
                .production_name()
                .and_then(|name| self.firsts.get(name))
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// The initial state: every goal rule at dot 0, closed.
    ///
    /// Goal configurations are only completed by the end of input.
    pub fn closure(&self) -> State {
        self.closure_of(
            self.goal
                .rules()
                .map(|rule| Configuration::start(rule, LookaheadSet::end_of_input())),
        )
    }

    /// Closes the seed configurations into a state.
    pub fn closure_of<I>(&self, seed: I) -> State
    where
        I: IntoIterator<Item = Configuration>,
    {
        let mut state = State::from_iter(seed);
        state.close(self);
        state
    }

    /// Fetch the lookaheads starting a derivation of the production.
    fn compute_first(productions: &[&'static Production], production: &Production) -> LookaheadSet {
        let mut set = LookaheadSet::default();
        let mut visited = HashSet::<&str>::default();
        let mut stack = vec![production.display_name()];

        while let Some(name) = stack.pop() {
            if !visited.insert(name) {
                continue;
            }

            let Some(production) = productions.iter().find(|p| p.display_name() == name) else {
                continue;
            };

            for symbol in production.sequences().iter().filter_map(|seq| seq.first()) {
                match (Lookahead::of(symbol), symbol.production_name()) {
                    (Some(lookahead), _) => {
                        set.insert(lookahead);
                    }
                    (None, Some(name)) => stack.push(name),
                    (None, None) => {}
                }
            }
        }

        set
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for production in &self.productions {
            writeln!(f, "{production}")?;
        }
        Ok(())
    }
}
