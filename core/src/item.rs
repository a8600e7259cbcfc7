use std::{collections::BTreeSet, hash::Hash};

use itertools::Itertools;

use crate::{
    grammar::Grammar,
    rule::{Production, Rule},
    symbol::{Filebound, GrammarSymbol, TerminalRef},
    token::Token,
};

/// A symbol that may legally follow a completed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lookahead {
    Text(&'static str),
    Terminal(TerminalRef),
    /// The token source is exhausted.
    EndOfInput,
}

impl Lookahead {
    /// The lookahead a single symbol stands for; productions have none.
    pub fn of(symbol: &GrammarSymbol) -> Option<Self> {
        match symbol {
            GrammarSymbol::Text(text) => Some(Self::Text(text)),
            GrammarSymbol::Terminal(terminal) => Some(Self::Terminal(*terminal)),
            GrammarSymbol::Production(_) => None,
        }
    }

    /// Does the lookahead token (`None` past the end of input) satisfy this?
    pub fn matches(&self, candidate: Option<&Token>) -> bool {
        match (self, candidate) {
            (Self::Text(text), Some(tok)) => tok.source == *text,
            (Self::Terminal(terminal), Some(tok)) => terminal.matches(tok),
            (Self::EndOfInput, None) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Lookahead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "\"{}\"", Filebound::visible(text)),
            Self::Terminal(terminal) => terminal.fmt(f),
            Self::EndOfInput => write!(f, "<eos>"),
        }
    }
}

/// An ordered set of lookaheads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LookaheadSet(BTreeSet<Lookahead>);

impl LookaheadSet {
    /// The lookaheads of the goal: only the true end of input.
    pub fn end_of_input() -> Self {
        Self::from_iter([Lookahead::EndOfInput])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lookahead> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, lookahead: &Lookahead) -> bool {
        self.0.contains(lookahead)
    }

    pub fn insert(&mut self, lookahead: Lookahead) -> bool {
        self.0.insert(lookahead)
    }

    /// Adds every member of `other`; returns true if the set grew.
    pub fn merge(&mut self, other: &LookaheadSet) -> bool {
        let before = self.0.len();
        self.0.extend(other.iter().copied());
        self.0.len() > before
    }

    /// Does the lookahead token (`None` past the end of input) belong here?
    pub fn accepts(&self, candidate: Option<&Token>) -> bool {
        self.iter().any(|la| la.matches(candidate))
    }
}

impl FromIterator<Lookahead> for LookaheadSet {
    fn from_iter<T: IntoIterator<Item = Lookahead>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for LookaheadSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

/// A rule item (LR(1) configuration).
///
/// # Example
/// Unit ::= "(" • OPERATOR Unit Unit ")", {")"}
///
/// Two configurations are the same item when they share rule and dot,
/// whatever their lookaheads.
#[derive(Debug, Clone)]
pub struct Configuration {
    rule: Rule,
    dot: usize,
    lookaheads: LookaheadSet,
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.dot == other.dot && self.rule == other.rule
    }
}

impl Eq for Configuration {}

impl Hash for Configuration {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.rule.hash(state);
        self.dot.hash(state);
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rhs = self
            .rule
            .symbols()
            .iter()
            .map(ToString::to_string)
            .enumerate()
            .map(|(pos, mut s)| {
                if pos == self.dot {
                    s.insert_str(0, "• ");
                }
                s
            })
            .join(" ");

        if self.is_done() {
            rhs.push_str(" •")
        }

        write!(
            f,
            "[{} ::= {}, {}]",
            self.rule.production().display_name(),
            rhs,
            self.lookaheads
        )
    }
}

impl Configuration {
    /// Creates a configuration; `None` if the dot lies past the rule's end.
    pub fn new(rule: Rule, dot: usize, lookaheads: LookaheadSet) -> Option<Self> {
        (dot <= rule.len()).then_some(Self {
            rule,
            dot,
            lookaheads,
        })
    }

    /// The configuration at the start of the rule.
    pub fn start(rule: Rule, lookaheads: LookaheadSet) -> Self {
        Self {
            rule,
            dot: 0,
            lookaheads,
        }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn dot(&self) -> usize {
        self.dot
    }

    pub fn lookaheads(&self) -> &LookaheadSet {
        &self.lookaheads
    }

    /// Symbols already recognized.
    pub fn before(&self) -> &'static [GrammarSymbol] {
        &self.rule.symbols()[..self.dot]
    }

    /// Symbols still expected, from the dot onward.
    pub fn after(&self) -> &'static [GrammarSymbol] {
        &self.rule.symbols()[self.dot..]
    }

    /// The symbol right after the dot.
    pub fn next_symbol(&self) -> Option<&'static GrammarSymbol> {
        self.after().first()
    }

    /// Check if we reached the end of the rule.
    ///
    /// # Example
    /// Unit ::= NUMBER •
    pub fn is_done(&self) -> bool {
        self.dot >= self.rule.len()
    }

    /// Does this configuration expect the production next?
    pub fn expects(&self, production: &Production) -> bool {
        self.next_symbol()
            .and_then(GrammarSymbol::production_name)
            .is_some_and(|name| name == production.display_name())
    }

    /// Returns the configuration with the dot moved one symbol further.
    ///
    /// Returns None, if the configuration is done.
    pub fn advance(&self) -> Option<Self> {
        (!self.is_done()).then(|| Self {
            rule: self.rule,
            dot: self.dot + 1,
            lookaheads: self.lookaheads.clone(),
        })
    }

    /// Lookaheads handed to the rules of the production after the dot.
    ///
    /// That is what may follow the production here: the next symbol once it
    /// is consumed, or this configuration's own lookaheads when the
    /// production is the last symbol.
    fn follow(&self, grammar: &Grammar) -> LookaheadSet {
        match self.after().get(1) {
            Some(symbol) => grammar.first(symbol),
            None => self.lookaheads.clone(),
        }
    }
}

/// A set of configurations; the parser's state.
///
/// Configurations are unique by rule and dot: adding one that is already
/// present merges the lookaheads instead.
#[derive(Debug, Clone, Default)]
pub struct State {
    configurations: Vec<Configuration>,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

/// Compares the item sets, ignoring order.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|config| {
                other
                    .get(config)
                    .is_some_and(|found| found.lookaheads == config.lookaheads)
            })
    }
}

impl FromIterator<Configuration> for State {
    fn from_iter<T: IntoIterator<Item = Configuration>>(iter: T) -> Self {
        let mut state = Self::default();
        for config in iter {
            state.push(config);
        }
        state
    }
}

impl State {
    /// Iterate over all configurations within the state.
    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.configurations.iter()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn contains(&self, config: &Configuration) -> bool {
        self.position(&config.rule, config.dot).is_some()
    }

    /// The configuration with the same rule and dot, if any.
    pub fn get(&self, config: &Configuration) -> Option<&Configuration> {
        self.position(&config.rule, config.dot)
            .map(|i| &self.configurations[i])
    }

    fn position(&self, rule: &Rule, dot: usize) -> Option<usize> {
        self.configurations
            .iter()
            .position(|config| config.dot == dot && config.rule == *rule)
    }

    /// Adds the configuration, or merges its lookaheads into the existing
    /// one; returns true if the state changed.
    fn push(&mut self, config: Configuration) -> bool {
        match self.position(&config.rule, config.dot) {
            Some(i) => self.configurations[i].lookaheads.merge(&config.lookaheads),
            None => {
                self.configurations.push(config);
                true
            }
        }
    }

    /// Iterate over all completed configurations (A ::= w •)
    pub fn iter_done(&self) -> impl Iterator<Item = &Configuration> {
        self.iter().filter(|config| config.is_done())
    }

    /// The advanced configurations that consume the token.
    pub fn shift(&self, candidate: &Token) -> Vec<Configuration> {
        self.iter()
            .filter(|config| config.next_symbol().is_some_and(|sym| sym.matches(candidate)))
            .filter_map(Configuration::advance)
            .collect()
    }

    /// The advanced configurations that consume a freshly reduced production.
    pub fn goto(&self, production: &Production) -> Vec<Configuration> {
        self.iter()
            .filter(|config| config.expects(production))
            .filter_map(Configuration::advance)
            .collect()
    }

    /// The completed configurations whose lookaheads admit the token
    /// (`None` past the end of input).
    pub fn reductions(&self, candidate: Option<&Token>) -> Vec<&Configuration> {
        self.iter_done()
            .filter(|config| config.lookaheads.accepts(candidate))
            .collect()
    }

    /// Display names of every symbol the state could act on.
    pub fn expected(&self) -> Vec<String> {
        self.iter()
            .flat_map(|config| match config.next_symbol() {
                Some(symbol) if !symbol.is_production() => vec![symbol.to_string()],
                Some(_) => vec![],
                None => config.lookaheads.iter().map(ToString::to_string).collect(),
            })
            .unique()
            .collect()
    }

    /// Close the state.
    ///
    /// Every configuration expecting a production pulls in the rules of that
    /// production at dot 0, until a fixpoint is reached. A configuration
    /// whose lookaheads grow is revisited so the growth reaches the rules it
    /// pulled in.
    pub(crate) fn close(&mut self, grammar: &Grammar) {
        let mut stack: Vec<usize> = (0..self.configurations.len()).rev().collect();

        while let Some(i) = stack.pop() {
            let config = &self.configurations[i];

            let Some(production) = config
                .next_symbol()
                .and_then(GrammarSymbol::production_name)
                .and_then(|name| grammar.production(name))
            else {
                continue;
            };

            let follow = config.follow(grammar);

            for rule in production.rules() {
                match self.position(&rule, 0) {
                    Some(j) => {
                        if self.configurations[j].lookaheads.merge(&follow) {
                            stack.push(j);
                        }
                    }
                    None => {
                        self.configurations
                            .push(Configuration::start(rule, follow.clone()));
                        stack.push(self.configurations.len() - 1);
                    }
                }
            }
        }
    }
}
