use itertools::Itertools;

use crate::{item::Configuration, rule::Rule};

/// The step the parser takes from a state, given its lookahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Push the lookahead; the kernel of the next state.
    Shift(Vec<Configuration>),
    /// Replace the top of the stack by a node of the rule.
    Reduce(Rule),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(kernel) => write!(f, "shift to {{{}}}", kernel.iter().join(", ")),
            Action::Reduce(rule) => write!(f, "reduce {rule}"),
        }
    }
}
