use std::{collections::HashMap, sync::Arc};

use crate::{
    grammar::Grammar,
    item::{Configuration, LookaheadSet, State},
    rule::Rule,
};

/// Identity of a kernel, lookaheads included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Kernel(Vec<(Rule, usize, LookaheadSet)>);

impl Kernel {
    fn new(configurations: &[Configuration]) -> Self {
        Self(
            configurations
                .iter()
                .map(|config| (config.rule(), config.dot(), config.lookaheads().clone()))
                .collect(),
        )
    }
}

/// Memo of closed states, keyed by their kernel.
///
/// Lives as long as its parser.
#[derive(Debug)]
pub(crate) struct ClosureCache {
    enabled: bool,
    states: HashMap<Kernel, Arc<State>>,
}

impl ClosureCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            states: HashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Closes the kernel, or returns the state closed earlier from it.
    pub fn close(&mut self, grammar: &Grammar, kernel: Vec<Configuration>) -> Arc<State> {
        if !self.enabled {
            return Arc::new(grammar.closure_of(kernel));
        }

        let key = Kernel::new(&kernel);

        if let Some(state) = self.states.get(&key) {
            tracing::trace!(configurations = state.len(), "closure cache hit");
            return state.clone();
        }

        let state = Arc::new(grammar.closure_of(kernel));
        self.states.insert(key, state.clone());
        tracing::trace!(configurations = state.len(), cached = self.len(), "closure cached");
        state
    }
}
