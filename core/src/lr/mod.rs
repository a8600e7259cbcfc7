use std::sync::Arc;

use crate::{
    ast::{Child, NodeRegistry, ParseNode},
    error::{ErrorKind, InvariantViolation, ParseError, ParseResult},
    grammar::Grammar,
    item::{Configuration, State},
    rule::Rule,
    token::{traits::TokenSource, Token},
};

mod action;
mod cache;
mod stack;

pub use action::Action;
use cache::ClosureCache;
use stack::Stack;
pub use stack::StackView;

/// Tuning knobs of a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Reuse the closure of a kernel met before, instead of recomputing it.
    ///
    /// Parse results are the same either way.
    pub memoize_closures: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            memoize_closures: true,
        }
    }
}

/// A shift-reduce LR(1) parser.
///
/// States are not precomputed: every state is the closure of the kernel the
/// previous step produced, computed when the parser gets there.
///
/// Shift is always preferred over reduce. Among the completed configurations
/// of a state, only those whose lookaheads admit the current token may
/// reduce; more than one is an ambiguity of the grammar.
pub struct Parser<'g, S>
where
    S: TokenSource,
{
    source: S,
    grammar: &'g Grammar,
    registry: &'g NodeRegistry,
    cache: ClosureCache,
    initial: Arc<State>,
    stack: Stack,
    lookahead: Option<Token>,
    primed: bool,
}

impl<'g, S> Parser<'g, S>
where
    S: TokenSource,
{
    pub fn new<I>(source: I, grammar: &'g Grammar, registry: &'g NodeRegistry) -> Self
    where
        I: IntoIterator<IntoIter = S>,
    {
        Self {
            source: source.into_iter(),
            grammar,
            registry,
            cache: ClosureCache::new(ParserOptions::default().memoize_closures),
            initial: Arc::new(grammar.closure()),
            stack: Stack::default(),
            lookahead: None,
            primed: false,
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.cache = ClosureCache::new(options.memoize_closures);
        self
    }

    /// Parses the whole token source into a node of the goal production.
    ///
    /// On failure, the stack is left as it was, see [`Parser::view_stack`].
    pub fn parse(&mut self) -> ParseResult<ParseNode> {
        let _span = tracing::debug_span!("parse", goal = self.grammar.goal().display_name()).entered();

        self.run().inspect_err(|err| {
            tracing::debug!(error = %err, code = err.code(), stack = %self.view_stack(), "parse failed");
        })
    }

    /// Printable snapshot of the parser's stack.
    pub fn view_stack(&self) -> StackView<'_> {
        self.stack.view()
    }

    fn run(&mut self) -> ParseResult<ParseNode> {
        if !self.primed {
            self.primed = true;
            self.advance()?;
        }

        let goal = self.grammar.goal();
        // A chain of single-symbol reductions longer than the number of
        // productions has gone round a cycle.
        let max_unit_chain = self.grammar.productions().count();
        let mut unit_chain = 0;

        while self.lookahead.is_some() || !self.stack.holds(goal) {
            let state = self.current_state();

            match self.decide(&state)? {
                Action::Shift(kernel) => {
                    unit_chain = 0;
                    self.shift(kernel)?;
                }
                Action::Reduce(rule) => {
                    if rule.len() == 1 {
                        unit_chain += 1;
                        if unit_chain > max_unit_chain {
                            return Err(InvariantViolation::Stalled.into());
                        }
                    } else {
                        unit_chain = 0;
                    }
                    self.reduce(rule)?;
                }
            }
        }

        let node = self.stack.pop_node().ok_or(InvariantViolation::EmptyStack)?;

        match self.stack.len() {
            0 => Ok(node),
            n => Err(InvariantViolation::UnfinishedStack(n + 1).into()),
        }
    }

    /// Pulls the next significant token; lex errors are forwarded.
    fn advance(&mut self) -> ParseResult<()> {
        self.lookahead = self.source.next_significant().transpose()?;
        Ok(())
    }

    /// The state on top of the stack, or the initial one.
    fn current_state(&self) -> Arc<State> {
        self.stack
            .top_state()
            .unwrap_or_else(|| self.initial.clone())
    }

    fn decide(&self, state: &State) -> ParseResult<Action> {
        if let Some(tok) = &self.lookahead {
            let kernel = state.shift(tok);
            if !kernel.is_empty() {
                return Ok(Action::Shift(kernel));
            }
        }

        match state.reductions(self.lookahead.as_ref()).as_slice() {
            [config] => Ok(Action::Reduce(config.rule())),
            [] => Err(self.syntax_error(state)),
            configs => Err(ErrorKind::ReduceReduceConflict {
                rules: configs.iter().map(|config| config.rule().to_string()).collect(),
            }
            .into()),
        }
    }

    fn syntax_error(&self, state: &State) -> ParseError {
        let expecting = state.expected();

        match &self.lookahead {
            Some(tok) => ParseError::new(
                ErrorKind::unexpected_token(&tok.tag, &tok.source, expecting),
                Some(tok.position()),
            ),
            None => ParseError::new(ErrorKind::unexpected_end_of_input(expecting), None),
        }
    }

    fn shift(&mut self, kernel: Vec<Configuration>) -> ParseResult<()> {
        let Some(tok) = self.lookahead.take() else {
            return Err(InvariantViolation::Stalled.into());
        };

        let state = self.cache.close(self.grammar, kernel);
        tracing::trace!(tag = %tok.tag, source = %tok.source, configurations = state.len(), "shift");

        self.stack.push(Child::Token(tok), state);
        self.advance()
    }

    fn reduce(&mut self, rule: Rule) -> ParseResult<()> {
        let children = self
            .stack
            .pop_children(rule.len())
            .ok_or(InvariantViolation::EmptyStack)?;

        let node = self.registry.make_parse_node(rule, children);
        let kernel = self.current_state().goto(rule.production());

        let state = if !kernel.is_empty() {
            self.cache.close(self.grammar, kernel)
        } else if rule.production() != self.grammar.goal() {
            return Err(InvariantViolation::NoGoto(rule.production().display_name().to_owned()).into());
        } else if !self.stack.is_empty() {
            return Err(InvariantViolation::UnfinishedStack(self.stack.len() + 1).into());
        } else {
            Arc::new(State::default())
        };

        tracing::trace!(%rule, configurations = state.len(), "reduce");

        self.stack.push(Child::Node(node), state);
        Ok(())
    }
}
