use std::sync::Arc;

use itertools::Itertools;
use prettytable::Table as PtTable;

use crate::{
    ast::{Child, ParseNode},
    item::State,
    rule::Production,
    symbol::Filebound,
};

/// A stack element with the state the parser reached after pushing it.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    element: Child,
    state: Arc<State>,
}

#[derive(Debug, Default)]
pub(crate) struct Stack(Vec<Frame>);

impl Stack {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, element: Child, state: Arc<State>) {
        self.0.push(Frame { element, state })
    }

    pub fn top_state(&self) -> Option<Arc<State>> {
        self.0.last().map(|frame| frame.state.clone())
    }

    /// Removes the `n` topmost elements, in stack order.
    ///
    /// Returns None, if the stack holds fewer elements.
    pub fn pop_children(&mut self, n: usize) -> Option<Vec<Child>> {
        let from = self.0.len().checked_sub(n)?;
        Some(self.0.drain(from..).map(|frame| frame.element).collect())
    }

    /// Is the stack exactly one node of the production?
    pub fn holds(&self, production: &Production) -> bool {
        matches!(
            self.0.as_slice(),
            [Frame { element: Child::Node(node), .. }] if node.production() == production
        )
    }

    /// Takes the last remaining node out of the stack.
    pub fn pop_node(&mut self) -> Option<ParseNode> {
        match self.0.pop()?.element {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }

    pub fn view(&self) -> StackView<'_> {
        StackView(&self.0)
    }
}

/// Printable snapshot of a parser's stack.
///
/// One row per element, bottom first, with the configurations of the state
/// reached after it.
pub struct StackView<'a>(&'a [Frame]);

impl StackView<'_> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for StackView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::fmt::Display for StackView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();

        table.add_row(["#", "element", "state"].into_iter().collect());

        for (id, frame) in self.0.iter().enumerate() {
            let element = match &frame.element {
                Child::Token(tok) => format!("{} `{}`", tok.tag, Filebound::visible(&tok.source)),
                Child::Node(node) => Filebound::visible(&node.to_string()),
            };

            table.add_row(
                [id.to_string(), element, frame.state.iter().join("\n")]
                    .into_iter()
                    .collect(),
            );
        }

        write!(f, "{}", table)
    }
}
