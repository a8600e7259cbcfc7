use itertools::Itertools;

use crate::{
    rule::{Production, Rule},
    span::{Position, Span},
    token::Token,
};

/// An element of the parse tree: a shifted token or a reduced node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Token(Token),
    Node(ParseNode),
}

impl Child {
    /// The source text covered by this element.
    pub fn source(&self) -> String {
        match self {
            Child::Token(tok) => tok.source.clone(),
            Child::Node(node) => node.source(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Child::Token(tok) => tok.position(),
            Child::Node(node) => node.position(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Child::Token(tok) => tok.span,
            Child::Node(node) => node.span(),
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(tok) => Some(tok),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&ParseNode> {
        match self {
            Child::Token(_) => None,
            Child::Node(node) => Some(node),
        }
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<ParseNode> for Child {
    fn from(node: ParseNode) -> Self {
        Self::Node(node)
    }
}

/// What a node was built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The production has no registered tag.
    Generic,
    /// The production was registered under this tag.
    Named(&'static str),
}

/// A reduced production with its children, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    kind: NodeKind,
    rule: Rule,
    children: Vec<Child>,
}

impl ParseNode {
    pub(crate) fn new(kind: NodeKind, rule: Rule, children: Vec<Child>) -> Self {
        Self {
            kind,
            rule,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The registered tag, if the node is not generic.
    pub fn tag(&self) -> Option<&'static str> {
        match self.kind {
            NodeKind::Named(tag) => Some(tag),
            NodeKind::Generic => None,
        }
    }

    /// The rule that was reduced to build this node.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn production(&self) -> &'static Production {
        self.rule.production()
    }

    /// Index of the reduced alternative within its production.
    pub fn rule_index(&self) -> usize {
        self.rule.index()
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Child> {
        self.children
    }

    /// The source text of the children, separated by single spaces.
    pub fn source(&self) -> String {
        self.children.iter().map(Child::source).join(" ")
    }

    /// Where the first child starts.
    pub fn position(&self) -> Position {
        self.children
            .first()
            .map(Child::position)
            .unwrap_or_default()
    }

    pub fn span(&self) -> Span {
        Span::from_iter(self.children.iter().map(Child::span))
    }

    /// Every token below this node, in source order.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Depth-first walk over the tokens of a node.
pub struct Tokens<'a> {
    stack: Vec<&'a Child>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(child) = self.stack.pop() {
            match child {
                Child::Token(tok) => return Some(tok),
                Child::Node(node) => self.stack.extend(node.children.iter().rev()),
            }
        }
        None
    }
}

impl std::fmt::Display for ParseNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NodeKind::Named(tag) => write!(f, "<{tag} {}>", self.source()),
            NodeKind::Generic => write!(f, "<{} {}>", self.production().display_name(), self.source()),
        }
    }
}

/// Maps productions to the tag of the node built when they are reduced.
///
/// Lookups compare productions structurally; when several entries match, the
/// last registered wins.
///
/// ```ignore
/// let registry = NodeRegistry::new()
///     .register(&GOAL, "Goal")
///     .register(&UNIT, "Unit");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    entries: Vec<(&'static Production, &'static str)>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, production: &'static Production, tag: &'static str) -> Self {
        self.entries.push((production, tag));
        self
    }

    pub fn kind_of(&self, production: &Production) -> NodeKind {
        self.entries
            .iter()
            .rev()
            .find(|(registered, _)| *registered == production)
            .map(|(_, tag)| NodeKind::Named(*tag))
            .unwrap_or(NodeKind::Generic)
    }

    /// Builds the node for a reduction of the rule.
    pub fn make_parse_node(&self, rule: Rule, children: Vec<Child>) -> ParseNode {
        ParseNode::new(self.kind_of(rule.production()), rule, children)
    }
}
