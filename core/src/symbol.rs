use std::hash::Hash;

use crate::token::Token;

/// Characters bounding a source text.
///
/// Lexers conventionally emit one token of each around the real input, and
/// goal productions match them as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filebound {
    /// U+0002 START OF TEXT
    Sot,
    /// U+0003 END OF TEXT
    Eot,
}

impl Filebound {
    pub const SOT: &'static str = "\u{2}";
    pub const EOT: &'static str = "\u{3}";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Filebound::Sot => Self::SOT,
            Filebound::Eot => Self::EOT,
        }
    }

    /// Replaces the control characters with their visible pictures (␂, ␃).
    pub fn visible(text: &str) -> String {
        text.replace(Self::SOT, "\u{2402}")
            .replace(Self::EOT, "\u{2403}")
    }
}

/// A symbol of the grammar that cannot be reduced any further.
///
/// It decides which concrete tokens belong to an abstract class of tokens.
/// Terminals are declared once, as `const` or `static` items, and shared by
/// reference.
pub trait Terminal: Sync {
    /// The name shown in diagnostics, in MACRO_CASE.
    fn display_name(&self) -> &str;

    /// Does the given token satisfy this terminal?
    fn matches(&self, candidate: &Token) -> bool;
}

/// Shared handle to a terminal.
///
/// Two handles are equal when the terminals share a display name.
#[derive(Clone, Copy)]
pub struct TerminalRef(&'static dyn Terminal);

impl TerminalRef {
    pub const fn new(terminal: &'static dyn Terminal) -> Self {
        Self(terminal)
    }

    pub fn display_name(&self) -> &str {
        self.0.display_name()
    }

    pub fn matches(&self, candidate: &Token) -> bool {
        self.0.matches(candidate)
    }
}

impl std::fmt::Debug for TerminalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Terminal").field(&self.display_name()).finish()
    }
}

impl std::fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl PartialEq for TerminalRef {
    fn eq(&self, other: &Self) -> bool {
        self.display_name() == other.display_name()
    }
}

impl Eq for TerminalRef {}

impl Hash for TerminalRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.display_name().hash(state)
    }
}

impl PartialOrd for TerminalRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TerminalRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.display_name().cmp(other.display_name())
    }
}

/// A terminal satisfied by every token of a given tag.
#[derive(Debug)]
pub struct TagTerminal {
    name: &'static str,
    tag: &'static str,
}

impl TagTerminal {
    pub const fn new(name: &'static str, tag: &'static str) -> Self {
        Self { name, tag }
    }
}

impl Terminal for TagTerminal {
    fn display_name(&self) -> &str {
        self.name
    }

    fn matches(&self, candidate: &Token) -> bool {
        candidate.tag == self.tag
    }
}

/// An item of a production's sequence.
#[derive(Clone, Copy)]
pub enum GrammarSymbol {
    /// Matches a token whose source is exactly this text.
    Text(&'static str),
    /// Matches any token satisfying the terminal.
    Terminal(TerminalRef),
    /// Expects a whole derivation of the production with this display name.
    ///
    /// The name is a handle; the grammar resolves it.
    Production(&'static str),
}

impl GrammarSymbol {
    pub const fn text(text: &'static str) -> Self {
        Self::Text(text)
    }

    pub const fn terminal(terminal: &'static dyn Terminal) -> Self {
        Self::Terminal(TerminalRef::new(terminal))
    }

    pub const fn production(name: &'static str) -> Self {
        Self::Production(name)
    }

    pub const fn filebound(bound: Filebound) -> Self {
        Self::Text(bound.as_str())
    }

    #[inline(always)]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production(_))
    }

    /// Name of the expected production, if this symbol is one.
    pub fn production_name(&self) -> Option<&'static str> {
        match self {
            Self::Production(name) => Some(name),
            _ => None,
        }
    }

    /// Does the token satisfy this symbol?
    ///
    /// A production never matches a single token.
    pub fn matches(&self, candidate: &Token) -> bool {
        match self {
            Self::Text(text) => candidate.source == *text,
            Self::Terminal(terminal) => terminal.matches(candidate),
            Self::Production(_) => false,
        }
    }
}

impl PartialEq for GrammarSymbol {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Terminal(a), Self::Terminal(b)) => a == b,
            (Self::Production(a), Self::Production(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for GrammarSymbol {}

impl Hash for GrammarSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Text(text) => text.hash(state),
            Self::Terminal(terminal) => terminal.hash(state),
            Self::Production(name) => name.hash(state),
        }
    }
}

impl std::fmt::Debug for GrammarSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Terminal(terminal) => terminal.fmt(f),
            Self::Production(name) => f.debug_tuple("Production").field(name).finish(),
        }
    }
}

impl std::fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "\"{}\"", Filebound::visible(text)),
            Self::Terminal(terminal) => terminal.fmt(f),
            Self::Production(name) => f.write_str(name),
        }
    }
}
