use itertools::Itertools as _;
use thiserror::Error;

use crate::span::Position;

pub type LexResult<T> = Result<T, LexError>;
pub type ParseResult<T> = Result<T, ParseError>;
pub type GrammarResult<T> = Result<T, GrammarError>;

/// Display names of the symbols a state was ready to accept.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpectedSymbols(Vec<String>);

impl ExpectedSymbols {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: ToString> FromIterator<S> for ExpectedSymbols {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(|s| s.to_string()).unique().collect())
    }
}

impl std::fmt::Display for ExpectedSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "nothing");
        }
        self.0.iter().join(", ").fmt(f)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unrecognized character `{0}`")]
    UnrecognizedChar(char),

    #[error("found end of input before end of {tag}: `{text}`")]
    UnexpectedEndOfInput { tag: String, text: String },
}

/// Raised by a lexer when the source text does not form a valid token.
///
/// The parser never builds one itself; it forwards whatever the token source
/// yields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {position}")]
pub struct LexError {
    kind: LexErrorKind,
    position: Position,
}

impl LexError {
    pub const CODE: usize = 1100;

    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn unrecognized_char(ch: char, position: Position) -> Self {
        Self::new(LexErrorKind::UnrecognizedChar(ch), position)
    }

    pub fn unexpected_end_of_input(tag: &str, text: &str, position: Position) -> Self {
        Self::new(
            LexErrorKind::UnexpectedEndOfInput {
                tag: tag.to_owned(),
                text: text.to_owned(),
            },
            position,
        )
    }

    pub fn kind(&self) -> &LexErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn code(&self) -> usize {
        Self::CODE
            + match self.kind {
                LexErrorKind::UnrecognizedChar(_) => 1,
                LexErrorKind::UnexpectedEndOfInput { .. } => 2,
            }
    }
}

/// A state of the parse that a correct closure can never produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("the stack was emptied; it should hold the goal node")]
    EmptyStack,

    #[error("the stack still holds {0} elements after acceptance")]
    UnfinishedStack(usize),

    #[error("no configuration below the reduced {0} expects it")]
    NoGoto(String),

    #[error("neither shifted nor reduced")]
    Stalled,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected token `{text}`, expecting {expecting}")]
    UnexpectedToken {
        tag: String,
        text: String,
        expecting: ExpectedSymbols,
    },

    #[error("unexpected end of input, expecting {expecting}")]
    UnexpectedEndOfInput { expecting: ExpectedSymbols },

    #[error("reduce-reduce conflict between {}", .rules.iter().join(" and "))]
    ReduceReduceConflict { rules: Vec<String> },

    #[error("internal parser error: {0}")]
    Internal(#[from] InvariantViolation),
}

impl ErrorKind {
    pub fn unexpected_token<I, S>(tag: &str, text: &str, expecting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::UnexpectedToken {
            tag: tag.to_owned(),
            text: text.to_owned(),
            expecting: expecting.into_iter().collect(),
        }
    }

    pub fn unexpected_end_of_input<I, S>(expecting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::UnexpectedEndOfInput {
            expecting: expecting.into_iter().collect(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error
    kind: ErrorKind,
    /// Location of the offending token, when there is one.
    position: Option<Position>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, self.position) {
            (ErrorKind::Lex(err), _) => err.fmt(f),
            (kind, Some(position)) => write!(f, "{kind} at {position}"),
            (kind, None) => kind.fmt(f),
        }
    }
}

impl ParseError {
    pub fn new(kind: impl Into<ErrorKind>, position: Option<Position>) -> Self {
        Self {
            kind: kind.into(),
            position,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Numeric code; the 1100 series is lexical, 1200 syntactic, 1300 grammar
    /// defects and 1900 internal faults.
    pub fn code(&self) -> usize {
        match &self.kind {
            ErrorKind::Lex(err) => err.code(),
            ErrorKind::UnexpectedToken { .. } => 1201,
            ErrorKind::UnexpectedEndOfInput { .. } => 1202,
            ErrorKind::ReduceReduceConflict { .. } => 1301,
            ErrorKind::Internal(_) => 1901,
        }
    }

    /// The input is not a sentence of the grammar.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnexpectedToken { .. } | ErrorKind::UnexpectedEndOfInput { .. }
        )
    }

    /// The grammar itself is defective.
    pub fn is_grammar_ambiguity(&self) -> bool {
        matches!(self.kind, ErrorKind::ReduceReduceConflict { .. })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, ErrorKind::Internal(_))
    }
}

impl From<ErrorKind> for ParseError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let position = Some(err.position());
        Self::new(err, position)
    }
}

impl From<InvariantViolation> for ParseError {
    fn from(violation: InvariantViolation) -> Self {
        Self::new(violation, None)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("unknown production {0}")]
    UnknownProduction(String),

    #[error("a different production with the same name already exists {0}")]
    DuplicatedProduction(String),

    #[error("the goal production {0} is not part of the grammar")]
    MissingGoal(String),
}
