pub mod ast;
pub mod error;
pub mod grammar;
pub mod item;
pub mod lr;
pub mod rule;
pub mod span;
pub mod symbol;
pub mod token;

pub use ast::{Child, NodeKind, NodeRegistry, ParseNode};
pub use error::{
    ErrorKind, ExpectedSymbols, GrammarError, GrammarResult, InvariantViolation, LexError,
    LexErrorKind, LexResult, ParseError, ParseResult,
};
pub use grammar::Grammar;
pub use item::{Configuration, Lookahead, LookaheadSet, State};
pub use lr::{Parser, ParserOptions};
pub use rule::{Production, Rule};
pub use span::{Position, Span};
pub use symbol::{Filebound, GrammarSymbol, TagTerminal, Terminal, TerminalRef};
pub use token::{buffered, Token};

pub mod traits {
    pub use crate::token::traits::TokenSource;
}
