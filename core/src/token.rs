use crate::{
    error::LexResult,
    span::{Position, Span},
};

/// A leaf of the parse tree, produced by a lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Name of the token class, e.g. `NUMBER` or `PUNCTUATOR`.
    pub tag: String,
    /// The exact source text of the token.
    pub source: String,
    pub span: Span,
    /// Whitespace and comments; the parser never sees these.
    pub trivia: bool,
}

impl Token {
    pub fn new<S, T>(tag: S, source: T, span: Span) -> Self
    where
        S: ToString,
        T: ToString,
    {
        Self {
            tag: tag.to_string(),
            source: source.to_string(),
            span,
            trivia: false,
        }
    }

    /// Creates a token the parser skips over, such as whitespace or a comment.
    pub fn trivia<S, T>(tag: S, source: T, span: Span) -> Self
    where
        S: ToString,
        T: ToString,
    {
        Self {
            trivia: true,
            ..Self::new(tag, source, span)
        }
    }

    #[inline(always)]
    pub fn is_trivia(&self) -> bool {
        self.trivia
    }

    pub fn position(&self) -> Position {
        self.span.from
    }

    pub fn line(&self) -> usize {
        self.span.from.line
    }

    pub fn column(&self) -> usize {
        self.span.from.column
    }
}

pub mod traits {
    use crate::{error::LexResult, token::Token};

    /// The pull boundary with a lexer.
    ///
    /// A finite, one-pass sequence of tokens; the parser never rewinds it.
    pub trait TokenSource: Iterator<Item = LexResult<Token>> {
        /// Pulls tokens until one the parser cares about shows up.
        fn next_significant(&mut self) -> Option<LexResult<Token>>
        where
            Self: Sized,
        {
            self.find(|res| !matches!(res, Ok(tok) if tok.is_trivia()))
        }
    }

    impl<I> TokenSource for I where I: Iterator<Item = LexResult<Token>> {}
}

/// Wraps an already tokenized buffer as a token source.
pub fn buffered<I>(tokens: I) -> impl traits::TokenSource
where
    I: IntoIterator<Item = Token>,
{
    tokens.into_iter().map(LexResult::Ok)
}
