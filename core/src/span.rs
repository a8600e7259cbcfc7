use std::ops::Add;

/// A location in the source text.
///
/// `line` and `column` are 1-based; `offset` is the byte offset from the
/// start of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
            .then(self.offset.cmp(&other.offset))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} col {}", self.line, self.column)
    }
}

impl Position {
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Moves the position past the given character.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            *self += NextLine;
        } else {
            *self += NextColumn;
        }
        self.offset += ch.len_utf8();
    }
}

impl Add<NextLine> for Position {
    type Output = Self;

    fn add(mut self, rhs: NextLine) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add<NextColumn> for Position {
    type Output = Self;

    fn add(mut self, rhs: NextColumn) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::AddAssign<NextLine> for Position {
    fn add_assign(&mut self, _: NextLine) {
        self.column = 1;
        self.line += 1;
    }
}

impl std::ops::AddAssign<NextColumn> for Position {
    fn add_assign(&mut self, _: NextColumn) {
        self.column += 1;
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
/// The stretch of source covered by a token or a node.
pub struct Span {
    pub from: Position,
    pub to: Position,
}

impl From<Position> for Span {
    fn from(value: Position) -> Self {
        Self {
            from: value,
            to: value,
        }
    }
}

/// Smallest span enclosing every span of the iterator.
///
/// An empty iterator yields the default span.
impl FromIterator<Span> for Span {
    fn from_iter<T: IntoIterator<Item = Span>>(iter: T) -> Self {
        let mut iter = iter.into_iter();

        let Some(mut span) = iter.next() else {
            return Span::default();
        };

        for item in iter {
            if item.from < span.from {
                span.from = item.from;
            }

            if item.to > span.to {
                span.to = item.to;
            }
        }

        span
    }
}

impl Span {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

/// Moves a [`Position`] to the start of the next line.
pub struct NextLine;
/// Moves a [`Position`] one column to the right.
pub struct NextColumn;
