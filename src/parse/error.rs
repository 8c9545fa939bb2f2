use super::lexer::TokenKind;
use crate::common::NonEmpty;
use std::fmt;
use std::ops::Range;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Range<usize>, slice: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            slice: slice.into(),
        }
    }

    /// Whether the error was raised while scanning rather than while assembling the tree.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::InvalidCharacter
                | ParseErrorKind::MalformedDice
                | ParseErrorKind::MultipleDiceMarkers
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    InvalidCharacter,
    MalformedDice,
    MultipleDiceMarkers,
    UnexpectedToken {
        found: TokenKind,
        expected: NonEmpty<&'static str>,
    },
    UnclosedParen,
    UnmatchedCloseParen,
    UnknownOperator,
    TooDeeplyNested {
        max_depth: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter => f.write_str("invalid character"),
            Self::MalformedDice => {
                f.write_str("malformed dice expression; 'd' must be followed by the number of faces")
            }
            Self::MultipleDiceMarkers => {
                f.write_str("dice expression contains more than one 'd'")
            }
            Self::UnexpectedToken { found, expected } => {
                f.write_str("expected ")?;
                fmt_expected(expected, f)?;
                write!(f, ", found {}", found)
            }
            Self::UnclosedParen => f.write_str("expression has no closing parenthesis"),
            Self::UnmatchedCloseParen => f.write_str("closing parenthesis has no opening match"),
            Self::UnknownOperator => f.write_str("not a valid binary operator"),
            Self::TooDeeplyNested { max_depth } => {
                write!(f, "expression too deeply nested (limit is {})", max_depth)
            }
        }
    }
}

fn fmt_expected(expected: &[&str], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => f.write_str(a),
        [a, b] => write!(f, "{} or {}", a, b),
        [init @ .., last] => write!(f, "{}, or {}", init.join(", "), last),
    }
}
