use super::lexer::Token;
use crate::common::*;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// An expression tree. Every node exclusively owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Token),
    Dice(Token),
    Binary(Box<Node>, BinaryOperator, Box<Node>),
    /// The root of an input with no terms; evaluates to zero.
    Empty,
}

impl Node {
    pub(crate) fn new_binary(op: BinaryOperator, lhs: Node, rhs: Node) -> Self {
        Self::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    /// The number of levels below and including this node.
    pub fn depth(&self) -> usize {
        match self {
            Self::Binary(l, _, r) => 1 + l.depth().max(r.depth()),
            _ => 1,
        }
    }

    fn fmt_operand(
        &self,
        parent: BinaryOperator,
        right_side: bool,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let needs_parens = match self {
            Self::Binary(_, op, _) => {
                op.precedence() < parent.precedence()
                    || (right_side && op.precedence() == parent.precedence())
            }
            _ => false,
        };
        if needs_parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(t) | Self::Dice(t) => f.write_str(&t.text),
            Self::Binary(l, op, r) => {
                l.fmt_operand(*op, false, f)?;
                write!(f, " {} ", op)?;
                r.fmt_operand(*op, true, f)
            }
            Self::Empty => Ok(()),
        }
    }
}

/// A `count`d`faces` term, validated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Dice {
    pub count: usize,
    pub faces: NonZeroUInt,
}

impl Dice {
    pub fn new(count: usize, faces: NonZeroUInt) -> Self {
        Self { count, faces }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.faces)
    }
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, faces) = s
            .split_once(|c: char| c.eq_ignore_ascii_case(&'d'))
            .ok_or(DiceError::NoDelimiter)?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse().map_err(DiceError::InvalidCount)?
        };
        let faces: UInt = faces.parse().map_err(DiceError::InvalidFaces)?;
        let faces = NonZeroUInt::new(faces).ok_or(DiceError::ZeroFaces)?;
        Ok(Self::new(count, faces))
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum DiceError {
    #[error("cannot parse string as dice without 'd' delimiter")]
    NoDelimiter,
    #[error("invalid dice count: {0}")]
    InvalidCount(ParseIntError),
    #[error("invalid number of faces: {0}")]
    InvalidFaces(ParseIntError),
    #[error("dice must have at least one face")]
    ZeroFaces,
}
