use crate::common::{BinaryOperator, Int};
use crate::parse::ast::{Dice, DiceError};
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("cannot divide by zero")]
    ZeroDivision,
    #[error("integer overflow computing {lhs} {op} {rhs}")]
    Overflow {
        lhs: Int,
        op: BinaryOperator,
        rhs: Int,
    },
    #[error("total of {0} is too large")]
    DiceOverflow(Dice),
    #[error("{0:?} is not a number")]
    InvalidLiteral(String),
    #[error("{0:?} is too large")]
    LiteralOutOfRange(String),
    #[error("{text:?} is not a valid dice term: {source}")]
    InvalidDice { text: String, source: DiceError },
}
