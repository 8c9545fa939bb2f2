mod ctx;
mod error;
mod roller;
mod stringify;
mod tree;

type RResult<T> = Result<T, RollError>;

pub use ctx::{DefaultRoller, RollContext, DEFAULT_MAX_ROLLS};
pub use error::RollError;
pub use roller::Roller;
pub use tree::{Binary, DiceRoll, Empty, Eval, Literal, Roll, RollTree};
