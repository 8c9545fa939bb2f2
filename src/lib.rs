//! Evaluates integer arithmetic mixed with dice terms, e.g. `(2d6 + 3) * 2`.
//!
//! Input is scanned into tokens, assembled into an expression tree by
//! precedence climbing and then walked, rolling each dice term when the walk
//! reaches it.
//!
//! ```
//! let total = dice_expr::eval("2d6 + 3").unwrap();
//! assert!((5..=15).contains(&total));
//! assert_eq!(dice_expr::eval("(12 - 3) * 2").unwrap(), 18);
//! ```

pub mod common;
mod error;
pub mod parse;
pub mod roll;

pub use common::Int;
pub use error::Error;
pub use parse::{ParseError, ParseErrorKind};
pub use roll::{Roll, RollContext, RollError, Roller};

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn is_blank(s: &str) -> bool {
    s.bytes()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0B'))
}

/// Parses an expression without evaluating it.
pub fn parse(input: &str) -> Result<parse::ast::Node> {
    if is_blank(input) {
        return Err(Error::EmptyInput);
    }
    Ok(parse::parse(input)?)
}

/// Parses and rolls an expression using the thread-local generator.
pub fn roll(input: &str) -> Result<Roll> {
    roll_with(input, &mut RollContext::default())
}

/// Parses and rolls an expression with a caller-supplied context.
pub fn roll_with<R: Roller>(input: &str, ctx: &mut RollContext<R>) -> Result<Roll> {
    let ast = parse(input)?;
    Ok(ctx.eval(&ast)?)
}

/// Parses and rolls an expression, returning only its total.
pub fn eval(input: &str) -> Result<Int> {
    roll(input).map(|r| r.total())
}

/// Like [eval], for raw bytes. Bytes that are not valid UTF-8 are reported as
/// invalid characters.
pub fn eval_bytes(input: &[u8]) -> Result<Int> {
    let s = std::str::from_utf8(input).map_err(|e| {
        let pos = e.valid_up_to();
        ParseError::new(
            ParseErrorKind::InvalidCharacter,
            pos..pos + 1,
            format!("\\x{:02x}", input[pos]),
        )
    })?;
    eval(s)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use rand::{rngs::StdRng, SeedableRng};

    pub(crate) fn seeded_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }
}
