pub mod ast;
mod error;
mod lexer;
mod parser;
pub mod visit;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{Parser, DEFAULT_MAX_DEPTH};

pub(crate) fn parse(s: &str) -> Result<ast::Node, ParseError> {
    Parser::new(s).parse()
}
