use super::error::{ParseError, ParseErrorKind};
use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
enum Lexeme {
    #[regex(r"[0-9]+")]
    Literal,
    #[regex(r"[0-9]*[dD][0-9]+")]
    Dice,

    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("(")]
    #[token(")")]
    Operator,

    #[regex(r"[0-9]*[dD]")]
    ErrMissingFaces,
    #[regex(r"[0-9]*[dD][0-9]*[dD][0-9dD]*")]
    ErrMultipleMarkers,

    #[regex(r"[ \t\r\n\x0B]+", logos::skip)]
    #[error]
    Error,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Literal,
    Dice,
    Operator,
    EndOfInput,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "<literal>",
            Self::Dice => "<dice>",
            Self::Operator => "<operator>",
            Self::EndOfInput => "<end of input>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scanned token. Dice markers are always lower-case in `text`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }
}

/// Turns source text into [Token]s one call at a time.
pub struct Scanner<'a> {
    lexer: logos::Lexer<'a, Lexeme>,
}

impl<'a> Scanner<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            lexer: Lexeme::lexer(s),
        }
    }

    /// Reads the next token. Once the input is exhausted every call yields
    /// [TokenKind::EndOfInput].
    pub fn read_token(&mut self) -> Result<Token, ParseError> {
        let lexeme = match self.lexer.next() {
            Some(lexeme) => lexeme,
            None => {
                let end = self.lexer.source().len();
                return Ok(Token::new(TokenKind::EndOfInput, "", end..end));
            }
        };

        let span = self.lexer.span();
        let slice = self.lexer.slice();
        log::trace!("scanned {:?} {:?} at {:?}", lexeme, slice, span);

        let kind = match lexeme {
            Lexeme::Literal => TokenKind::Literal,
            Lexeme::Dice => {
                return Ok(Token::new(TokenKind::Dice, slice.to_ascii_lowercase(), span))
            }
            Lexeme::Operator => TokenKind::Operator,
            Lexeme::ErrMissingFaces => {
                return Err(ParseError::new(ParseErrorKind::MalformedDice, span, slice))
            }
            Lexeme::ErrMultipleMarkers => {
                return Err(ParseError::new(
                    ParseErrorKind::MultipleDiceMarkers,
                    span,
                    slice,
                ))
            }
            Lexeme::Error => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidCharacter,
                    span,
                    slice,
                ))
            }
        };
        Ok(Token::new(kind, slice, span))
    }
}
