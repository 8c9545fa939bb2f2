use super::{ast::*, error::*, lexer::*};
use crate::common::*;
use vec1::vec1;

type PResult<T = Node> = Result<T, ParseError>;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Left and right binding powers per operator symbol. The right power is the
/// larger of the two so that operators of equal precedence associate left.
const BINDING_POWERS: &[(&str, BinaryOperator, (u8, u8))] = &[
    ("+", BinaryOperator::Add, (1, 2)),
    ("-", BinaryOperator::Sub, (1, 2)),
    ("*", BinaryOperator::Mul, (3, 4)),
    ("/", BinaryOperator::Div, (3, 4)),
];

fn infix_binding_power(symbol: &str) -> Option<(BinaryOperator, u8, u8)> {
    BINDING_POWERS
        .iter()
        .find(|(s, _, _)| *s == symbol)
        .map(|&(_, op, (l, r))| (op, l, r))
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    peeked: Option<Token>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            scanner: Scanner::new(s),
            peeked: None,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(mut self) -> PResult {
        let (root, _) = self.parse_expression(0)?;

        let trailing = self.advance()?;
        match trailing.kind {
            TokenKind::EndOfInput => Ok(root),
            _ if trailing.is_operator(")") => {
                Err(Self::error(ParseErrorKind::UnmatchedCloseParen, trailing))
            }
            // parse_expression only stops at ')' or end of input
            _ => Err(Self::unexpected_token(trailing, vec1!["<end of input>"])),
        }
    }

    fn advance(&mut self) -> PResult<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scanner.read_token(),
        }
    }

    fn peek(&mut self) -> PResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scanner.read_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn error(kind: ParseErrorKind, token: Token) -> ParseError {
        ParseError::new(kind, token.span, token.text)
    }

    fn unexpected_token(token: Token, expected: NonEmpty<&'static str>) -> ParseError {
        let found = token.kind;
        Self::error(ParseErrorKind::UnexpectedToken { found, expected }, token)
    }

    fn too_deep(&self, token: Token) -> ParseError {
        Self::error(
            ParseErrorKind::TooDeeplyNested {
                max_depth: self.max_depth,
            },
            token,
        )
    }

    // Parsing functions below return each subtree with its height, which is
    // bounded by `max_depth` the same as recursion is.
    fn parse_expression(&mut self, min_bp: u8) -> PResult<(Node, usize)> {
        if self.depth >= self.max_depth {
            let token = self.advance()?;
            return Err(self.too_deep(token));
        }

        self.depth += 1;
        let result = self.parse_climbing(min_bp);
        self.depth -= 1;
        result
    }

    fn parse_climbing(&mut self, min_bp: u8) -> PResult<(Node, usize)> {
        let (mut lhs, mut height) = self.parse_term()?;

        loop {
            let next = self.peek()?;
            match next.kind {
                TokenKind::EndOfInput => break,
                TokenKind::Operator if next.text == ")" => break,
                TokenKind::Literal | TokenKind::Dice => {
                    let token = self.advance()?;
                    return Err(Self::unexpected_token(
                        token,
                        vec1!["<operator>", "<end of input>"],
                    ));
                }
                TokenKind::Operator => {}
            }

            let (op, l_bp, r_bp) = match infix_binding_power(&next.text) {
                Some(bp) => bp,
                None => {
                    let token = self.advance()?;
                    return Err(Self::error(ParseErrorKind::UnknownOperator, token));
                }
            };
            if l_bp < min_bp {
                break;
            }

            let op_token = self.advance()?;
            let (rhs, rhs_height) = self.parse_expression(r_bp)?;
            height = 1 + height.max(rhs_height);
            if height > self.max_depth {
                return Err(self.too_deep(op_token));
            }
            log::debug!("parsed binary {} at depth {}", op, self.depth);
            lhs = Node::new_binary(op, lhs, rhs);
        }

        Ok((lhs, height))
    }

    fn parse_term(&mut self) -> PResult<(Node, usize)> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Literal => Ok((Node::Literal(token), 1)),
            TokenKind::Dice => Ok((Node::Dice(token), 1)),
            TokenKind::Operator if token.text == "(" => {
                let inner = self.parse_expression(0)?;
                let close = self.advance()?;
                if close.is_operator(")") {
                    Ok(inner)
                } else {
                    Err(Self::error(ParseErrorKind::UnclosedParen, token))
                }
            }
            _ => Err(Self::unexpected_token(
                token,
                vec1!["<literal>", "<dice>", "'('"],
            )),
        }
    }
}
