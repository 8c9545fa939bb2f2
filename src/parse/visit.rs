use super::ast::Node;
use super::lexer::Token;
use crate::common::*;

pub trait AstVisitor {
    type Output;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Self::Output
    where
        T: Accept<Self>,
    {
        node.accept(self)
    }

    fn visit_literal(&mut self, token: &Token) -> Self::Output;

    fn visit_dice(&mut self, token: &Token) -> Self::Output;

    fn visit_binary(&mut self, l: &Node, op: &BinaryOperator, r: &Node) -> Self::Output;

    fn visit_empty(&mut self) -> Self::Output;
}

pub trait Accept<V: AstVisitor + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<V: AstVisitor + ?Sized> Accept<V> for Node {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Literal(t) => v.visit_literal(t),
            Self::Dice(t) => v.visit_dice(t),
            Self::Binary(l, op, r) => v.visit_binary(l, op, r),
            Self::Empty => v.visit_empty(),
        }
    }
}
