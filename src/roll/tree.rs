use crate::common::*;
use crate::parse::ast::Dice;

#[enum_dispatch::enum_dispatch]
pub trait Eval {
    fn total(&self) -> Int;
}

/// The result of evaluating an expression, with every die that was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Roll {
    pub(crate) tree: RollTree,
}

impl Roll {
    pub(crate) fn new(tree: RollTree) -> Self {
        Self { tree }
    }

    pub fn total(&self) -> Int {
        self.tree.total()
    }

    pub fn tree(&self) -> &RollTree {
        &self.tree
    }

    /// Every dice term in the expression, left to right.
    pub fn dice(&self) -> Vec<&DiceRoll> {
        let mut out = Vec::new();
        self.tree.collect_dice(&mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Eval)]
pub enum RollTree {
    Literal(Literal),
    Dice(DiceRoll),
    Binary(Binary),
    Empty(Empty),
}

impl RollTree {
    fn collect_dice<'t>(&'t self, out: &mut Vec<&'t DiceRoll>) {
        match self {
            Self::Dice(d) => out.push(d),
            Self::Binary(b) => {
                b.left.collect_dice(out);
                b.right.collect_dice(out);
            }
            Self::Literal(_) | Self::Empty(_) => {}
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Literal {
    pub value: Int,
}

impl Literal {
    pub fn new(value: Int) -> Self {
        Self { value }
    }
}

impl Eval for Literal {
    fn total(&self) -> Int {
        self.value
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceRoll {
    pub dice: Dice,
    pub values: Vec<UInt>,
    total: Int,
}

impl DiceRoll {
    pub(crate) fn new(dice: Dice, values: Vec<UInt>, total: Int) -> Self {
        Self {
            dice,
            values,
            total,
        }
    }
}

impl Eval for DiceRoll {
    fn total(&self) -> Int {
        self.total
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<RollTree>,
    pub op: BinaryOperator,
    pub right: Box<RollTree>,
    total: Int,
}

impl Binary {
    pub(crate) fn new(left: RollTree, op: BinaryOperator, right: RollTree, total: Int) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
            total,
        }
    }
}

impl Eval for Binary {
    fn total(&self) -> Int {
        self.total
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Empty;

impl Eval for Empty {
    fn total(&self) -> Int {
        0
    }
}
