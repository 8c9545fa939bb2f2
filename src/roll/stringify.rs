use super::tree::*;
use crate::common::BinaryOperator;
use std::fmt;

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tree {
            RollTree::Empty(_) => write!(f, "{}", self.total()),
            tree => write!(f, "{} = {}", tree, self.total()),
        }
    }
}

impl fmt::Display for RollTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(x) => fmt::Display::fmt(&x.value, f),
            Self::Dice(x) => fmt::Display::fmt(x, f),
            Self::Binary(x) => fmt::Display::fmt(x, f),
            Self::Empty(_) => Ok(()),
        }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values: Vec<_> = self.values.iter().map(ToString::to_string).collect();
        if values.len() < self.dice.count {
            values.push("...".to_string());
        }
        write!(f, "{} ({})", self.dice, values.join(", "))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operand(&self.left, self.op, false, f)?;
        write!(f, " {} ", self.op)?;
        fmt_operand(&self.right, self.op, true, f)
    }
}

fn fmt_operand(
    tree: &RollTree,
    parent: BinaryOperator,
    right_side: bool,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match tree {
        RollTree::Binary(b)
            if b.op.precedence() < parent.precedence()
                || (right_side && b.op.precedence() == parent.precedence()) =>
        {
            write!(f, "({})", b)
        }
        _ => write!(f, "{}", tree),
    }
}
