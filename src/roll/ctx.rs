use super::{error::RollError, roller::Roller, tree::*, RResult};
use crate::common::*;
use crate::parse::{
    ast::{Dice, Node},
    visit::{self, Accept},
    Token,
};

pub type DefaultRoller = rand::prelude::ThreadRng;

pub const DEFAULT_MAX_ROLLS: usize = 10_000;

/// Per-die values kept for display in each [DiceRoll]; the total always covers every die.
pub const MAX_RECORDED_DICE: usize = 10_000;

/// Walks an expression tree, rolling dice as they are reached.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    /// A context with no roll budget. Dice are summed as they are drawn, so a huge
    /// count costs time but not memory.
    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    /// Dice drawn so far by this context.
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        let rolls = self.rolls.saturating_add(n);
        if self.max_rolls.map_or(false, |max| rolls > max) {
            Err(RollError::TooManyRolls)
        } else {
            self.rolls = rolls;
            Ok(())
        }
    }

    pub fn roll(&mut self, dice: Dice) -> RResult<DiceRoll> {
        self.count_rolls(dice.count)?;

        let mut values = Vec::with_capacity(dice.count.min(MAX_RECORDED_DICE));
        let mut total: Int = 0;
        for x in self.roller.roll_iter(dice.count, dice.faces) {
            total = total
                .checked_add(Int::from(x))
                .ok_or(RollError::DiceOverflow(dice))?;
            if values.len() < MAX_RECORDED_DICE {
                values.push(x);
            }
        }
        log::debug!("rolled {} = {}", dice, total);

        Ok(DiceRoll::new(dice, values, total))
    }

    pub fn eval(&mut self, node: &Node) -> RResult<Roll> {
        let tree = node.accept(self)?;
        Ok(Roll::new(tree))
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new_bounded(DEFAULT_MAX_ROLLS, rand::thread_rng())
    }
}

impl<R: Roller> visit::AstVisitor for RollContext<R> {
    type Output = RResult<RollTree>;

    fn visit_literal(&mut self, token: &Token) -> Self::Output {
        let text = &token.text;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RollError::InvalidLiteral(text.clone()));
        }
        let value = text
            .parse()
            .map_err(|_| RollError::LiteralOutOfRange(text.clone()))?;
        Ok(Literal::new(value).into())
    }

    fn visit_dice(&mut self, token: &Token) -> Self::Output {
        let dice: Dice = token.text.parse().map_err(|source| RollError::InvalidDice {
            text: token.text.clone(),
            source,
        })?;
        Ok(self.roll(dice)?.into())
    }

    fn visit_binary(&mut self, l: &Node, op: &BinaryOperator, r: &Node) -> Self::Output {
        let left = self.visit(l)?;
        let right = self.visit(r)?;
        let total = op.apply(left.total(), right.total())?;
        Ok(Binary::new(left, *op, right, total).into())
    }

    fn visit_empty(&mut self) -> Self::Output {
        Ok(Empty.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ast::DiceError, TokenKind};
    use crate::roll::roller::StepRoller;
    use crate::test_utils::seeded_rng;

    fn mock_roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    fn check(s: &str, expected: Int) {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        let ast = crate::parse::parse(s).unwrap();
        let actual = ctx.eval(&ast).unwrap();
        assert_eq!(actual.total(), expected, "input: {:?}", s);
    }

    fn check_err(s: &str, expected: RollError) {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        let ast = crate::parse::parse(s).unwrap();
        let actual = ctx.eval(&ast);
        assert_eq!(actual.unwrap_err(), expected, "input: {:?}", s);
    }

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 0..text.len())
    }

    #[test]
    fn test_eval_number() {
        check("2", 2);
        check("0", 0);
        check("007", 7);
        check("9223372036854775807", Int::MAX);
    }

    #[test]
    fn test_eval_binary() {
        check("2 + 3", 5);
        check("12-3*2", 6);
        check("1+3-2", 2);
        check("(12-3)*2", 18);
        check("2 * (1 - 3)", -4);
        check("7/2", 3);
        check("(1-8)/2", -3);
    }

    #[test]
    fn test_eval_dice() {
        check("1d20 + 4", 10 + 4);
        check("2d4", 2 + 3);
        check("d6", 4);
        check("8d6", 4 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
        check("0d6", 0);
    }

    #[test]
    fn test_eval_dice_left_to_right() {
        // the left dice term is drawn before the right one
        check("1d20 - 1d20", 10 - 11);
        check("d20 * (d20 - d20)", 10 * (11 - 12));
    }

    #[test]
    fn test_eval_records_dice() {
        let mut ctx = RollContext::new_unbounded(mock_roller());
        let ast = crate::parse::parse("2d6 + 1 + d4").unwrap();
        let roll = ctx.eval(&ast).unwrap();

        let dice: Vec<_> = roll.dice().into_iter().map(|d| d.values.clone()).collect();
        assert_eq!(dice, vec![vec![4, 5], vec![4]]);
        assert_eq!(roll.total(), 4 + 5 + 1 + 4);
        assert_eq!(roll.to_string(), "2d6 (4, 5) + 1 + 1d4 (4) = 14");
        assert_eq!(ctx.rolls(), 3);
    }

    #[test]
    fn test_eval_large_count_keeps_total() {
        let mut ctx = RollContext::new_unbounded(mock_roller());
        let ast = crate::parse::parse("10005d1").unwrap();
        let roll = ctx.eval(&ast).unwrap();

        assert_eq!(roll.total(), 10005);
        assert_eq!(roll.dice()[0].values.len(), MAX_RECORDED_DICE);
        assert!(roll.to_string().ends_with("1, 1, ...) = 10005"));
    }

    #[test]
    fn test_eval_empty() {
        let mut ctx = RollContext::new_unbounded(mock_roller());
        let roll = ctx.eval(&Node::Empty).unwrap();
        assert_eq!(roll.total(), 0);
        assert_eq!(roll.to_string(), "0");
    }

    #[test]
    fn test_err_zero_division() {
        check_err("1/0", RollError::ZeroDivision);
        check_err("4/(2-2)", RollError::ZeroDivision);
    }

    #[test]
    fn test_err_overflow() {
        check_err(
            "9223372036854775807 + 1",
            RollError::Overflow {
                lhs: Int::MAX,
                op: BinaryOperator::Add,
                rhs: 1,
            },
        );
        check_err(
            "99999999999999999999",
            RollError::LiteralOutOfRange("99999999999999999999".to_string()),
        );
    }

    #[test]
    fn test_err_zero_faces() {
        check_err(
            "3d0",
            RollError::InvalidDice {
                text: "3d0".to_string(),
                source: DiceError::ZeroFaces,
            },
        );
    }

    #[test]
    fn test_err_too_many_rolls() {
        check_err("1001d6", RollError::TooManyRolls);
        check_err("500d6 + 501d6", RollError::TooManyRolls);
        check_err("99999999999999999999d6", {
            let source = "99999999999999999999".parse::<usize>().unwrap_err();
            RollError::InvalidDice {
                text: "99999999999999999999d6".to_string(),
                source: DiceError::InvalidCount(source),
            }
        });
    }

    #[test]
    fn test_err_tokens_bypassing_scanner() {
        let mut ctx = RollContext::new_unbounded(mock_roller());

        let node = Node::Dice(token(TokenKind::Dice, "26"));
        assert_eq!(
            ctx.eval(&node).unwrap_err(),
            RollError::InvalidDice {
                text: "26".to_string(),
                source: DiceError::NoDelimiter,
            }
        );

        let node = Node::Literal(token(TokenKind::Literal, "+5"));
        assert_eq!(
            ctx.eval(&node).unwrap_err(),
            RollError::InvalidLiteral("+5".to_string())
        );

        let node = Node::Literal(token(TokenKind::Literal, ""));
        assert_eq!(
            ctx.eval(&node).unwrap_err(),
            RollError::InvalidLiteral(String::new())
        );
    }

    #[test]
    fn test_dice_ranges_with_seeded_rng() {
        for seed in 0..50 {
            let mut ctx = RollContext::new_unbounded(seeded_rng(seed));
            for (count, faces) in [(1, 1), (1, 6), (3, 6), (10, 4), (2, 100)] {
                let ast = crate::parse::parse(&format!("{}d{}", count, faces)).unwrap();
                let total = ctx.eval(&ast).unwrap().total();
                assert!(
                    (count..=count * faces).contains(&total),
                    "{}d{} rolled {}",
                    count,
                    faces,
                    total
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let ast = crate::parse::parse("4d6 * 2 + d20").unwrap();
        let a = RollContext::new_unbounded(seeded_rng(42)).eval(&ast).unwrap();
        let b = RollContext::new_unbounded(seeded_rng(42)).eval(&ast).unwrap();
        assert_eq!(a, b);
    }
}
