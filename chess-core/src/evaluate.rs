//! 局面评估函数

use crate::board::State;
use crate::constants::MOBILITY_WEIGHT;
use crate::moves::MoveGenerator;
use crate::piece::Side;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估局面（白方视角，正值对白方有利）
    ///
    /// 子力差与机动性都按走子方计算，再乘以走子方的符号。每次走子后都从头
    /// 重新计算，没有增量维护。
    pub fn evaluate(state: &State) -> i32 {
        (Self::material(state) + Self::mobility(state)) * state.turn.sign()
    }

    /// 子力差（走子方视角）
    pub fn material(state: &State) -> i32 {
        state
            .pieces()
            .map(|(_, piece)| match piece.side {
                Side::Mover => piece.value(),
                Side::Opponent => -piece.value(),
            })
            .sum()
    }

    /// 机动性：双方走法数之差的绝对值乘以权重
    pub fn mobility(state: &State) -> i32 {
        let own = MoveGenerator::count(state) as i32;
        let theirs = MoveGenerator::count(&state.rotate()) as i32;
        MOBILITY_WEIGHT * (own - theirs).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;
    use crate::moves::Move;
    use crate::piece::{Player, Square};

    #[test]
    fn test_initial_evaluation() {
        let state = State::initial();
        assert_eq!(Evaluator::material(&state), 0);
        assert_eq!(Evaluator::mobility(&state), 0);
        assert_eq!(Evaluator::evaluate(&state), 0);
    }

    #[test]
    fn test_material_advantage() {
        // 白方多一个后
        let state = Fen::parse("4k3/8/8/8/8/8/8/3QK3 w - -").unwrap();
        assert_eq!(Evaluator::material(&state), 900);
        assert!(Evaluator::evaluate(&state) > 900);
    }

    #[test]
    fn test_score_is_white_relative() {
        // 轮到黑方时白方的优势仍为正分
        let state = Fen::parse("4k3/8/8/8/8/8/8/3QK3 b - -").unwrap();
        assert_eq!(state.turn, Player::Black);
        assert_eq!(Evaluator::material(&state), -900);
        let score = Evaluator::evaluate(&state);
        assert!(score > 0, "白方多后应该为正分: {}", score);
        assert_eq!(score, state.score);
    }

    #[test]
    fn test_mobility_is_symmetric() {
        let state = Fen::parse("4k3/8/8/8/8/8/8/3QK3 w - -").unwrap();
        assert_eq!(Evaluator::mobility(&state), Evaluator::mobility(&state.rotate()));
        assert!(Evaluator::mobility(&state) > 0);
    }

    #[test]
    fn test_successor_is_reevaluated() {
        let e2 = Square::parse("e2").unwrap();
        let e4 = Square::parse("e4").unwrap();
        let next = State::initial().successor(Move::new(e2, e4));
        assert_eq!(next.score, Evaluator::evaluate(&next));
        // 白方 30 步、黑方 20 步；机动性项取绝对值后按走子方（黑）取负号
        assert_eq!(Evaluator::mobility(&next), 100);
        assert_eq!(next.score, -100);
    }

    #[test]
    fn test_king_capture_is_decisive() {
        let state = Fen::parse("4k3/8/8/8/8/8/8/4RK2 w - -").unwrap();
        let next = state
            .apply(Move::new(Square::parse("e1").unwrap(), Square::parse("e8").unwrap()))
            .unwrap();
        assert_eq!(next.king_count(), 1);
        assert!(next.score > 20000, "吃王后白方大幅领先: {}", next.score);
    }
}
