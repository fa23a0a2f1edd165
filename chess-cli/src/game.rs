//! 对局控制
//!
//! 引擎自我对弈：每一步按固定深度搜索，执行返回的走法，直到一方的王被吃、
//! 引擎给不出走法或达到步数上限。

use std::time::Instant;

use anyhow::{Context, Result};
use chess_ai::AiEngine;
use chess_core::{apply_move, Fen, Player, State};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::render::{board_move, square_name};

/// 单步记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 步数（从 1 开始）
    pub ply: u32,
    /// 走子方
    pub player: Player,
    /// 起始格（白方视角）
    pub from: String,
    /// 目标格（白方视角）
    pub to: String,
    /// 搜索分数（白方视角）
    pub score: i32,
    /// 搜索节点数
    pub nodes: u64,
    /// 本步耗时（毫秒）
    pub elapsed_ms: u64,
}

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GameOutcome {
    /// 王被吃掉
    KingCaptured { winner: Player },
    /// 引擎没有返回走法
    NoMove,
    /// 达到步数上限
    PlyLimit,
}

/// 完整棋谱
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 起始局面
    pub start_fen: String,
    /// 搜索深度
    pub depth: u8,
    pub moves: Vec<MoveRecord>,
    pub outcome: GameOutcome,
    /// 终局局面
    pub final_fen: String,
}

/// 单步推进的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Moved(MoveRecord),
    Finished(GameOutcome),
}

/// 自我对弈
pub struct SelfPlay {
    engine: AiEngine,
    state: State,
    start_fen: String,
    depth: u8,
    max_plies: u32,
    history: Vec<MoveRecord>,
}

impl SelfPlay {
    /// 创建自我对弈
    pub fn new(engine: AiEngine, state: State, depth: u8, max_plies: u32) -> Self {
        Self {
            start_fen: Fen::to_string(&state),
            engine,
            state,
            depth,
            max_plies,
            history: Vec::new(),
        }
    }

    /// 当前局面
    pub fn state(&self) -> &State {
        &self.state
    }

    /// 已走的步
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn engine(&self) -> &AiEngine {
        &self.engine
    }

    /// 搜索并执行一步
    pub fn step(&mut self) -> Result<Step> {
        if self.state.king_count() < 2 {
            let winner = winner(&self.state, self.engine.config().mate_value);
            return Ok(Step::Finished(GameOutcome::KingCaptured { winner }));
        }
        if self.history.len() as u32 >= self.max_plies {
            return Ok(Step::Finished(GameOutcome::PlyLimit));
        }

        let mover = self.state.turn;
        let start = Instant::now();
        let result = self.engine.search(&self.state, self.depth);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let Some(mv) = result.best_move else {
            debug!(score = result.score, "engine returned no move");
            return Ok(Step::Finished(GameOutcome::NoMove));
        };

        self.state = apply_move(&self.state, mv)
            .with_context(|| format!("引擎走法无法执行: {}", mv))?;

        let played = board_move(mv, mover);
        let record = MoveRecord {
            ply: self.history.len() as u32 + 1,
            player: mover,
            from: square_name(played.from),
            to: square_name(played.to),
            score: result.score,
            nodes: result.nodes,
            elapsed_ms,
        };
        info!(
            ply = record.ply,
            player = %mover,
            from = %record.from,
            to = %record.to,
            score = record.score,
            nodes = record.nodes,
            "move played"
        );

        self.history.push(record.clone());
        Ok(Step::Moved(record))
    }

    /// 一直走到对局结束
    pub fn play_out(&mut self) -> Result<GameOutcome> {
        loop {
            if let Step::Finished(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// 生成棋谱
    pub fn record(&self, outcome: GameOutcome) -> GameRecord {
        GameRecord {
            start_fen: self.start_fen.clone(),
            depth: self.depth,
            moves: self.history.clone(),
            outcome,
            final_fen: Fen::to_string(&self.state),
        }
    }
}

/// 由分数判断胜方：超过将杀分的一方获胜，否则判给刚走完的一方
pub fn winner(state: &State, mate_value: i32) -> Player {
    if state.score >= mate_value {
        Player::White
    } else if state.score <= -mate_value {
        Player::Black
    } else {
        state.turn.opponent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_ai::AiConfig;
    use chess_core::{Square, ENDGAME_FEN};

    fn engine() -> AiEngine {
        AiEngine::new(AiConfig::with_depth(2))
    }

    #[test]
    fn test_step_records_move() {
        let mut game = SelfPlay::new(engine(), State::initial(), 2, 10);
        let Step::Moved(record) = game.step().unwrap() else {
            panic!("初始局面应能走子");
        };
        assert_eq!(record.ply, 1);
        assert_eq!(record.player, Player::White);
        assert!(Square::parse(&record.from).is_ok());
        assert!(Square::parse(&record.to).is_ok());
        assert!(record.nodes > 0);
        assert_eq!(game.state().turn, Player::Black);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_black_moves_are_reported_on_the_board() {
        let mut game = SelfPlay::new(engine(), State::initial(), 2, 10);
        game.step().unwrap();
        let Step::Moved(record) = game.step().unwrap() else {
            panic!("黑方应能走子");
        };
        assert_eq!(record.player, Player::Black);
        // 黑方起步一定在第七或第八横线
        let rank = record.from.chars().nth(1).unwrap();
        assert!(rank == '7' || rank == '8', "黑方起始格: {}", record.from);
    }

    #[test]
    fn test_ply_limit() {
        let mut game = SelfPlay::new(engine(), State::initial(), 1, 3);
        let outcome = game.play_out().unwrap();
        assert_eq!(outcome, GameOutcome::PlyLimit);
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn test_king_capture_ends_game() {
        let state = Fen::parse("4k3/8/8/8/8/8/8/4RK2 w - -").unwrap();
        let mut game = SelfPlay::new(engine(), state, 2, 10);

        let Step::Moved(record) = game.step().unwrap() else {
            panic!("白车应吃王");
        };
        assert_eq!((record.from.as_str(), record.to.as_str()), ("e1", "e8"));

        let outcome = game.play_out().unwrap();
        assert_eq!(
            outcome,
            GameOutcome::KingCaptured {
                winner: Player::White
            }
        );
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_endgame_play_out_terminates() {
        let state = Fen::parse(ENDGAME_FEN).unwrap();
        let mut game = SelfPlay::new(engine(), state, 2, 40);
        let outcome = game.play_out().unwrap();
        let record = game.record(outcome);
        assert_eq!(record.start_fen, ENDGAME_FEN);
        assert_eq!(record.moves.len(), game.history().len());
        assert!(record.moves.len() <= 40);
    }

    #[test]
    fn test_winner_from_score() {
        let mut state = State::initial();
        state.score = 20_000;
        assert_eq!(winner(&state, 9000), Player::White);
        state.score = -20_000;
        assert_eq!(winner(&state, 9000), Player::Black);
        state.score = 0;
        assert_eq!(winner(&state, 9000), Player::Black);
    }

    #[test]
    fn test_outcome_json() {
        let outcome = GameOutcome::KingCaptured {
            winner: Player::Black,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"result":"king_captured","winner":"black"}"#);
        assert_eq!(
            serde_json::to_string(&GameOutcome::PlyLimit).unwrap(),
            r#"{"result":"ply_limit"}"#
        );
    }
}
