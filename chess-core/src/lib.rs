//! 国际象棋棋盘模型
//!
//! 包含:
//! - 棋子、格子、局面等核心数据结构（标准化视角）
//! - 伪合法走法生成
//! - 局面评估与走法排序用的位置分值表
//! - FEN 解析与生成

mod board;
mod constants;
mod error;
mod evaluate;
mod fen;
mod moves;
mod piece;
mod tables;

pub use board::{apply_move, new_game, CastlingRights, State};
pub use constants::*;
pub use error::{ChessError, Result};
pub use evaluate::Evaluator;
pub use fen::{Fen, ENDGAME_FEN, INITIAL_FEN};
pub use moves::{legal_moves, Move, MoveGenerator, Moves};
pub use piece::{coordinate_of, Cell, Piece, PieceType, Player, Side, Square, KNIGHT_HOPS};
pub use tables::piece_square;
