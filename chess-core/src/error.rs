//! 错误类型定义

use thiserror::Error;

/// 棋局规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 走法的起点不是走子方的棋子
    #[error("Illegal move: from {from} to {to} ({reason})")]
    IllegalMove {
        from: u8,
        to: u8,
        reason: &'static str,
    },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 无效的格子名称
    #[error("Invalid square: {name:?}")]
    InvalidSquare { name: String },
}

/// 棋局操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
