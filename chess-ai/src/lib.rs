//! 国际象棋 AI 引擎
//!
//! 包含:
//! - Minimax + Alpha-Beta 搜索
//! - 以完整局面为键的置换表

mod search;
mod transposition;

pub use search::{AiConfig, AiEngine, SearchResult, MATE_VALUE};
pub use transposition::{EntryType, TTEntry, TTStats, TranspositionTable};
