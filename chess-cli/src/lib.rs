//! 国际象棋自我对弈命令行
//!
//! 包含:
//! - 对局控制（自我对弈循环与棋谱）
//! - 棋盘与走法的文本渲染
//! - 配置读取与棋谱存储

pub mod game;
pub mod render;
pub mod storage;

pub use game::{GameOutcome, GameRecord, MoveRecord, SelfPlay, Step};
pub use storage::{load_config, load_game, save_game};
