//! 棋盘几何常量
//!
//! 棋盘使用 12 行 x 10 列的 mailbox 表示，四周留出不可走的边框，
//! 方向步进时不需要显式的越界检查。

/// 棋盘格数（含边框）
pub const BOARD_SIZE: usize = 120;

/// 每行格数（含左右边框）
pub const ROW_WIDTH: usize = 10;

/// 方向偏移：北（向对方底线）
pub const N: i8 = -10;
/// 方向偏移：东
pub const E: i8 = 1;
/// 方向偏移：南
pub const S: i8 = 10;
/// 方向偏移：西
pub const W: i8 = -1;

/// 己方底线左右两角与对方底线左右两角（标准化视角下）
pub const A1: u8 = 91;
pub const H1: u8 = 98;
pub const A8: u8 = 21;
pub const H8: u8 = 28;

/// 兵的初始行（第二横线）
pub const PAWN_HOME_FIRST: u8 = A1 - 10;
pub const PAWN_HOME_LAST: u8 = H1 - 10;

/// 机动性权重（每一步走法差的分值）
pub const MOBILITY_WEIGHT: i32 = 10;
