//! 棋子与格子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, E, N, ROW_WIDTH, S, W};
use crate::error::ChessError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const ORTHOGONAL: &[i8] = &[N, E, S, W];
const DIAGONAL: &[i8] = &[N + E, S + E, S + W, N + W];
const ALL_DIRECTIONS: &[i8] = &[N, E, S, W, N + E, S + E, S + W, N + W];

/// 马的八个跳点
pub const KNIGHT_HOPS: &[i8] = &[
    N + N + E,
    N + E + E,
    S + E + E,
    S + S + E,
    S + S + W,
    S + W + W,
    N + W + W,
    N + N + W,
];

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// 获取棋子的基础分值（用于子力评估）
    pub fn value(&self) -> i32 {
        match self {
            PieceType::Pawn => 100,
            PieceType::Knight => 320,
            PieceType::Bishop => 330,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 20000,
        }
    }

    /// 标准化视角下的走子方向
    pub fn directions(&self) -> &'static [i8] {
        match self {
            PieceType::Pawn => &[N, N + N, N + W, N + E],
            PieceType::Knight => KNIGHT_HOPS,
            PieceType::Bishop => DIAGONAL,
            PieceType::Rook => ORTHOGONAL,
            PieceType::Queen | PieceType::King => ALL_DIRECTIONS,
        }
    }

    /// 是否沿射线连续滑行
    pub fn is_slider(&self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    /// 获取 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// 从 FEN 字符解析（不区分大小写）
    pub fn from_fen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// 棋子归属（相对于标准化视角）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 当前走子方
    Mover,
    /// 对方
    Opponent,
}

impl Side {
    pub fn flip(&self) -> Side {
        match self {
            Side::Mover => Side::Opponent,
            Side::Opponent => Side::Mover,
        }
    }
}

/// 绝对阵营（先手 / 后手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// 白方（先手）
    White,
    /// 黑方（后手）
    Black,
}

impl Player {
    /// 获取对方阵营
    pub fn opponent(&self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// 分数符号：白方为正，黑方为负
    pub fn sign(&self) -> i32 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Player::White => 'w',
            Player::Black => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Player> {
        match c {
            'w' | 'W' => Some(Player::White),
            'b' | 'B' => Some(Player::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub fn new(piece_type: PieceType, side: Side) -> Self {
        Self { piece_type, side }
    }

    /// 走子方的棋子
    pub fn mover(piece_type: PieceType) -> Self {
        Self::new(piece_type, Side::Mover)
    }

    /// 对方的棋子
    pub fn opponent(piece_type: PieceType) -> Self {
        Self::new(piece_type, Side::Opponent)
    }

    /// 换边
    pub fn flipped(&self) -> Self {
        Self::new(self.piece_type, self.side.flip())
    }

    /// 获取 FEN 字符（走子方大写，对方小写）
    pub fn to_fen_char(&self) -> char {
        let c = self.piece_type.to_fen_char();
        match self.side {
            Side::Mover => c.to_ascii_uppercase(),
            Side::Opponent => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let piece_type = PieceType::from_fen_char(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::Mover
        } else {
            Side::Opponent
        };
        Some(Piece { piece_type, side })
    }

    /// 获取棋子分值
    pub fn value(&self) -> i32 {
        self.piece_type.value()
    }
}

/// 棋盘格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// 边框
    OffBoard,
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_off_board(&self) -> bool {
        matches!(self, Cell::OffBoard)
    }

    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(*piece),
            _ => None,
        }
    }

    /// 该格是否为指定归属的棋子
    pub fn is_side(&self, side: Side) -> bool {
        matches!(self, Cell::Occupied(p) if p.side == side)
    }

    /// 该格是否为对方的某几种棋子之一
    pub fn is_opponent_any(&self, kinds: &[PieceType]) -> bool {
        matches!(self, Cell::Occupied(p) if p.side == Side::Opponent && kinds.contains(&p.piece_type))
    }

    /// 换边后的格子
    pub fn flipped(&self) -> Cell {
        match self {
            Cell::Occupied(piece) => Cell::Occupied(piece.flipped()),
            other => *other,
        }
    }
}

/// 棋盘格下标（mailbox 索引 0..120）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(pub u8);

impl Square {
    /// 转换为数组索引
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// 按方向偏移（调用方保证结果仍在 0..120 内）
    pub fn offset(&self, d: i8) -> Square {
        Square((self.0 as i16 + d as i16) as u8)
    }

    /// 旋转 180 度后的对应格
    pub fn mirror(&self) -> Square {
        Square((BOARD_SIZE - 1) as u8 - self.0)
    }

    /// 是否在 8x8 棋盘内
    pub fn is_playable(&self) -> bool {
        let row = self.index() / ROW_WIDTH;
        let col = self.index() % ROW_WIDTH;
        (2..=9).contains(&row) && (1..=8).contains(&col)
    }

    /// 由列 (0-7) 和横线 (0-7) 构造
    pub fn from_coordinate(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square((9 - rank) * 10 + file + 1))
        } else {
            None
        }
    }

    /// 转换为 (列, 横线)，均从 0 开始；边框格返回 None
    pub fn coordinate(&self) -> Option<(u8, u8)> {
        if !self.is_playable() {
            return None;
        }
        let row = self.0 / 10;
        let col = self.0 % 10;
        Some((col - 1, 9 - row))
    }

    /// 解析代数记号，如 "e2"
    pub fn parse(name: &str) -> Result<Square, ChessError> {
        let invalid = || ChessError::InvalidSquare {
            name: name.to_string(),
        };
        let mut chars = name.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !('a'..='h').contains(&f) || !('1'..='8').contains(&r) {
            return Err(invalid());
        }
        Square::from_coordinate(f as u8 - b'a', r as u8 - b'1').ok_or_else(invalid)
    }
}

/// 坐标映射，供外部渲染使用
pub fn coordinate_of(square: Square) -> Option<(u8, u8)> {
    square.coordinate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{A1, A8, H1, H8};

    #[test]
    fn test_piece_fen_char() {
        assert_eq!(Piece::mover(PieceType::King).to_fen_char(), 'K');
        assert_eq!(Piece::opponent(PieceType::Knight).to_fen_char(), 'n');
        assert_eq!(Piece::from_fen_char('R'), Some(Piece::mover(PieceType::Rook)));
        assert_eq!(Piece::from_fen_char('q'), Some(Piece::opponent(PieceType::Queen)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn test_corner_coordinates() {
        assert_eq!(coordinate_of(Square(A1)), Some((0, 0)));
        assert_eq!(coordinate_of(Square(H1)), Some((7, 0)));
        assert_eq!(coordinate_of(Square(A8)), Some((0, 7)));
        assert_eq!(coordinate_of(Square(H8)), Some((7, 7)));
        assert_eq!(coordinate_of(Square(0)), None);
        assert_eq!(coordinate_of(Square(90)), None);
        assert_eq!(coordinate_of(Square(99)), None);
    }

    #[test]
    fn test_coordinate_roundtrip() {
        for file in 0..8 {
            for rank in 0..8 {
                let sq = Square::from_coordinate(file, rank).unwrap();
                assert!(sq.is_playable());
                assert_eq!(sq.coordinate(), Some((file, rank)));
            }
        }
        assert!(Square::from_coordinate(8, 0).is_none());
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(Square::parse("a1").unwrap(), Square(A1));
        assert_eq!(Square::parse("e2").unwrap(), Square(85));
        assert_eq!(Square::parse("h8").unwrap(), Square(H8));
        assert!(Square::parse("i1").is_err());
        assert!(Square::parse("e9").is_err());
        assert!(Square::parse("e22").is_err());
        assert!(Square::parse("").is_err());
    }

    #[test]
    fn test_mirror() {
        assert_eq!(Square(A1).mirror(), Square(H8));
        assert_eq!(Square(H1).mirror(), Square(A8));
        assert_eq!(Square(85).mirror().mirror(), Square(85));
    }

    #[test]
    fn test_knight_hops_are_distinct() {
        let mut hops = KNIGHT_HOPS.to_vec();
        hops.sort();
        hops.dedup();
        assert_eq!(hops.len(), 8);
        assert!(PieceType::Knight.directions().iter().all(|d| d.abs() == 8 || d.abs() == 12 || d.abs() == 19 || d.abs() == 21));
    }
}
