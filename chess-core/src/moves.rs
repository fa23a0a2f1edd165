//! 走法生成
//!
//! 生成的是伪合法走法：只遵守棋子走法和占位规则，王的安全只做近邻启发式
//! 检查，不处理牵制和闪击。

use serde::{Deserialize, Serialize};

use crate::board::State;
use crate::constants::{A1, BOARD_SIZE, E, H1, N, PAWN_HOME_FIRST, PAWN_HOME_LAST, S, W};
use crate::piece::{Cell, Piece, PieceType, Side, Square, KNIGHT_HOPS};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// 旋转 180 度后的走法（换到对方视角）
    pub fn mirrored(&self) -> Self {
        Self::new(self.from.mirror(), self.to.mirror())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from.0, self.to.0)
    }
}

const ROYAL_ORTHOGONAL: &[PieceType] = &[PieceType::Queen, PieceType::King, PieceType::Rook];
const ROYAL_FORWARD_DIAGONAL: &[PieceType] = &[
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Pawn,
];
const ROYAL_REAR_DIAGONAL: &[PieceType] = &[PieceType::Queen, PieceType::King, PieceType::Bishop];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 惰性生成走子方的所有伪合法走法，每次调用都重新遍历
    pub fn moves(state: &State) -> Moves<'_> {
        Moves {
            state,
            from: 0,
            dir: 0,
            cursor: None,
        }
    }

    /// 走法数量（机动性）
    pub fn count(state: &State) -> usize {
        Self::moves(state).count()
    }

    /// 王走到该格是否会被对方近邻棋子攻击（启发式）
    pub fn king_threatened(state: &State, to: Square) -> bool {
        let around = |d: i8, kinds: &[PieceType]| state.cell(to.offset(d)).is_opponent_any(kinds);

        [N, S, E, W].iter().any(|&d| around(d, ROYAL_ORTHOGONAL))
            || [N + W, N + E].iter().any(|&d| around(d, ROYAL_FORWARD_DIAGONAL))
            || [S + E, S + W].iter().any(|&d| around(d, ROYAL_REAR_DIAGONAL))
            || KNIGHT_HOPS.iter().any(|&d| around(d, &[PieceType::Knight]))
    }

    /// 判断射线上的一步：返回要产出的走法以及射线是否继续
    fn step(state: &State, from: Square, piece: Piece, d: i8, to: Square) -> Step {
        let target = state.cell(to);

        // 不出棋盘
        if target.is_off_board() {
            return Step::Stop;
        }

        // 易位：原位车的射线碰到己方王
        if let Cell::Occupied(Piece {
            piece_type: PieceType::King,
            side: Side::Mover,
        }) = target
        {
            if piece.piece_type == PieceType::Rook {
                if from.0 == A1 && state.castling.a_side {
                    return Step::Emit(Move::new(to, to.offset(2 * W)), false);
                }
                if from.0 == H1 && state.castling.h_side {
                    return Step::Emit(Move::new(to, to.offset(2 * E)), false);
                }
            }
        }

        // 不吃己方棋子
        if target.is_side(Side::Mover) {
            return Step::Stop;
        }

        if piece.piece_type == PieceType::King && Self::king_threatened(state, to) {
            return Step::Stop;
        }

        if piece.piece_type == PieceType::Pawn {
            let diagonal = d == N + W || d == N + E;
            if diagonal
                && target.is_empty()
                && Some(to) != state.en_passant
                && Some(to) != state.king_passant
            {
                return Step::Stop;
            }
            if (d == N || d == 2 * N) && !target.is_empty() {
                return Step::Stop;
            }
            if d == 2 * N
                && (!(PAWN_HOME_FIRST..=PAWN_HOME_LAST).contains(&from.0)
                    || !state.cell(from.offset(N)).is_empty())
            {
                return Step::Stop;
            }
        }

        // 滑行棋子在空格上继续，吃子后停止
        let slides = piece.piece_type.is_slider() && target.is_empty();
        Step::Emit(Move::new(from, to), slides)
    }
}

enum Step {
    Stop,
    Emit(Move, bool),
}

/// 惰性走法迭代器
pub struct Moves<'a> {
    state: &'a State,
    /// 当前棋子所在格
    from: usize,
    /// 当前方向下标
    dir: usize,
    /// 射线上最近一次到达的格
    cursor: Option<Square>,
}

impl Moves<'_> {
    fn next_direction(&mut self) {
        self.dir += 1;
        self.cursor = None;
    }

    fn next_square(&mut self) {
        self.from += 1;
        self.dir = 0;
        self.cursor = None;
    }
}

impl Iterator for Moves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while self.from < BOARD_SIZE {
            let from = Square(self.from as u8);
            let piece = match self.state.cell(from) {
                Cell::Occupied(piece) if piece.side == Side::Mover => piece,
                _ => {
                    self.next_square();
                    continue;
                }
            };

            let directions = piece.piece_type.directions();
            let Some(&d) = directions.get(self.dir) else {
                self.next_square();
                continue;
            };

            let to = self.cursor.unwrap_or(from).offset(d);
            match MoveGenerator::step(self.state, from, piece, d, to) {
                Step::Stop => self.next_direction(),
                Step::Emit(mv, slides) => {
                    if slides {
                        self.cursor = Some(to);
                    } else {
                        self.next_direction();
                    }
                    return Some(mv);
                }
            }
        }
        None
    }
}

/// 走子方的所有伪合法走法
pub fn legal_moves(state: &State) -> Moves<'_> {
    MoveGenerator::moves(state)
}
