//! 棋局状态
//!
//! `State` 是不可变值：每一步都从父局面派生出新的局面，派生结果总是
//! 旋转到“走子方在下方、大写、向北走”的标准化视角，走法生成与估值因此
//! 只需要一套方向表和一套符号约定。

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::{A1, A8, BOARD_SIZE, H1, H8, N, ROW_WIDTH, S};
use crate::error::{ChessError, Result};
use crate::evaluate::Evaluator;
use crate::moves::Move;
use crate::piece::{Cell, Piece, PieceType, Player, Side, Square};
use crate::tables::piece_square;

/// 易位权（标准化视角下 A1 / H1 两个车）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    /// A1 车一侧
    pub a_side: bool,
    /// H1 车一侧
    pub h_side: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        a_side: false,
        h_side: false,
    };

    pub const BOTH: CastlingRights = CastlingRights {
        a_side: true,
        h_side: true,
    };
}

/// 完整的棋局状态
#[derive(Debug, Clone)]
pub struct State {
    board: [Cell; BOARD_SIZE],
    /// 局面评估分（白方视角，正值对白方有利）
    pub score: i32,
    /// 走子方的易位权
    pub castling: CastlingRights,
    /// 对方的易位权
    pub opponent_castling: CastlingRights,
    /// 吃过路兵的目标格
    pub en_passant: Option<Square>,
    /// 王易位经过的格（车落点）
    pub king_passant: Option<Square>,
    /// 当前走子方
    pub turn: Player,
}

// 分数由其余字段推导而来，不参与相等与哈希
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.castling == other.castling
            && self.opponent_castling == other.opponent_castling
            && self.en_passant == other.en_passant
            && self.king_passant == other.king_passant
            && self.turn == other.turn
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.castling.hash(state);
        self.opponent_castling.hash(state);
        self.en_passant.hash(state);
        self.king_passant.hash(state);
        self.turn.hash(state);
    }
}

impl State {
    /// 只有边框的空棋盘
    pub fn empty_board() -> [Cell; BOARD_SIZE] {
        let mut board = [Cell::OffBoard; BOARD_SIZE];
        for (index, cell) in board.iter_mut().enumerate() {
            if Square(index as u8).is_playable() {
                *cell = Cell::Empty;
            }
        }
        board
    }

    /// 由棋盘和附加字段构造，分数按完整评估计算
    pub fn from_parts(
        board: [Cell; BOARD_SIZE],
        castling: CastlingRights,
        opponent_castling: CastlingRights,
        en_passant: Option<Square>,
        turn: Player,
    ) -> Self {
        let mut state = Self {
            board,
            score: 0,
            castling,
            opponent_castling,
            en_passant,
            king_passant: None,
            turn,
        };
        state.score = Evaluator::evaluate(&state);
        state
    }

    /// 创建初始局面（白方先走，双方完整易位权）
    pub fn initial() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut board = Self::empty_board();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let home = A1 as usize + file;
            let far = A8 as usize + file;
            board[home] = Cell::Occupied(Piece::mover(*kind));
            board[home - ROW_WIDTH] = Cell::Occupied(Piece::mover(PieceType::Pawn));
            board[far + ROW_WIDTH] = Cell::Occupied(Piece::opponent(PieceType::Pawn));
            board[far] = Cell::Occupied(Piece::opponent(*kind));
        }

        Self::from_parts(
            board,
            CastlingRights::BOTH,
            CastlingRights::BOTH,
            None,
            Player::White,
        )
    }

    /// 获取指定格
    pub fn cell(&self, square: Square) -> Cell {
        self.board[square.index()]
    }

    /// 整个棋盘（含边框）
    pub fn board(&self) -> &[Cell; BOARD_SIZE] {
        &self.board
    }

    /// 所有棋子及其位置
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.piece().map(|p| (Square(index as u8), p)))
    }

    /// 棋盘上王的数量（双方合计）
    pub fn king_count(&self) -> usize {
        self.pieces()
            .filter(|(_, p)| p.piece_type == PieceType::King)
            .count()
    }

    /// 旋转 180 度并交换双方，得到对方视角的局面
    pub fn rotate(&self) -> State {
        let mut board = [Cell::OffBoard; BOARD_SIZE];
        for (index, cell) in self.board.iter().enumerate() {
            board[BOARD_SIZE - 1 - index] = cell.flipped();
        }
        State {
            board,
            score: -self.score,
            castling: self.opponent_castling,
            opponent_castling: self.castling,
            en_passant: self.en_passant.map(|sq| sq.mirror()),
            king_passant: self.king_passant.map(|sq| sq.mirror()),
            turn: self.turn.opponent(),
        }
    }

    /// 走一步棋（检查起点是否为走子方棋子）
    pub fn apply(&self, mv: Move) -> Result<State> {
        let reason = match self.cell(mv.from) {
            Cell::Occupied(piece) if piece.side == Side::Mover => None,
            Cell::Occupied(_) => Some("source holds an opponent piece"),
            _ => Some("source square is empty"),
        };
        if let Some(reason) = reason {
            return Err(ChessError::IllegalMove {
                from: mv.from.0,
                to: mv.to.0,
                reason,
            });
        }
        Ok(self.successor(mv))
    }

    /// 走一步棋，不做检查
    ///
    /// 走法应来自 [`crate::MoveGenerator`]。返回的局面已旋转到对方视角，
    /// 分数为完整重新评估的结果。
    pub fn successor(&self, mv: Move) -> State {
        let (i, j) = (mv.from, mv.to);
        let moved = self.cell(i);
        let captured = self.cell(j);

        let mut board = self.board;
        let mut castling = self.castling;
        let mut opponent_castling = self.opponent_castling;
        let mut en_passant = None;
        let mut king_passant = None;

        board[j.index()] = moved;
        board[i.index()] = Cell::Empty;

        // 易位权：己方车离开原位，或吃掉对方原位的车
        if i.0 == A1 {
            castling.a_side = false;
        }
        if i.0 == H1 {
            castling.h_side = false;
        }
        // 对方视角下 A8 是 H1，H8 是 A1
        if j.0 == A8 {
            opponent_castling.h_side = false;
        }
        if j.0 == H8 {
            opponent_castling.a_side = false;
        }

        if let Cell::Occupied(piece) = moved {
            match piece.piece_type {
                PieceType::King => {
                    castling = CastlingRights::NONE;
                    if (j.0 as i16 - i.0 as i16).abs() == 2 {
                        let crossed = Square((i.0 + j.0) / 2);
                        let rook_origin = if j < i { A1 } else { H1 };
                        board[rook_origin as usize] = Cell::Empty;
                        board[crossed.index()] = Cell::Occupied(Piece::mover(PieceType::Rook));
                        king_passant = Some(crossed);
                    }
                }
                PieceType::Pawn => {
                    if (A8..=H8).contains(&j.0) {
                        board[j.index()] = Cell::Occupied(Piece::mover(PieceType::Queen));
                    }
                    let delta = j.0 as i16 - i.0 as i16;
                    if delta == (2 * N) as i16 {
                        en_passant = Some(i.offset(N));
                    }
                    if Some(j) == self.en_passant && captured.is_empty() {
                        board[j.offset(S).index()] = Cell::Empty;
                    }
                }
                _ => {}
            }
        }

        let mut next = State {
            board,
            score: self.score,
            castling,
            opponent_castling,
            en_passant,
            king_passant,
            turn: self.turn,
        }
        .rotate();
        next.score = Evaluator::evaluate(&next);
        next
    }

    /// 走法的增量估值（仅用于排序）
    pub fn value(&self, mv: Move) -> i32 {
        let (i, j) = (mv.from, mv.to);
        let Some(piece) = self.cell(i).piece() else {
            return 0;
        };
        let kind = piece.piece_type;

        let mut score = piece_square(kind, j.index()) - piece_square(kind, i.index());

        // 吃子：按对方视角读取位置分
        if let Cell::Occupied(target) = self.cell(j) {
            if target.side == Side::Opponent {
                score += piece_square(target.piece_type, j.mirror().index());
            }
        }

        // 走到对方易位经过的格附近，视为吃王
        if let Some(kp) = self.king_passant {
            if (j.0 as i16 - kp.0 as i16).abs() < 2 {
                score += piece_square(PieceType::King, j.index());
            }
        }

        if kind == PieceType::King && (i.0 as i16 - j.0 as i16).abs() == 2 {
            let rook_origin = if j < i { A1 } else { H1 };
            score += piece_square(PieceType::Rook, ((i.0 + j.0) / 2) as usize);
            score -= piece_square(PieceType::Rook, rook_origin as usize);
        }

        if kind == PieceType::Pawn {
            if (A8..=H8).contains(&j.0) {
                score += piece_square(PieceType::Queen, j.index()) - piece_square(PieceType::Pawn, j.index());
            }
            if Some(j) == self.en_passant {
                score += piece_square(PieceType::Pawn, j.offset(S).mirror().index());
            }
        }

        score
    }
}

impl Default for State {
    fn default() -> Self {
        Self::initial()
    }
}

/// 创建新对局
pub fn new_game() -> State {
    State::initial()
}

/// 走一步棋
pub fn apply_move(state: &State, mv: Move) -> Result<State> {
    state.apply(mv)
}
