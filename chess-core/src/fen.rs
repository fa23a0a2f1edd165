//! FEN 格式解析和生成
//!
//! 只处理前四个字段：`<棋盘> <走子方> <易位权> <过路兵格>`，其余字段忽略。
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -`

use crate::board::{CastlingRights, State};
use crate::constants::BOARD_SIZE;
use crate::error::{ChessError, Result};
use crate::evaluate::Evaluator;
use crate::piece::{Cell, Piece, Player, Square};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

/// 简化残局：白王 h8、白兵 c6 对黑王 a6、黑兵 h5
pub const ENDGAME_FEN: &str = "7K/8/k1P5/7p/8/8/8/8 w - -";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为标准化视角的局面
    pub fn parse(fen: &str) -> Result<State> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }

        let board = Self::parse_board(parts[0])?;

        // 走子方（默认白方）
        let turn = match parts.get(1) {
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next().and_then(Player::from_fen_char), chars.next()) {
                    (Some(player), None) => player,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", s),
                        })
                    }
                }
            }
            None => Player::White,
        };

        let (white, black) = Self::parse_castling(parts.get(2).copied().unwrap_or("-"))?;

        // 过路兵格（白方视角）
        let en_passant = match parts.get(3).copied() {
            None | Some("-") => None,
            Some(name) => Some(Square::parse(name).map_err(|_| ChessError::InvalidFen {
                reason: format!("Invalid en passant square: {}", name),
            })?),
        };

        // 先按白方视角构造，再按需旋转到黑方视角
        let white_view = State::from_parts(board, white, black, en_passant, Player::White);
        let state = match turn {
            Player::White => white_view,
            Player::Black => {
                let mut rotated = white_view.rotate();
                rotated.score = Evaluator::evaluate(&rotated);
                rotated
            }
        };
        Ok(state)
    }

    /// 解析棋盘部分（白方视角，大写为白方）
    fn parse_board(board_str: &str) -> Result<[Cell; BOARD_SIZE]> {
        let mut board = State::empty_board();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != 8 {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected 8 rows, got {}", rows.len()),
            });
        }

        // FEN 从第八横线写到第一横线
        for (row_idx, row) in rows.iter().enumerate() {
            let rank = 7 - row_idx as u8;
            let mut file = 0u8;

            for c in row.chars() {
                if file >= 8 {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    file += empty_count as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if let Some(sq) = Square::from_coordinate(file, rank) {
                        board[sq.index()] = Cell::Occupied(piece);
                    }
                    file += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if file != 8 {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected 8", row_idx, file),
                });
            }
        }

        Ok(board)
    }

    /// 解析易位权，返回（白方，黑方）
    ///
    /// 黑方在自己的标准化视角下，h8 车位于 A1，a8 车位于 H1。
    fn parse_castling(field: &str) -> Result<(CastlingRights, CastlingRights)> {
        let mut white = CastlingRights::NONE;
        let mut black = CastlingRights::NONE;
        if field == "-" {
            return Ok((white, black));
        }
        for c in field.chars() {
            match c {
                'K' => white.h_side = true,
                'Q' => white.a_side = true,
                'k' => black.a_side = true,
                'q' => black.h_side = true,
                _ => {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid castling character: {}", c),
                    })
                }
            }
        }
        Ok((white, black))
    }

    /// 将局面转换为 FEN 字符串（总是以白方视角书写）
    pub fn to_string(state: &State) -> String {
        let white_view = match state.turn {
            Player::White => state.clone(),
            Player::Black => state.rotate(),
        };
        let (white, black) = (white_view.castling, white_view.opponent_castling);

        let mut castling = String::new();
        if white.h_side {
            castling.push('K');
        }
        if white.a_side {
            castling.push('Q');
        }
        if black.a_side {
            castling.push('k');
        }
        if black.h_side {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = white_view
            .en_passant
            .and_then(|sq| sq.coordinate())
            .map(|(file, rank)| format!("{}{}", (b'a' + file) as char, rank + 1))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {}",
            Self::board_to_string(&white_view),
            state.turn.to_fen_char(),
            castling,
            en_passant
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分（传入白方视角的局面）
    pub fn board_to_string(white_view: &State) -> String {
        let mut rows = Vec::with_capacity(8);

        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for file in 0..8 {
                let piece = Square::from_coordinate(file, rank).and_then(|sq| white_view.cell(sq).piece());
                if let Some(piece) = piece {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    // 白方视角下白子即走子方（大写）
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }

    /// 解析初始局面
    pub fn initial() -> Result<State> {
        Self::parse(INITIAL_FEN)
    }
}
