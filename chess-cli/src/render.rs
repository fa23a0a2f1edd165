//! 文本渲染
//!
//! 引擎内部总是以走子方视角记录局面，这里负责换回白方视角再输出。

use chess_core::{coordinate_of, Move, Player, Square, State};

/// 格子的代数记号，如 "e4"；边框格输出原始下标
pub fn square_name(square: Square) -> String {
    match coordinate_of(square) {
        Some((file, rank)) => format!("{}{}", (b'a' + file) as char, rank + 1),
        None => format!("#{}", square.0),
    }
}

/// 把走子方视角下的走法换回棋盘上的实际格子
pub fn board_move(mv: Move, mover: Player) -> Move {
    match mover {
        Player::White => mv,
        Player::Black => mv.mirrored(),
    }
}

/// 走法的坐标记号，如 "e2e4"
pub fn move_notation(mv: Move, mover: Player) -> String {
    let mv = board_move(mv, mover);
    format!("{}{}", square_name(mv.from), square_name(mv.to))
}

/// 白方视角的局面
pub fn white_view(state: &State) -> State {
    match state.turn {
        Player::White => state.clone(),
        Player::Black => state.rotate(),
    }
}

/// 白方在下的棋盘图，大写为白子，空格用 '.'
pub fn board_diagram(state: &State) -> String {
    let view = white_view(state);
    let mut lines = Vec::with_capacity(9);

    for rank in (0..8u8).rev() {
        let mut line = format!("{} ", rank + 1);
        for file in 0..8u8 {
            let symbol = Square::from_coordinate(file, rank)
                .and_then(|sq| view.cell(sq).piece())
                .map(|piece| piece.to_fen_char())
                .unwrap_or('.');
            line.push(' ');
            line.push(symbol);
        }
        lines.push(line);
    }
    lines.push("   a b c d e f g h".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::MoveGenerator;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn test_square_name() {
        assert_eq!(square_name(sq("a1")), "a1");
        assert_eq!(square_name(sq("h8")), "h8");
        assert_eq!(square_name(Square(0)), "#0");
    }

    #[test]
    fn test_white_move_is_unchanged() {
        let mv = Move::new(sq("e2"), sq("e4"));
        assert_eq!(move_notation(mv, Player::White), "e2e4");
    }

    #[test]
    fn test_black_move_is_mirrored_back() {
        let state = State::initial().successor(Move::new(sq("e2"), sq("e4")));
        assert_eq!(state.turn, Player::Black);

        // 黑方 e7 兵在其标准化视角下位于 e7 的镜像格
        let canonical = Move::new(sq("e7").mirror(), sq("e5").mirror());
        assert!(MoveGenerator::moves(&state).any(|m| m == canonical));
        assert_eq!(move_notation(canonical, Player::Black), "e7e5");
    }

    #[test]
    fn test_initial_diagram() {
        let diagram = board_diagram(&State::initial());
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[6], "2  P P P P P P P P");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }

    #[test]
    fn test_diagram_after_black_turn_is_white_side_down() {
        let state = State::initial().successor(Move::new(sq("e2"), sq("e4")));
        let diagram = board_diagram(&state);
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[4], "4  . . . . P . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
    }
}
