//! 规则引擎对外接口
//!
//! 纯函数，不修改传入的棋盘

use crate::board::Board;
use crate::constants::WinningLine;
use crate::error::RuleError;
use crate::mark::Player;
use crate::outcome::GameOutcome;

/// 在 `index` 落子，返回新棋盘
///
/// 索引越界或格子非空时返回非法走子错误。
pub fn apply_move(board: &Board, index: usize, player: Player) -> Result<Board, RuleError> {
    board.apply_move(index, player)
}

/// 某方是否已连成一线
pub fn check_win(board: &Board, player: Player) -> bool {
    board.check_win(player)
}

/// 棋盘是否已满
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// 判定局面结果
pub fn evaluate(board: &Board) -> GameOutcome {
    board.evaluate()
}

/// 某方完成的连线（用于高亮）
pub fn winning_line(board: &Board, player: Player) -> Option<WinningLine> {
    board.winning_line(player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_complete_row() {
        let board = Board::from_marks(&["X", "X", "", "", "", "", "", "", ""]).unwrap();
        let board = apply_move(&board, 2, Player::X).unwrap();
        assert!(check_win(&board, Player::X));
        assert_eq!(evaluate(&board), GameOutcome::Win(Player::X));
        assert_eq!(winning_line(&board, Player::X), Some([0, 1, 2]));
    }

    #[test]
    fn test_scenario_draw() {
        let board = Board::from_marks(&["X", "O", "X", "O", "X", "O", "O", "X", "O"]).unwrap();
        assert!(is_full(&board));
        assert!(!check_win(&board, Player::X));
        assert!(!check_win(&board, Player::O));
        assert_eq!(evaluate(&board), GameOutcome::Draw);
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let board = Board::empty();
        let err = apply_move(&board, 42, Player::O).unwrap_err();
        assert!(err.is_illegal_move());
        assert!(!RuleError::GameOver.is_illegal_move());
    }
}
