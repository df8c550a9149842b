//! 走法定义与生成

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::mark::Player;

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 目标格子索引（0..=8）
    pub index: usize,
    /// 落子方
    pub player: Player,
}

impl Move {
    pub fn new(index: usize, player: Player) -> Self {
        Self { index, player }
    }

    /// 走法是否合法：目标为空格且局面未终结
    pub fn is_legal(&self, board: &Board) -> bool {
        !board.evaluate().is_terminal()
            && board.get(self.index).is_some_and(|cell| cell.is_empty())
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成某方全部合法走法（按格子索引升序），终局时为空
    pub fn generate_legal(board: &Board, player: Player) -> Vec<Move> {
        if board.evaluate().is_terminal() {
            return Vec::new();
        }
        board
            .empty_indices()
            .into_iter()
            .map(|index| Move::new(index, player))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_initial() {
        let moves = MoveGenerator::generate_legal(&Board::empty(), Player::X);
        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0], Move::new(0, Player::X));
        assert_eq!(moves[8], Move::new(8, Player::X));
    }

    #[test]
    fn test_no_moves_after_win() {
        let board = Board::from_marks(&["O", "O", "O", "X", "X", "", "X", "", ""]).unwrap();
        assert!(MoveGenerator::generate_legal(&board, Player::X).is_empty());
        assert!(!Move::new(5, Player::X).is_legal(&board));
    }

    #[test]
    fn test_is_legal() {
        let board = Board::from_marks(&["X", "", "", "", "O", "", "", "", ""]).unwrap();
        assert!(Move::new(1, Player::X).is_legal(&board));
        assert!(!Move::new(4, Player::X).is_legal(&board));
        assert!(!Move::new(12, Player::X).is_legal(&board));
    }
}
