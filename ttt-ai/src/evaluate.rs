//! 终局评估函数

use ttt_rules::{Board, Player};

use crate::constants::{DRAW_SCORE, WIN_SCORE};

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 终局分值（O 视角）：X 连线 -10，O 连线 +10，满盘 0，未终局 None
    ///
    /// 分值不随深度调整。
    pub fn terminal_score(board: &Board) -> Option<i32> {
        if board.check_win(Player::X) {
            Some(-WIN_SCORE)
        } else if board.check_win(Player::O) {
            Some(WIN_SCORE)
        } else if board.is_full() {
            Some(DRAW_SCORE)
        } else {
            None
        }
    }

    /// 某方是否为最大化方（O）
    pub fn is_maximizing(player: Player) -> bool {
        player == Player::O
    }
}
