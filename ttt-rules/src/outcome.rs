//! 对局结果

use serde::{Deserialize, Serialize};

use crate::mark::Player;

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// 进行中
    Ongoing,
    /// 某方获胜
    Win(Player),
    /// 和棋（棋盘已满且无人连线）
    Draw,
}

impl GameOutcome {
    /// 是否为终局
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }

    /// 获胜方
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(*player),
            _ => None,
        }
    }
}

impl Default for GameOutcome {
    fn default() -> Self {
        GameOutcome::Ongoing
    }
}
