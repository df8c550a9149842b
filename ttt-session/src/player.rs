//! 对局模式与操控方

use serde::{Deserialize, Serialize};
use ttt_rules::Player;

/// 操控方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// 人类玩家
    Human,
    /// 电脑
    Computer,
}

/// 对局模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameMode {
    /// 双人对战
    TwoPlayer,
    /// 人机对战，`computer` 为电脑执的一方
    VsComputer { computer: Player },
}

impl GameMode {
    /// 人机对战，电脑执 O
    pub fn vs_computer() -> Self {
        GameMode::VsComputer { computer: Player::O }
    }

    /// 电脑执的一方
    pub fn computer(&self) -> Option<Player> {
        match self {
            GameMode::TwoPlayer => None,
            GameMode::VsComputer { computer } => Some(*computer),
        }
    }

    /// 某方的操控方
    pub fn controller(&self, player: Player) -> Controller {
        if self.computer() == Some(player) {
            Controller::Computer
        } else {
            Controller::Human
        }
    }

    /// 对局记录中的玩家名称
    pub fn label(&self, player: Player) -> String {
        match self.controller(player) {
            Controller::Computer => "AI".to_string(),
            Controller::Human => format!("Player {}", player),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::TwoPlayer
    }
}
