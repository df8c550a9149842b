//! 错误类型定义

use thiserror::Error;

use crate::mark::Player;

/// 规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// 格子索引越界
    #[error("Illegal move: cell index {index} is out of range (0..=8)")]
    OutOfRange { index: usize },

    /// 格子已被占用
    #[error("Illegal move: cell {index} is already taken by {occupant}")]
    CellOccupied { index: usize, occupant: Player },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的棋盘文本
    #[error("Invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// 无效的格子名称
    #[error("Invalid cell name: {input:?}")]
    InvalidCell { input: String },
}

impl RuleError {
    /// 是否为非法走子（越界或占用）
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, RuleError::OutOfRange { .. } | RuleError::CellOccupied { .. })
    }
}

/// 对局记录错误
#[derive(Error, Debug)]
pub enum GameError {
    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 记录中的走法不合规则
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),
}

/// 操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
