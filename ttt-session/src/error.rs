//! 错误类型定义

use thiserror::Error;
use ttt_ai::AiError;
use ttt_rules::{Player, RuleError};

/// 会话错误
#[derive(Error, Debug)]
pub enum SessionError {
    /// 规则错误（非法走子、游戏已结束）
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// AI 搜索错误
    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    /// 当前轮到电脑，拒绝人类走子
    #[error("It is not a human player's turn ({0} is computer-controlled)")]
    NotHumanTurn(Player),

    /// 当前不是电脑的回合
    #[error("It is not the computer's turn ({0} is human-controlled or the game is over)")]
    NotComputerTurn(Player),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 后台任务失败
    #[error("Background task failed: {0}")]
    Task(String),
}

/// 会话操作结果类型
pub type Result<T> = std::result::Result<T, SessionError>;
