//! 井字棋会话层
//!
//! 包含:
//! - 对局控制（权威棋盘、走子方、对局记录）
//! - 对局模式（双人 / 人机）
//! - 比分统计
//! - 事件广播与电脑“思考”延迟
//! - 配置加载

pub mod config;
pub mod error;
pub mod game;
pub mod player;
pub mod scoreboard;
pub mod session;

pub use config::{default_config_path, SessionConfig, DEFAULT_THINK_DELAY_MS};
pub use error::{Result, SessionError};
pub use game::{Game, MoveReport};
pub use player::{Controller, GameMode};
pub use scoreboard::Scoreboard;
pub use session::{Session, SessionEvent, SharedSession};
