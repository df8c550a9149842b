//! 井字棋规则引擎
//!
//! 包含:
//! - 格子、玩家、棋盘等核心数据结构
//! - 落子、连线检测、满盘与终局判定
//! - 格子命名与棋盘文本格式
//! - 对局记录（JSON）

mod board;
mod constants;
mod error;
mod mark;
mod moves;
mod notation;
mod outcome;
mod record;
pub mod rules;

pub use board::Board;
pub use constants::*;
pub use error::{GameError, Result, RuleError};
pub use mark::{Cell, Player};
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use outcome::GameOutcome;
pub use record::{GameMetadata, GameRecord, MoveRecord};
pub use rules::{apply_move, check_win, evaluate, is_full, winning_line};
