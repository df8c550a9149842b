//! 井字棋 AI 引擎
//!
//! 包含:
//! - 终局评估
//! - 穷举 Minimax 搜索
//! - 可选 Alpha-Beta 剪枝
//! - 置换表

mod constants;
mod error;
mod evaluate;
mod search;
mod transposition;

pub use constants::{DRAW_SCORE, WIN_SCORE};
pub use error::AiError;
pub use evaluate::Evaluator;
pub use search::{best_move, AiConfig, AiEngine, SearchResult};
pub use transposition::{TTStats, TranspositionTable};
