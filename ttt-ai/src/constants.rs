//! 搜索常量

/// 获胜分值（O 胜为正，X 胜为负）
pub const WIN_SCORE: i32 = 10;

/// 和棋分值
pub const DRAW_SCORE: i32 = 0;
