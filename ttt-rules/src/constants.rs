//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIDE: usize = 3;

/// 棋盘格子总数
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

/// 一条获胜连线
pub type WinningLine = [usize; 3];

/// 全部 8 条获胜连线：3 行、3 列、2 条对角线
pub const WINNING_LINES: [WinningLine; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";
