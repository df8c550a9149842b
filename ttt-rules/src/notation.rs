//! 格子命名与棋盘文本格式
//!
//! 格子名：列字母 + 行号，行号从上往下数
//!
//! ```text
//! a1 b1 c1      0 1 2
//! a2 b2 c2  =>  3 4 5
//! a3 b3 c3      6 7 8
//! ```
//!
//! 棋盘文本：9 个字符，`X`/`O`/`.`，按行优先排列，如 `XO..X...O`

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::constants::{BOARD_CELLS, BOARD_SIDE};
use crate::error::RuleError;
use crate::mark::Cell;
use crate::moves::Move;

const COLUMNS: [char; BOARD_SIDE] = ['a', 'b', 'c'];

/// 格子表示法
pub struct Notation;

impl Notation {
    /// 格子索引转名称，如 4 -> "b2"
    pub fn cell_name(index: usize) -> Option<String> {
        if index >= BOARD_CELLS {
            return None;
        }
        let col = COLUMNS[index % BOARD_SIDE];
        let row = index / BOARD_SIDE + 1;
        Some(format!("{}{}", col, row))
    }

    /// 走法表示，如 "X b2"
    pub fn move_name(mv: &Move) -> String {
        match Self::cell_name(mv.index) {
            Some(name) => format!("{} {}", mv.player, name),
            None => format!("{} #{}", mv.player, mv.index),
        }
    }

    /// 解析格子：接受 "b2" 形式或 1 起始的数字 "1".."9"
    pub fn parse_cell(input: &str) -> Result<usize, RuleError> {
        let trimmed = input.trim();
        let invalid = || RuleError::InvalidCell {
            input: input.to_string(),
        };

        if let Ok(n) = trimmed.parse::<usize>() {
            return if (1..=BOARD_CELLS).contains(&n) {
                Ok(n - 1)
            } else {
                Err(invalid())
            };
        }

        let mut chars = trimmed.chars();
        let (Some(col), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let col = COLUMNS
            .iter()
            .position(|&c| c == col.to_ascii_lowercase())
            .ok_or_else(invalid)?;
        let row = row
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|d| (1..=BOARD_SIDE).contains(d))
            .ok_or_else(invalid)?;

        Ok((row - 1) * BOARD_SIDE + col)
    }

    /// 多行文本渲染，空格显示格子编号（1..9）
    pub fn render(board: &Board) -> String {
        let mut output = String::new();
        for row in 0..BOARD_SIDE {
            let line: Vec<String> = (0..BOARD_SIDE)
                .map(|col| {
                    let index = row * BOARD_SIDE + col;
                    match board.cells()[index].player() {
                        Some(player) => player.symbol().to_string(),
                        None => (index + 1).to_string(),
                    }
                })
                .collect();
            output.push_str(&format!(" {}\n", line.join(" | ")));
            if row + 1 < BOARD_SIDE {
                output.push_str("---+---+---\n");
            }
        }
        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells() {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = RuleError;

    /// 解析棋盘文本，忽略空白与 `/` 分隔符
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != BOARD_CELLS {
            return Err(RuleError::InvalidBoard {
                reason: format!("expected {} cells, got {}", BOARD_CELLS, chars.len()),
            });
        }

        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (index, c) in chars.into_iter().enumerate() {
            cells[index] = Cell::from_char(c).ok_or_else(|| RuleError::InvalidBoard {
                reason: format!("unknown character {:?} at cell {}", c, index),
            })?;
        }
        Ok(Board::from_cells(cells))
    }
}
