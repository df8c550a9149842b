//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{WinningLine, BOARD_CELLS, WINNING_LINES};
use crate::error::RuleError;
use crate::mark::{Cell, Player};
use crate::outcome::GameOutcome;

/// 棋盘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// 3x3 棋盘，按行优先排列，索引为 row * 3 + col
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// 从格子数组创建
    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Self { cells }
    }

    /// 从字符串标记数组创建，如 `["X", "", "O", ...]`
    pub fn from_marks<S: AsRef<str>>(marks: &[S]) -> Result<Self, RuleError> {
        if marks.len() != BOARD_CELLS {
            return Err(RuleError::InvalidBoard {
                reason: format!("expected {} cells, got {}", BOARD_CELLS, marks.len()),
            });
        }

        let mut board = Self::empty();
        for (index, mark) in marks.iter().enumerate() {
            let mark = mark.as_ref();
            board.cells[index] = Cell::from_mark(mark).ok_or_else(|| RuleError::InvalidBoard {
                reason: format!("unknown mark {:?} at cell {}", mark, index),
            })?;
        }
        Ok(board)
    }

    /// 获取指定格子
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// 全部格子
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// 设置指定格子（不检查规则，越界时忽略）
    ///
    /// 供搜索引擎做“落子 / 撤销”使用。
    pub fn set(&mut self, index: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// 原地落子（检查越界与占用）
    pub fn place(&mut self, index: usize, player: Player) -> Result<(), RuleError> {
        match self.cells.get(index) {
            None => Err(RuleError::OutOfRange { index }),
            Some(Cell::Empty) => {
                self.cells[index] = player.cell();
                Ok(())
            }
            Some(occupied) => Err(RuleError::CellOccupied {
                index,
                occupant: occupied.player().unwrap_or(player),
            }),
        }
    }

    /// 落子并返回新棋盘，原棋盘不变
    pub fn apply_move(&self, index: usize, player: Player) -> Result<Board, RuleError> {
        let mut next = *self;
        next.place(index, player)?;
        Ok(next)
    }

    /// 检查某方是否连成一线
    pub fn check_win(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// 某方第一条完成的连线
    pub fn winning_line(&self, player: Player) -> Option<WinningLine> {
        let mark = player.cell();
        WINNING_LINES
            .iter()
            .find(|line| line.iter().all(|&i| self.cells[i] == mark))
            .copied()
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// 所有空格索引（升序）
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// 统计某种格子的数量
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// 判定局面：先查 X 胜，再查 O 胜，再查满盘
    ///
    /// 双方同时连线的局面不可能由合法对局产生，此时返回 X 胜。
    pub fn evaluate(&self) -> GameOutcome {
        if self.check_win(Player::X) {
            GameOutcome::Win(Player::X)
        } else if self.check_win(Player::O) {
            GameOutcome::Win(Player::O)
        } else if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::Ongoing
        }
    }

    /// 三进制编码（空=0，X=1，O=2），每个局面对应唯一的键
    pub fn key(&self) -> u32 {
        self.cells.iter().rev().fold(0u32, |acc, cell| {
            let digit = match cell {
                Cell::Empty => 0,
                Cell::X => 1,
                Cell::O => 2,
            };
            acc * 3 + digit
        })
    }
}
