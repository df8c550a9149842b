//! 格子与玩家定义

use std::fmt;

use serde::{Deserialize, Serialize};

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// X（先手）
    X,
    /// O（后手）
    O,
}

impl Player {
    /// 获取对手
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// 该玩家在棋盘上的标记
    pub fn cell(&self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// 显示符号
    pub fn symbol(&self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }

    /// 从字符解析（不区分大小写）
    pub fn from_char(c: char) -> Option<Player> {
        match c {
            'x' | 'X' => Some(Player::X),
            'o' | 'O' => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// 空
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// 格子上的玩家（空格为 None）
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    /// 紧凑文本字符：`X`、`O`、`.`
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// 从紧凑文本字符解析
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' | '_' | ' ' => Some(Cell::Empty),
            _ => Player::from_char(c).map(|p| p.cell()),
        }
    }

    /// 从字符串标记解析（`""`、`"X"`、`"O"`）
    pub fn from_mark(mark: &str) -> Option<Cell> {
        match mark.trim() {
            "" => Some(Cell::Empty),
            "X" | "x" => Some(Cell::X),
            "O" | "o" => Some(Cell::O),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.cell()
    }
}
