//! 置换表
//!
//! 缓存已搜索局面的精确分值。井字棋局面总数只有 3^9 个，
//! 直接用棋盘三进制编码作下标，无需哈希与冲突校验。

use ttt_rules::{Board, Player};

/// 三进制编码的取值上界
const BOARD_KEYS: usize = 19_683;

/// 置换表
pub struct TranspositionTable {
    /// 条目数组，下标为 key * 2 + 走子方
    entries: Vec<Option<i8>>,
    /// 命中次数
    hits: u64,
    /// 查询次数
    probes: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            entries: vec![None; BOARD_KEYS * 2],
            hits: 0,
            probes: 0,
        }
    }

    #[inline]
    fn index(board: &Board, to_move: Player) -> usize {
        let side = match to_move {
            Player::X => 0,
            Player::O => 1,
        };
        board.key() as usize * 2 + side
    }

    /// 查询条目
    pub fn probe(&mut self, board: &Board, to_move: Player) -> Option<i32> {
        self.probes += 1;
        let score = self.entries[Self::index(board, to_move)].map(i32::from);
        if score.is_some() {
            self.hits += 1;
        }
        score
    }

    /// 存储精确分值
    pub fn store(&mut self, board: &Board, to_move: Player, score: i32) {
        let score = score.clamp(i8::MIN as i32, i8::MAX as i32) as i8;
        self.entries[Self::index(board, to_move)] = Some(score);
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.hits = 0;
        self.probes = 0;
    }

    /// 获取统计信息
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.entries.len(),
            used: self.entries.iter().filter(|e| e.is_some()).count(),
            hits: self.hits,
            probes: self.probes,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 置换表统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    pub entries: usize,
    pub used: usize,
    pub hits: u64,
    pub probes: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }

    pub fn usage(&self) -> f64 {
        self.used as f64 / self.entries as f64
    }
}
