//! 搜索引擎
//!
//! 穷举 Minimax：O 为最大化方，X 为最小化方。
//! 可选 Alpha-Beta 剪枝与置换表，二者都不改变选出的走法与分值。

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ttt_rules::{Board, Cell, MoveGenerator, Player};

use crate::error::AiError;
use crate::evaluate::Evaluator;
use crate::transposition::{TTStats, TranspositionTable};

/// AI 配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// 启用 Alpha-Beta 剪枝
    pub alpha_beta: bool,
    /// 启用置换表（只缓存精确分值）
    pub transposition: bool,
}

impl AiConfig {
    /// 不剪枝、不缓存的完整搜索
    pub fn exhaustive() -> Self {
        Self {
            alpha_beta: false,
            transposition: false,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            alpha_beta: true,
            transposition: true,
        }
    }
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 最佳格子索引
    pub index: usize,
    /// 该走法的分值（O 视角）
    pub score: i32,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
    table: TranspositionTable,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
            table: TranspositionTable::new(),
        }
    }

    pub fn config(&self) -> AiConfig {
        self.config
    }

    /// 搜索最佳走法
    ///
    /// 在棋盘副本上做“落子 / 撤销”，调用方的棋盘不会被修改。
    /// 同分时取索引最小的走法。
    ///
    /// 终局棋盘不选走法：满盘或已有一方连成线（即使仍有空格）都返回
    /// `AiError::NoLegalMove`。
    pub fn best_move(&mut self, board: &Board, to_move: Player) -> Result<SearchResult, AiError> {
        self.nodes_searched = 0;
        let started = Instant::now();

        if Evaluator::terminal_score(board).is_some() {
            return Err(AiError::NoLegalMove);
        }

        let mut scratch = *board;
        let result = self.search_root(&mut scratch, to_move);
        debug_assert_eq!(scratch, *board, "search must restore the board");

        let result = result.ok_or(AiError::NoLegalMove)?;
        debug!(
            "search {} for {}: cell {} score {} ({} nodes, {:?})",
            board,
            to_move,
            result.index,
            result.score,
            self.nodes_searched,
            started.elapsed()
        );
        Ok(result)
    }

    /// 根节点：枚举所有空格，记录每个走法的分值
    fn search_root(&mut self, board: &mut Board, to_move: Player) -> Option<SearchResult> {
        let maximizing = Evaluator::is_maximizing(to_move);
        let mut best: Option<SearchResult> = None;

        for mv in MoveGenerator::generate_legal(board, to_move) {
            let index = mv.index;
            let (alpha, beta) = self.root_window(maximizing, best.map(|b| b.score));

            board.set(index, mv.player.cell());
            let score = self.minimax(board, to_move.opponent(), alpha, beta);
            board.set(index, Cell::Empty);

            let better = match best {
                None => true,
                Some(current) if maximizing => score > current.score,
                Some(current) => score < current.score,
            };
            if better {
                best = Some(SearchResult { index, score });
            }
        }

        best
    }

    /// 根节点子搜索的窗口：已有最佳分值时，只需知道子节点是否严格更优
    fn root_window(&self, maximizing: bool, best_score: Option<i32>) -> (i32, i32) {
        match best_score {
            Some(score) if self.config.alpha_beta => {
                if maximizing {
                    (score, i32::MAX)
                } else {
                    (i32::MIN, score)
                }
            }
            _ => (i32::MIN, i32::MAX),
        }
    }

    /// Minimax 递归（fail-soft Alpha-Beta）
    fn minimax(&mut self, board: &mut Board, to_move: Player, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes_searched += 1;

        if let Some(score) = Evaluator::terminal_score(board) {
            return score;
        }

        if self.config.transposition {
            if let Some(score) = self.table.probe(board, to_move) {
                return score;
            }
        }

        let (alpha_before, beta_before) = (alpha, beta);
        let maximizing = Evaluator::is_maximizing(to_move);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in MoveGenerator::generate_legal(board, to_move) {
            board.set(mv.index, mv.player.cell());
            let score = self.minimax(board, to_move.opponent(), alpha, beta);
            board.set(mv.index, Cell::Empty);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if self.config.alpha_beta && alpha >= beta {
                break;
            }
        }

        // 剪枝后的分值只是边界，不能当作精确值缓存
        let exact = !self.config.alpha_beta || (alpha_before < best && best < beta_before);
        if self.config.transposition && exact {
            self.table.store(board, to_move, best);
        }

        best
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 置换表统计
    pub fn cache_stats(&self) -> TTStats {
        self.table.stats()
    }

    /// 清空置换表
    pub fn clear_cache(&mut self) {
        self.table.clear();
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

/// 用默认配置搜索最佳走法
pub fn best_move(board: &Board, to_move: Player) -> Result<SearchResult, AiError> {
    AiEngine::default().best_move(board, to_move)
}
