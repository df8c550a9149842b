//! 对局记录
//!
//! 仅在内存中保存当前对局的走法，可导出为 JSON

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::RECORD_VERSION;
use crate::error::{Result, RuleError};
use crate::mark::Player;
use crate::moves::Move;
use crate::notation::Notation;
use crate::outcome::GameOutcome;

/// 对局元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// X 方名称
    pub player_x: String,
    /// O 方名称
    pub player_o: String,
    /// 对局日期
    pub date: String,
    /// 对局结果
    pub outcome: Option<GameOutcome>,
}

/// 走法记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 格子索引
    pub index: usize,
    /// 落子方
    pub player: Player,
    /// 表示法，如 "X b2"
    pub notation: String,
    /// 走子时的 Unix 时间戳（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl MoveRecord {
    /// 创建新的走法记录
    pub fn new(mv: Move) -> Self {
        Self {
            index: mv.index,
            player: mv.player,
            notation: Notation::move_name(&mv),
            timestamp: None,
        }
    }

    /// 带当前时间戳创建
    pub fn now(mv: Move) -> Self {
        Self {
            timestamp: Some(Utc::now().timestamp_millis()),
            ..Self::new(mv)
        }
    }

    pub fn to_move(&self) -> Move {
        Move::new(self.index, self.player)
    }
}

/// 完整的对局记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 创建新的对局记录
    pub fn new(player_x: impl Into<String>, player_o: impl Into<String>) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                player_x: player_x.into(),
                player_o: player_o.into(),
                date: Utc::now().format("%Y-%m-%d").to_string(),
                outcome: None,
            },
            moves: Vec::new(),
        }
    }

    /// 添加走法
    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// 设置对局结果
    pub fn set_outcome(&mut self, outcome: GameOutcome) {
        self.metadata.outcome = Some(outcome);
    }

    /// 按顺序重放全部走法，返回最终棋盘
    ///
    /// 遇到第一个非法走法（越界、占用或终局后继续落子）即返回错误。
    pub fn replay(&self) -> std::result::Result<Board, RuleError> {
        let mut board = Board::empty();
        for record in &self.moves {
            if board.evaluate().is_terminal() {
                return Err(RuleError::GameOver);
            }
            board.place(record.index, record.player)?;
        }
        Ok(board)
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析，并重放校验走法
    pub fn from_json(json: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(json)?;
        record.replay()?;
        Ok(record)
    }
}
