//! 错误类型定义

use thiserror::Error;

/// AI 搜索错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiError {
    /// 没有可走的格子：调用方在终局上请求走法
    #[error("No legal move: the board is already terminal")]
    NoLegalMove,
}
