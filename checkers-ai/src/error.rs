//! AI 错误类型

use checkers_rules::{CheckersError, Side};
use thiserror::Error;

/// AI 搜索错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiError {
    /// 搜索配置不合法（在搜索开始前拒绝）
    #[error("Invalid search configuration: {reason}")]
    InvalidConfig { reason: String },

    /// 请求的阵营不是当前走子方
    #[error("Side {actual} is not to move, expected {expected}")]
    NotSideToMove { expected: Side, actual: Side },

    /// 规则错误
    #[error("Rules error: {0}")]
    Rules(#[from] CheckersError),
}

/// AI 操作结果类型
pub type Result<T> = std::result::Result<T, AiError>;
