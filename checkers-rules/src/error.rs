//! 错误类型定义

use thiserror::Error;

use crate::coord::Coord;

/// 跳棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckersError {
    /// 走法不在当前合法走法集合中
    #[error("Invalid move: from {from} to {to}")]
    InvalidMove { from: Coord, to: Coord },

    /// 坐标不是棋盘上的深色格
    #[error("Invalid coordinate: ({x}, {y})")]
    InvalidCoord { x: i8, y: i8 },

    /// 无效的棋盘图示
    #[error("Invalid board diagram: {reason}")]
    InvalidDiagram { reason: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, CheckersError>;
