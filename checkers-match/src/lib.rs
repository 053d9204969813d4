//! 跳棋自我对局工具
//!
//! 包含:
//! - 对局参与者（电脑引擎、随机走子、一味向前）
//! - 对局控制和结果统计

pub mod opponent;
pub mod runner;

pub use opponent::{AdvanceOpponent, ComputerOpponent, Opponent, RandomOpponent};
pub use runner::{MatchOutcome, MatchReport, MatchRunner, Tally, DEFAULT_MAX_PLIES};
