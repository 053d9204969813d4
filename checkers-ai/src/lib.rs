//! 跳棋 AI 引擎
//!
//! 包含:
//! - 局面评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 按时间预算自适应选择搜索深度
//! - Zobrist 哈希
//! - 置换表
//! - 后台搜索任务

mod calibrate;
mod config;
mod error;
mod evaluate;
mod search;
mod task;
mod transposition;
mod zobrist;

pub use calibrate::{DepthCalibrator, MAX_SAMPLES};
pub use config::{
    AiConfig, Difficulty, DEFAULT_MAXIMUM_DEPTH, DEFAULT_MINIMUM_DEPTH, DEFAULT_SEARCH_DEPTH,
    DEFAULT_TIME_BUDGET_MS,
};
pub use error::{AiError, Result};
pub use evaluate::{Evaluator, EDGE_BONUS, KING_VALUE, MAN_VALUE, WIN_SCORE};
pub use search::{choose_move, AiEngine, SearchResult};
pub use task::{BackgroundSearch, SearchOutcome};
pub use transposition::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
