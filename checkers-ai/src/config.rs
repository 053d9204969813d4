//! 搜索配置

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};

/// 默认搜索深度
pub const DEFAULT_SEARCH_DEPTH: u8 = 7;

/// 默认最小深度（自适应深度不会低于此值）
pub const DEFAULT_MINIMUM_DEPTH: u8 = 5;

/// 默认最大深度（自适应深度不会高于此值）
pub const DEFAULT_MAXIMUM_DEPTH: u8 = 16;

/// 困难难度的默认时间预算（毫秒）
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1500;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=3
    Easy,
    /// 中等：depth=5
    Medium,
    /// 困难：depth=7，按时间预算自适应调整深度
    Hard,
}

/// AI 配置
///
/// 所有配置都显式传入引擎，没有全局状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// 搜索层数；开启自适应时作为第一次搜索的深度
    pub search_depth: u8,
    /// 时间预算（毫秒），设置后根据历史耗时自适应选择深度
    pub time_budget_ms: Option<u64>,
    /// 自适应深度的下限
    pub minimum_depth: u8,
    /// 自适应深度的上限
    pub maximum_depth: u8,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                search_depth: 3,
                time_budget_ms: None,
                minimum_depth: 1,
                maximum_depth: DEFAULT_MAXIMUM_DEPTH,
            },
            Difficulty::Medium => Self {
                search_depth: 5,
                time_budget_ms: None,
                minimum_depth: 3,
                maximum_depth: DEFAULT_MAXIMUM_DEPTH,
            },
            Difficulty::Hard => Self {
                search_depth: DEFAULT_SEARCH_DEPTH,
                time_budget_ms: Some(DEFAULT_TIME_BUDGET_MS),
                minimum_depth: DEFAULT_MINIMUM_DEPTH,
                maximum_depth: DEFAULT_MAXIMUM_DEPTH,
            },
        }
    }

    /// 固定深度配置
    pub fn with_depth(depth: u8) -> Self {
        Self {
            search_depth: depth,
            minimum_depth: depth.min(DEFAULT_MINIMUM_DEPTH),
            ..Self::default()
        }
    }

    /// 时间预算
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// 检查配置，不合法的配置在搜索前被拒绝而不是被修正
    pub fn validate(&self) -> Result<()> {
        if self.search_depth == 0 {
            return Err(invalid("search_depth must be at least 1"));
        }
        if self.minimum_depth == 0 {
            return Err(invalid("minimum_depth must be at least 1"));
        }
        if self.minimum_depth > self.maximum_depth {
            return Err(invalid(format!(
                "minimum_depth {} exceeds maximum_depth {}",
                self.minimum_depth, self.maximum_depth
            )));
        }
        if self.search_depth > self.maximum_depth {
            return Err(invalid(format!(
                "search_depth {} exceeds maximum_depth {}",
                self.search_depth, self.maximum_depth
            )));
        }
        if self.time_budget_ms == Some(0) {
            return Err(invalid("time_budget_ms must be positive"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            time_budget_ms: None,
            minimum_depth: DEFAULT_MINIMUM_DEPTH,
            maximum_depth: DEFAULT_MAXIMUM_DEPTH,
        }
    }
}

fn invalid(reason: impl Into<String>) -> AiError {
    AiError::InvalidConfig {
        reason: reason.into(),
    }
}
