//! 自适应搜索深度
//!
//! 把搜索耗时建模为 `t = a^depth`（毫秒），用最近几次搜索的 (深度, 耗时) 拟合 `a`，
//! 再反推时间预算内可以完成的最大深度。只决定下一次搜索的深度，不会中断正在进行的搜索。

use std::collections::VecDeque;
use std::time::Duration;

use tracing::debug;

use crate::config::AiConfig;

/// 参与拟合的样本数
pub const MAX_SAMPLES: usize = 5;

/// 耗时下限（毫秒），避免对极短耗时取对数
const MIN_SAMPLE_MS: f64 = 1.0;

/// 深度校准器
#[derive(Debug, Clone, Default)]
pub struct DepthCalibrator {
    samples: VecDeque<(u8, f64)>,
}

impl DepthCalibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次搜索的深度和耗时
    pub fn record(&mut self, depth: u8, elapsed: Duration) {
        if depth == 0 {
            return;
        }
        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        let millis = (elapsed.as_secs_f64() * 1000.0).max(MIN_SAMPLE_MS);
        self.samples.push_back((depth, millis));
    }

    /// 样本数
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 清空样本
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// 拟合的每层耗时增长因子 `a`
    ///
    /// 过原点最小二乘：`ln a = Σ d·ln t / Σ d²`。没有样本时为 None。
    pub fn growth_factor(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }

        let (numerator, denominator) = self
            .samples
            .iter()
            .fold((0.0, 0.0), |(num, den), &(depth, millis)| {
                let d = f64::from(depth);
                (num + d * millis.ln(), den + d * d)
            });

        Some((numerator / denominator).exp())
    }

    /// 按拟合结果估计搜索到 `depth` 层的耗时（毫秒）
    pub fn estimate_millis(&self, depth: u8) -> Option<f64> {
        self.growth_factor()
            .map(|factor| factor.powi(i32::from(depth)))
    }

    /// 推荐下一次搜索的深度
    ///
    /// 没有时间预算时固定使用 `search_depth`。有预算但无法拟合（没有样本、增长因子不大于 1）时
    /// 也使用 `search_depth`，结果限制在 `[minimum_depth, maximum_depth]` 之内。
    pub fn recommend(&self, config: &AiConfig) -> u8 {
        let Some(budget) = config.time_budget_ms else {
            return config.search_depth;
        };
        let fallback = clamp_depth(f64::from(config.search_depth), config);

        match self.growth_factor() {
            Some(factor) if factor > 1.0 => {
                let estimate = (budget as f64).ln() / factor.ln();
                let depth = clamp_depth(estimate.floor(), config);
                debug!(
                    "自适应深度: 增长因子 {:.3}, 预算 {}ms, 估计深度 {:.2} -> {}",
                    factor, budget, estimate, depth
                );
                depth
            }
            _ => fallback,
        }
    }
}

fn clamp_depth(depth: f64, config: &AiConfig) -> u8 {
    let min = f64::from(config.minimum_depth);
    let max = f64::from(config.maximum_depth.max(config.minimum_depth));
    depth.clamp(min, max) as u8
}
