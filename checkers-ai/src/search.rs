//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝 + 置换表 + 自适应深度

use std::time::{Duration, Instant};

use checkers_rules::{BoardState, Move, MoveGenerator, Side};
use tracing::{debug, info};

use crate::calibrate::DepthCalibrator;
use crate::config::{AiConfig, Difficulty};
use crate::error::{AiError, Result};
use crate::evaluate::{Evaluator, WIN_SCORE};
use crate::transposition::{EntryType, TranspositionTable};
use crate::zobrist::ZobristTable;

/// 一次搜索的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// 最佳走法，走子方无路可走时为 None
    pub best_move: Option<Move>,
    /// 最佳走法的分数（搜索方视角）
    pub score: i32,
    /// 本次搜索深度
    pub depth: u8,
    /// 搜索的节点数
    pub nodes: u64,
    /// 耗时
    pub elapsed: Duration,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    calibrator: DepthCalibrator,
    zobrist: ZobristTable,
    tt: TranspositionTable,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎，配置不合法时返回错误
    pub fn new(config: AiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            calibrator: DepthCalibrator::new(),
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::default_size(),
            nodes_searched: 0,
        })
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Result<Self> {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn calibrator(&self) -> &DepthCalibrator {
        &self.calibrator
    }

    /// 获取上一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 下一次搜索将使用的深度
    pub fn next_depth(&self) -> u8 {
        self.calibrator.recommend(&self.config)
    }

    /// 为当前走子方搜索最佳走法，设置了时间预算时按预算选择深度
    pub fn search(&mut self, state: &BoardState) -> Result<SearchResult> {
        self.search_adaptive(state, state.side_to_move)
    }

    /// 为指定阵营搜索最佳走法，`side` 必须是当前走子方
    pub fn search_for(&mut self, state: &BoardState, side: Side) -> Result<SearchResult> {
        check_side(state, side)?;
        let depth = self.next_depth();
        Ok(self.search_at(state, side, depth))
    }

    /// 按时间预算搜索
    ///
    /// 没有时间预算时等同于 [`search_for`](Self::search_for)。有预算但还没有耗时样本时，
    /// 先在当前局面上从 `minimum_depth` 开始逐层试探，直到预计下一层超出预算或累计耗时
    /// 用完预算，再按拟合结果选择深度。选中的深度已在试探中搜过时直接复用其结果。
    pub fn search_adaptive(&mut self, state: &BoardState, side: Side) -> Result<SearchResult> {
        check_side(state, side)?;
        if self.config.time_budget_ms.is_none() || !self.calibrator.is_empty() {
            return self.search_for(state, side);
        }

        let mut trials = self.calibrate(state, side);
        let depth = match self.calibrator.growth_factor() {
            Some(factor) if factor > 1.0 => self.next_depth(),
            // 试探耗时都不足 1ms，无法外推，取试探到的最深层
            _ => trials
                .last()
                .map_or(self.config.minimum_depth, |result| result.depth),
        };
        info!("校准完成: 试探 {} 层, 选择深度 {}", trials.len(), depth);

        match trials.iter().position(|result| result.depth == depth) {
            Some(index) => Ok(trials.swap_remove(index)),
            None => Ok(self.search_at(state, side, depth)),
        }
    }

    /// 在当前局面上逐层试探搜索耗时，返回每一层的搜索结果
    fn calibrate(&mut self, state: &BoardState, side: Side) -> Vec<SearchResult> {
        let Some(budget) = self.config.time_budget() else {
            return Vec::new();
        };
        let budget_ms = budget.as_secs_f64() * 1000.0;
        let start = Instant::now();
        let mut trials = Vec::new();
        let mut depth = self.config.minimum_depth;

        loop {
            let result = self.search_at(state, side, depth);
            let finished = result.best_move.is_none();
            trials.push(result);

            if finished || depth >= self.config.maximum_depth || start.elapsed() >= budget {
                break;
            }
            let next = depth + 1;
            let over_budget = self
                .calibrator
                .estimate_millis(next)
                .map_or(true, |millis| millis > budget_ms);
            if over_budget {
                break;
            }
            depth = next;
        }

        debug!("校准耗时 {:?}, 样本 {}", start.elapsed(), self.calibrator.len());
        trials
    }

    /// 按指定深度搜索并记录耗时样本
    fn search_at(&mut self, state: &BoardState, side: Side, depth: u8) -> SearchResult {
        let start = Instant::now();
        self.nodes_searched = 0;
        self.tt.clear();

        debug!("开始搜索: {:?} 方, 深度 {}", side, depth);

        let moves = MoveGenerator::generate_legal(state);
        if moves.is_empty() {
            debug!("{:?} 方无合法走法", side);
            return SearchResult {
                best_move: None,
                score: -(WIN_SCORE + i32::from(depth)),
                depth,
                nodes: 0,
                elapsed: start.elapsed(),
            };
        }

        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        let mut best_index = 0;
        let mut best_score = i32::MIN;

        for (index, mv) in moves.iter().enumerate() {
            let child = state.apply_unchecked(mv);
            let score = self.minimax(&child, depth - 1, alpha, beta, side);

            // 同分保留先生成的走法
            if score > best_score {
                best_score = score;
                best_index = index;
            }
            alpha = alpha.max(score);
        }

        let elapsed = start.elapsed();
        self.calibrator.record(depth, elapsed);

        let stats = self.tt.stats();
        debug!(
            "搜索完成: 节点 {}, 置换表命中率 {:.1}%, 使用率 {:.1}%",
            self.nodes_searched,
            stats.hit_rate() * 100.0,
            stats.usage() * 100.0
        );

        let best_move = moves.into_iter().nth(best_index);
        if let Some(mv) = &best_move {
            info!(
                "AI 选择走法 {} ({:?}), 评分 {}, 深度 {}, 耗时 {:?}",
                mv, side, best_score, depth, elapsed
            );
        }

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes_searched,
            elapsed,
        }
    }

    /// Minimax + Alpha-Beta
    ///
    /// 分数始终以 `side` 为视角：`side` 走子的层取最大值，对方走子的层取最小值。
    fn minimax(
        &mut self,
        state: &BoardState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        side: Side,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return Evaluator::evaluate(state, side);
        }

        let moves = MoveGenerator::generate_legal(state);
        let maximizing = state.side_to_move == side;

        // 走子方无路可走：剩余深度越大说明胜负来得越早
        if moves.is_empty() {
            let score = WIN_SCORE + i32::from(depth);
            return if maximizing { -score } else { score };
        }

        let hash = self.zobrist.hash(&state.board, state.side_to_move);
        let (alpha_orig, beta_orig) = (alpha, beta);

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash).copied() {
            // 只使用相同剩余深度的结果，保证胜负分数的深度修正一致
            if entry.depth == depth {
                match entry.entry_type {
                    EntryType::Exact => return entry.score,
                    EntryType::LowerBound => alpha = alpha.max(entry.score),
                    EntryType::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
            tt_move = entry.best_move.map(usize::from).filter(|&i| i < moves.len());
        }

        let mut best_index = 0;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in move_order(moves.len(), tt_move) {
            let child = state.apply_unchecked(&moves[index]);
            let score = self.minimax(&child, depth - 1, alpha, beta, side);

            if maximizing {
                if score > best {
                    best = score;
                    best_index = index;
                }
                alpha = alpha.max(score);
            } else {
                if score < best {
                    best = score;
                    best_index = index;
                }
                beta = beta.min(score);
            }

            if alpha >= beta {
                break;
            }
        }

        let entry_type = if best <= alpha_orig {
            EntryType::UpperBound
        } else if best >= beta_orig {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.tt
            .store(hash, best, depth, entry_type, u8::try_from(best_index).ok());

        best
    }
}

fn check_side(state: &BoardState, side: Side) -> Result<()> {
    if state.side_to_move != side {
        return Err(AiError::NotSideToMove {
            expected: state.side_to_move,
            actual: side,
        });
    }
    Ok(())
}

/// 走法搜索顺序：置换表中的最佳走法优先，其余保持生成顺序
fn move_order(len: usize, first: Option<usize>) -> impl Iterator<Item = usize> {
    first
        .into_iter()
        .chain((0..len).filter(move |&index| Some(index) != first))
}

/// 为指定阵营选择走法（每次使用新的引擎）
///
/// 设置了时间预算时先在当前局面上校准深度。走子方无合法走法时返回 `Ok(None)`。
pub fn choose_move(state: &BoardState, side: Side, config: &AiConfig) -> Result<Option<Move>> {
    let mut engine = AiEngine::new(config.clone())?;
    Ok(engine.search_adaptive(state, side)?.best_move)
}
