//! 对局参与者
//!
//! 电脑引擎和两个用来检验引擎强度的简单对手

use anyhow::Result;
use checkers_ai::{AiConfig, AiEngine};
use checkers_rules::{Board, BoardState, Move, Side, BOARD_SIZE};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// 对局参与者
pub trait Opponent {
    /// 名称（用于日志）
    fn name(&self) -> &str;

    /// 为当前走子方选择走法，无路可走时返回 None
    fn select(&mut self, state: &BoardState) -> Result<Option<Move>>;
}

/// 电脑引擎
pub struct ComputerOpponent {
    engine: AiEngine,
}

impl ComputerOpponent {
    pub fn new(config: AiConfig) -> Result<Self> {
        Ok(Self {
            engine: AiEngine::new(config)?,
        })
    }

    pub fn engine(&self) -> &AiEngine {
        &self.engine
    }
}

impl Opponent for ComputerOpponent {
    fn name(&self) -> &str {
        "computer"
    }

    fn select(&mut self, state: &BoardState) -> Result<Option<Move>> {
        Ok(self.engine.search(state)?.best_move)
    }
}

/// 随机走子
pub struct RandomOpponent {
    rng: ChaCha8Rng,
}

impl RandomOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Opponent for RandomOpponent {
    fn name(&self) -> &str {
        "random"
    }

    fn select(&mut self, state: &BoardState) -> Result<Option<Move>> {
        Ok(state.legal_moves().choose(&mut self.rng).cloned())
    }
}

/// 一味向前：选择走完后己方棋子总推进行数最多的走法，同分取先生成的
#[derive(Debug, Default)]
pub struct AdvanceOpponent;

impl AdvanceOpponent {
    /// 己方所有棋子离己方底线的行数之和
    pub fn progress(board: &Board, side: Side) -> i32 {
        let last = BOARD_SIZE as i32 - 1;
        board
            .pieces(side)
            .into_iter()
            .map(|(pos, _)| match side {
                Side::Red => last - i32::from(pos.y),
                Side::Black => i32::from(pos.y),
            })
            .sum()
    }
}

impl Opponent for AdvanceOpponent {
    fn name(&self) -> &str {
        "advance"
    }

    fn select(&mut self, state: &BoardState) -> Result<Option<Move>> {
        let side = state.side_to_move;
        let mut best: Option<(i32, Move)> = None;

        for mv in state.legal_moves() {
            let next = state.apply_unchecked(&mv);
            let score = Self::progress(&next.board, side);
            trace!("{} 推进得分 {}", mv, score);

            if best.as_ref().map_or(true, |(best_score, _)| score > *best_score) {
                best = Some((score, mv));
            }
        }

        Ok(best.map(|(_, mv)| mv))
    }
}
