//! 对局控制
//!
//! 从初始局面开始轮流向双方要走法，直到一方无路可走或达到步数上限

use std::fmt;

use anyhow::{bail, Context, Result};
use checkers_rules::{BoardState, Move, Side};
use tracing::{debug, info};

use crate::opponent::Opponent;

/// 默认步数上限，超过即判和
pub const DEFAULT_MAX_PLIES: usize = 200;

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Side),
    /// 达到步数上限
    Draw,
}

/// 一局的记录
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub plies: usize,
    pub moves: Vec<Move>,
    pub final_state: BoardState,
}

/// 对局控制器
#[derive(Debug, Clone)]
pub struct MatchRunner {
    max_plies: usize,
}

impl MatchRunner {
    pub fn new(max_plies: usize) -> Self {
        Self { max_plies }
    }

    pub fn max_plies(&self) -> usize {
        self.max_plies
    }

    /// 从初始局面下一局
    pub fn play(&self, red: &mut dyn Opponent, black: &mut dyn Opponent) -> Result<MatchReport> {
        self.play_from(BoardState::initial(), red, black)
    }

    /// 从指定局面下一局，每一步都经过合法性检查
    pub fn play_from(
        &self,
        mut state: BoardState,
        red: &mut dyn Opponent,
        black: &mut dyn Opponent,
    ) -> Result<MatchReport> {
        let mut moves = Vec::new();

        let outcome = loop {
            if let Some(winner) = state.winner() {
                break MatchOutcome::Winner(winner);
            }
            if moves.len() >= self.max_plies {
                break MatchOutcome::Draw;
            }

            let side = state.side_to_move;
            let player: &mut dyn Opponent = match side {
                Side::Red => &mut *red,
                Side::Black => &mut *black,
            };

            let Some(mv) = player
                .select(&state)
                .with_context(|| format!("{} ({}) failed to select a move", player.name(), side))?
            else {
                bail!("{} ({}) returned no move in a live position", player.name(), side);
            };

            debug!("第 {} 步: {} {} {}", moves.len() + 1, player.name(), side, mv);
            state = state
                .apply(&mv)
                .with_context(|| format!("{} ({}) played an illegal move {}", player.name(), side, mv))?;
            moves.push(mv);
        };

        info!("对局结束: {:?}, 共 {} 步", outcome, moves.len());

        Ok(MatchReport {
            outcome,
            plies: moves.len(),
            moves,
            final_state: state,
        })
    }
}

impl Default for MatchRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PLIES)
    }
}

/// 多局统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub red_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::Winner(Side::Red) => self.red_wins += 1,
            MatchOutcome::Winner(Side::Black) => self.black_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.red_wins + self.black_wins + self.draws
    }

    pub fn wins(&self, side: Side) -> usize {
        match side {
            Side::Red => self.red_wins,
            Side::Black => self.black_wins,
        }
    }

    /// 胜率（百分比）
    pub fn win_rate(&self, side: Side) -> f64 {
        percent(self.wins(side), self.games())
    }

    pub fn draw_rate(&self) -> f64 {
        percent(self.draws, self.games())
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: Red {} ({:.1}%), Black {} ({:.1}%), draws {} ({:.1}%)",
            self.games(),
            self.red_wins,
            self.win_rate(Side::Red),
            self.black_wins,
            self.win_rate(Side::Black),
            self.draws,
            self.draw_rate()
        )
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponent::{AdvanceOpponent, RandomOpponent};
    use checkers_rules::Diagram;

    /// 总是走一个非法走法
    struct Cheater;

    impl Opponent for Cheater {
        fn name(&self) -> &str {
            "cheater"
        }

        fn select(&mut self, _state: &BoardState) -> Result<Option<Move>> {
            Ok(Some(Move::step(
                checkers_rules::Coord::new(0, 5),
                checkers_rules::Coord::new(0, 4),
                false,
            )))
        }
    }

    #[test]
    fn test_random_game_finishes() {
        let runner = MatchRunner::default();
        let mut red = RandomOpponent::new(1);
        let mut black = RandomOpponent::new(2);

        let report = runner.play(&mut red, &mut black).unwrap();
        assert_eq!(report.plies, report.moves.len());
        assert!(report.plies <= DEFAULT_MAX_PLIES);

        match report.outcome {
            MatchOutcome::Winner(side) => assert_eq!(report.final_state.winner(), Some(side)),
            MatchOutcome::Draw => assert_eq!(report.plies, DEFAULT_MAX_PLIES),
        }
    }

    #[test]
    fn test_ply_limit_is_draw() {
        let runner = MatchRunner::new(4);
        let report = runner
            .play(&mut AdvanceOpponent, &mut AdvanceOpponent)
            .unwrap();
        assert_eq!(report.outcome, MatchOutcome::Draw);
        assert_eq!(report.plies, 4);
    }

    #[test]
    fn test_finished_position() {
        let state = Diagram::parse_state("-.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-b- r").unwrap();
        let report = MatchRunner::default()
            .play_from(state, &mut AdvanceOpponent, &mut AdvanceOpponent)
            .unwrap();
        assert_eq!(report.outcome, MatchOutcome::Winner(Side::Black));
        assert_eq!(report.plies, 0);
    }

    #[test]
    fn test_illegal_move_is_an_error() {
        let err = MatchRunner::default()
            .play(&mut Cheater, &mut AdvanceOpponent)
            .unwrap_err();
        assert!(err.to_string().contains("illegal move"));
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        assert_eq!(tally.win_rate(Side::Red), 0.0);

        tally.record(MatchOutcome::Winner(Side::Red));
        tally.record(MatchOutcome::Winner(Side::Red));
        tally.record(MatchOutcome::Winner(Side::Black));
        tally.record(MatchOutcome::Draw);

        assert_eq!(tally.games(), 4);
        assert_eq!(tally.wins(Side::Red), 2);
        assert_eq!(tally.win_rate(Side::Red), 50.0);
        assert_eq!(tally.draw_rate(), 25.0);
        assert_eq!(
            tally.to_string(),
            "4 games: Red 2 (50.0%), Black 1 (25.0%), draws 1 (25.0%)"
        );
    }
}
