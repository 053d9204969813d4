use anyhow::Result;
use checkers_ai::{AiConfig, DEFAULT_MAXIMUM_DEPTH};
use checkers_match::{
    AdvanceOpponent, ComputerOpponent, MatchOutcome, MatchRunner, Opponent, RandomOpponent, Tally,
    DEFAULT_MAX_PLIES,
};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 对局参与者类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    /// 电脑引擎
    Computer,
    /// 随机走子
    Random,
    /// 一味向前
    Advance,
}

#[derive(Parser, Debug)]
#[command(name = "checkers-match")]
#[command(about = "Play checkers engine matches without a board UI", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Player for Red (moves first)
    #[arg(long, value_enum, default_value_t = PlayerKind::Computer)]
    red: PlayerKind,

    /// Player for Black
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// Seed for the random players
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Search depth in plies (first depth when a target time is set)
    #[arg(short, long, env = "SEARCH_DEPTH", default_value_t = 7)]
    depth: u8,

    /// Target search time in milliseconds, enables adaptive depth
    #[arg(short, long, env = "TARGET_TIME")]
    target_time: Option<u64>,

    /// Adaptive depth never goes below this
    #[arg(short, long, env = "MINIMUM_DEPTH", default_value_t = 5)]
    minimum_depth: u8,

    /// Games longer than this are drawn
    #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
    max_plies: usize,
}

impl Args {
    fn ai_config(&self) -> AiConfig {
        AiConfig {
            search_depth: self.depth,
            time_budget_ms: self.target_time,
            minimum_depth: self.minimum_depth,
            maximum_depth: DEFAULT_MAXIMUM_DEPTH,
        }
    }

    fn opponent(&self, kind: PlayerKind, seed: u64) -> Result<Box<dyn Opponent>> {
        Ok(match kind {
            PlayerKind::Computer => Box::new(ComputerOpponent::new(self.ai_config())?),
            PlayerKind::Random => Box::new(RandomOpponent::new(seed)),
            PlayerKind::Advance => Box::new(AdvanceOpponent),
        })
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("checkers_match=info".parse()?),
        )
        .init();

    let args = Args::parse();
    info!("开始对局: {:?} 对 {:?}, 共 {} 局", args.red, args.black, args.games);

    let mut red = args.opponent(args.red, args.seed)?;
    let mut black = args.opponent(args.black, args.seed.wrapping_add(1))?;
    let runner = MatchRunner::new(args.max_plies);
    let mut tally = Tally::default();

    for game in 1..=args.games {
        let report = runner.play(red.as_mut(), black.as_mut())?;
        match report.outcome {
            MatchOutcome::Winner(side) => {
                info!("第 {} 局: {} 胜, {} 步", game, side, report.plies)
            }
            MatchOutcome::Draw => info!("第 {} 局: 和棋, {} 步", game, report.plies),
        }
        tally.record(report.outcome);
    }

    println!("{}", tally);
    Ok(())
}
