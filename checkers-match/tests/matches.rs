use checkers_ai::AiConfig;
use checkers_match::{
    AdvanceOpponent, ComputerOpponent, MatchOutcome, MatchRunner, Opponent, RandomOpponent, Tally,
};
use checkers_rules::BoardState;

/// 按记录的走法重放，每一步都必须合法，且终局与报告一致
fn replay(moves: &[checkers_rules::Move]) -> BoardState {
    moves.iter().fold(BoardState::initial(), |state, mv| {
        state.apply(mv).unwrap()
    })
}

#[test]
fn test_computer_against_random() {
    let mut computer = ComputerOpponent::new(AiConfig::with_depth(3)).unwrap();
    let mut random = RandomOpponent::new(7);

    let report = MatchRunner::new(120).play(&mut computer, &mut random).unwrap();
    let final_state = replay(&report.moves);
    assert_eq!(final_state, report.final_state);

    if let MatchOutcome::Winner(side) = report.outcome {
        assert_eq!(final_state.winner(), Some(side));
    }
}

#[test]
fn test_tally_over_several_games() {
    let runner = MatchRunner::default();
    let mut red: Box<dyn Opponent> = Box::new(AdvanceOpponent);
    let mut black: Box<dyn Opponent> = Box::new(RandomOpponent::new(3));
    let mut tally = Tally::default();

    for _ in 0..5 {
        let report = runner.play(red.as_mut(), black.as_mut()).unwrap();
        assert_eq!(replay(&report.moves), report.final_state);
        tally.record(report.outcome);
    }

    assert_eq!(tally.games(), 5);
    assert_eq!(tally.red_wins + tally.black_wins + tally.draws, 5);
}

#[test]
fn test_adaptive_computer_keeps_calibrating() {
    let config = AiConfig {
        search_depth: 3,
        time_budget_ms: Some(20),
        minimum_depth: 2,
        maximum_depth: 6,
    };
    let mut red = ComputerOpponent::new(config).unwrap();
    let mut black = RandomOpponent::new(11);

    let report = MatchRunner::new(30).play(&mut red, &mut black).unwrap();
    assert!(report.plies > 0);
    assert!(!red.engine().calibrator().is_empty());
    assert!((2..=6).contains(&red.engine().next_depth()));
}
