use checkers_ai::{choose_move, AiConfig, AiEngine, AiError, BackgroundSearch, Difficulty, WIN_SCORE};
use checkers_rules::{BoardState, Coord, Diagram, Move, Side};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_black_finds_compound_jump_win() {
    init_tracing();
    let state = Diagram::parse_state(
        "
        -.-b-.-.
        .-.-r-.-
        -.-.-.-.
        .-.-r-.-
        -.-.-.-.
        .-.-.-.-
        -.-.-.-.
        .-.-.-.-
        b
        ",
    )
    .unwrap();

    let mut engine = AiEngine::new(AiConfig::with_depth(3)).unwrap();
    let result = engine.search_for(&state, Side::Black).unwrap();

    assert!(result.score > WIN_SCORE);
    assert_eq!(
        result.best_move,
        Some(Move::capture(
            Coord::new(3, 0),
            vec![Coord::new(5, 2), Coord::new(3, 4)],
            vec![Coord::new(4, 1), Coord::new(4, 3)],
            false,
        ))
    );
}

#[test]
fn test_search_value_is_deterministic() {
    let mut state = BoardState::initial();
    for _ in 0..4 {
        let mv = state.legal_moves().remove(0);
        state = state.apply(&mv).unwrap();
    }

    let config = AiConfig::with_depth(5);
    let first = AiEngine::new(config.clone()).unwrap().search(&state).unwrap();
    let second = AiEngine::new(config.clone()).unwrap().search(&state).unwrap();
    assert_eq!(first.score, second.score);

    let chosen = choose_move(&state, state.side_to_move, &config).unwrap().unwrap();
    let again = choose_move(&state, state.side_to_move, &config).unwrap().unwrap();
    assert!(state.legal_moves().contains(&chosen));
    assert_eq!(chosen, again);
}

#[test]
fn test_choose_move_errors() {
    let state = BoardState::initial();

    let err = choose_move(&state, Side::Black, &AiConfig::default()).unwrap_err();
    assert!(matches!(err, AiError::NotSideToMove { .. }));

    let config = AiConfig {
        minimum_depth: 10,
        maximum_depth: 4,
        search_depth: 3,
        time_budget_ms: None,
    };
    let err = choose_move(&state, Side::Red, &config).unwrap_err();
    assert!(matches!(err, AiError::InvalidConfig { .. }));
}

#[test]
fn test_choose_move_on_finished_game() {
    let state = Diagram::parse_state("-.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-./r-.-.-.- b").unwrap();
    assert_eq!(choose_move(&state, Side::Black, &AiConfig::with_depth(3)), Ok(None));
}

#[test]
fn test_adaptive_depth_stays_in_bounds() {
    init_tracing();
    let config = AiConfig {
        search_depth: 4,
        time_budget_ms: Some(50),
        minimum_depth: 2,
        maximum_depth: 8,
    };
    let mut engine = AiEngine::new(config).unwrap();
    let mut state = BoardState::initial();

    for _ in 0..6 {
        let result = engine.search(&state).unwrap();
        assert!((2..=8).contains(&result.depth));

        let Some(mv) = result.best_move else {
            break;
        };
        state = state.apply(&mv).unwrap();
    }

    assert!(!engine.calibrator().is_empty());
    assert!((2..=8).contains(&engine.next_depth()));
}

#[test]
fn test_engine_self_play_is_legal() {
    let mut red = AiEngine::from_difficulty(Difficulty::Easy).unwrap();
    let mut black = AiEngine::from_difficulty(Difficulty::Medium).unwrap();
    let mut state = BoardState::initial();

    for _ in 0..40 {
        let engine = match state.side_to_move {
            Side::Red => &mut red,
            Side::Black => &mut black,
        };
        let Some(mv) = engine.search(&state).unwrap().best_move else {
            assert!(state.is_terminal());
            break;
        };
        state = state.apply(&mv).unwrap();
    }
}

#[test]
fn test_background_search_matches_foreground() {
    let state = BoardState::initial();
    let config = AiConfig::with_depth(4);

    let foreground = AiEngine::new(config.clone()).unwrap().search(&state).unwrap();
    let task = BackgroundSearch::spawn(AiEngine::new(config).unwrap(), state);
    let (_, background) = task.wait().unwrap();

    let background = background.unwrap();
    assert_eq!(background.score, foreground.score);
    assert_eq!(background.best_move, foreground.best_move);
}
