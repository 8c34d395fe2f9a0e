//! Scenario tests for the game engine.

use t3_engine::{
    ConfigUpdate, GameEngine, GameStatus, IndexError, MAX_BOARD_SIZE, Move, Player, Scores,
    pattern_count, validate_config, winning_patterns,
};

fn play(engine: &mut GameEngine, moves: &[usize]) {
    for &index in moves {
        assert!(
            engine.make_move(index).expect("index in range").is_some(),
            "move at {index} should be accepted"
        );
    }
}

#[test]
fn test_pattern_counts() {
    assert_eq!(winning_patterns(3, 3).len(), 8);
    assert_eq!(winning_patterns(5, 4).len(), 28);
    for n in 3..=9 {
        for m in 3..=n {
            let w = n - m + 1;
            assert_eq!(winning_patterns(n, m).len(), 2 * n * w + 2 * w * w);
            assert_eq!(pattern_count(n, m), 2 * n * w + 2 * w * w);
        }
    }
}

#[test]
fn test_validate_config_examples() {
    assert!(validate_config(3, 3).ok);
    assert!(!validate_config(4, 3).ok);
    assert!(!validate_config(3, 4).ok);
    assert!(!validate_config(2, 2).ok);
}

#[test]
fn test_top_row_win() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[0, 4, 1, 3]);
    assert_eq!(engine.status(), GameStatus::InProgress);

    let last = engine.make_move(2).unwrap().unwrap();
    assert_eq!(last, Move::new(2, Player::X));
    assert_eq!(engine.winner(), Some(Player::X));
    assert_eq!(engine.winning_pattern(), Some(&[0, 1, 2][..]));
    assert_eq!(engine.status(), GameStatus::Completed);
    assert!(engine.is_game_over());
    assert_eq!(engine.scores().x, 1);
}

#[test]
fn test_full_board_draw() {
    let mut engine = GameEngine::default();
    // Ends as X O X / X O O / O X X.
    play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert!(engine.is_game_over());
    assert_eq!(engine.winner(), None);
    assert_eq!(engine.winning_pattern(), None);
    assert_eq!(engine.scores().draw, 1);
    assert_eq!(engine.status_message(), "It's a Draw!");
}

#[test]
fn test_undo_after_win_reopens_game() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[0, 4, 1, 3, 2]);

    let undone = engine.undo_move().unwrap();
    assert_eq!(undone, Move::new(2, Player::X));
    assert!(!engine.is_game_over());
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.winner(), None);
    assert_eq!(engine.winning_pattern(), None);
    assert_eq!(engine.scores().x, 0);
    assert_eq!(engine.current_player(), Player::X);
}

#[test]
fn test_update_config_board_size_only() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[0, 4, 1, 3, 2]);

    engine
        .update_config(ConfigUpdate::new().with_board_size(5))
        .unwrap();
    assert_eq!(engine.config().board_size(), 5);
    assert_eq!(engine.config().match_size(), 4);
    assert_eq!(engine.board().len(), 25);
    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.status(), GameStatus::NotStarted);
    assert_eq!(engine.scores().x, 1, "scores survive a config change");
}

#[test]
fn test_rejected_moves_do_not_mutate() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[4]);

    let before = engine.serialize();
    assert_eq!(engine.make_move(4).unwrap(), None);
    assert_eq!(engine.make_move(9), Err(IndexError::new(9, 9)));
    assert_eq!(engine.serialize(), before);

    play(&mut engine, &[0, 3, 1, 8, 2]);
    // O completed the top row.
    assert_eq!(engine.winner(), Some(Player::O));
    let finished = engine.serialize();
    assert_eq!(engine.make_move(5).unwrap(), None);
    assert_eq!(engine.serialize(), finished);
}

#[test]
fn test_undo_redo_inverse_law() {
    let sequences: &[&[usize]] = &[
        &[4],
        &[0, 4, 1, 3, 2],
        &[0, 1, 2, 4, 3, 5, 7, 6, 8],
        &[8, 0, 7, 1, 5, 2],
    ];
    for moves in sequences {
        let mut engine = GameEngine::default();
        play(&mut engine, moves);
        let before = engine.serialize();

        assert!(engine.undo_move().is_some());
        assert!(engine.redo_move().is_some());

        let after = engine.serialize();
        assert_eq!(after.state().board(), before.state().board());
        assert_eq!(after.state().current_player(), before.state().current_player());
        assert_eq!(after.state().status(), before.state().status());
        assert_eq!(after.state().winner(), before.state().winner());
        assert_eq!(
            after.state().winning_pattern(),
            before.state().winning_pattern()
        );
        assert_eq!(after.scores(), before.scores());
        assert_eq!(after, before, "moves {moves:?}");
    }
}

#[test]
fn test_full_undo_then_full_redo_replays_game() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[0, 4, 1, 3, 2]);
    let finished = engine.serialize();

    while engine.undo_move().is_some() {}
    assert_eq!(engine.status(), GameStatus::NotStarted);
    assert_eq!(engine.scores(), Scores::default());

    while engine.redo_move().is_some() {}
    assert_eq!(engine.serialize(), finished);
}

#[test]
fn test_scores_never_go_negative() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[0, 4, 1, 3, 2]);
    engine.clear_scores();

    for _ in 0..10 {
        engine.undo_move();
    }
    assert_eq!(engine.scores(), Scores::default());
}

#[test]
fn test_snapshot_round_trip() {
    let mut engine = GameEngine::new(ConfigUpdate::new().with_board_size(4)).unwrap();
    play(&mut engine, &[0, 4, 1, 5, 2, 6]);
    engine.undo_move();
    engine.reset_scores(Scores::new(3, 1, 2));

    let json = engine.to_json().unwrap();
    let restored = GameEngine::from_json(&json).unwrap();
    assert_eq!(restored, engine);
    assert_eq!(restored.board(), engine.board());
    assert_eq!(restored.undo_stack(), engine.undo_stack());
    assert_eq!(restored.redo_stack(), engine.redo_stack());
    assert_eq!(restored.scores(), engine.scores());

    let mut other = GameEngine::default();
    other.restore(engine.serialize()).unwrap();
    assert_eq!(other, engine);
}

#[test]
fn test_large_board_needs_four_in_a_row() {
    let mut engine = GameEngine::new(ConfigUpdate::new().with_board_size(5)).unwrap();
    // X fills 0,1,2 while O answers on the second row.
    play(&mut engine, &[0, 5, 1, 6, 2, 7]);
    assert!(!engine.is_game_over());
    play(&mut engine, &[3]);
    assert_eq!(engine.winner(), Some(Player::X));
    assert_eq!(engine.winning_pattern(), Some(&[0, 1, 2, 3][..]));
}

#[test]
fn test_restore_rejects_tampered_board() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[0, 4]);
    let json = engine.to_json().unwrap().replacen(r#"null"#, r#""x""#, 1);

    let mut target = GameEngine::default();
    assert!(target.restore_json(&json).is_err());
    assert_eq!(target, GameEngine::default());
}

#[test]
fn test_oversized_board_is_a_config_error() {
    assert!(!validate_config(1 << 32, 4).ok);
    assert!(GameEngine::new(ConfigUpdate::new().with_board_size(1 << 32)).is_err());
    assert!(GameEngine::new(ConfigUpdate::new().with_board_size(100_000)).is_err());

    let mut engine = GameEngine::default();
    assert!(
        engine
            .update_config(ConfigUpdate::new().with_board_size(usize::MAX))
            .is_err()
    );
    assert_eq!(engine, GameEngine::default());

    let largest = GameEngine::new(ConfigUpdate::new().with_board_size(MAX_BOARD_SIZE)).unwrap();
    assert_eq!(largest.board().len(), MAX_BOARD_SIZE * MAX_BOARD_SIZE);
}

#[test]
fn test_restore_rejects_redo_after_finished_game() {
    let mut engine = GameEngine::default();
    play(&mut engine, &[0, 4, 1, 3, 2]);
    let json = engine.to_json().unwrap().replace(
        r#""redoStack":[]"#,
        r#""redoStack":[{"index":8,"player":"o"}]"#,
    );
    assert!(json.contains(r#""index":8"#));

    let mut target = GameEngine::default();
    assert!(target.restore_json(&json).is_err());
    assert_eq!(target, GameEngine::default());
    assert_eq!(target.redo_move(), None);
}
