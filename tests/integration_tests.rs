//! Integration tests for the engine through its public command surface

use tetris_client::core::{DangerLevel, GameState, RenderCell, ScriptedPieces};
use tetris_client::types::{GameAction, GameEvent, GameStatus, PieceKind};

fn scripted(kinds: &[PieceKind]) -> GameState {
    let mut state = GameState::with_source(ScriptedPieces::new(kinds.to_vec()));
    state.apply_action(GameAction::StartGame);
    state
}

/// Rotate a fresh I upright (board column 5), slide it to `column`, drop
///
/// Returns the events of the drop and its lock.
fn drop_vertical_i(state: &mut GameState, column: i8) -> Vec<GameEvent> {
    assert!(state.apply_action(GameAction::Rotate));
    let shift = column - 5;
    let step = if shift < 0 {
        GameAction::MoveLeft
    } else {
        GameAction::MoveRight
    };
    for _ in 0..shift.abs() {
        assert!(state.apply_action(step));
    }
    assert!(state.apply_action(GameAction::HardDrop));
    state.take_events()
}

/// Ten upright I pieces side by side: one four-line clear
fn clear_tetris(state: &mut GameState) {
    for column in 0..10 {
        drop_vertical_i(state, column);
    }
}

/// Stack columns 0-8 eight rows high, leaving a well in column 9
fn build_well(state: &mut GameState) {
    for column in 0..9 {
        for _ in 0..2 {
            let events = drop_vertical_i(state, column);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::LineClear { .. })));
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.status(), GameStatus::Idle);
    assert!(!state.game_started());

    // Commands before start are no-ops.
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::TogglePause));

    state.apply_action(GameAction::StartGame);
    assert!(state.game_started());
    assert!(state.active().is_some());
    assert!(state.next_piece().is_some());
    assert!(!state.game_over());
    assert!(!state.is_paused());

    state.apply_action(GameAction::TogglePause);
    assert!(state.is_paused());
    state.apply_action(GameAction::TogglePause);
    assert_eq!(state.status(), GameStatus::Running);
}

#[test]
fn test_end_to_end_o_hard_drop() {
    let mut state = scripted(&[PieceKind::O]);
    let spawned = state.active().unwrap();
    assert_eq!(spawned.kind, PieceKind::O);
    assert_eq!(spawned.x, 4);

    // First gravity step settles the O onto rows 0-1.
    assert!(state.tick());
    assert_eq!(state.active().unwrap().y, 0);

    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(state.score(), 36);
    assert_eq!(state.lines(), 0);
    assert_eq!(
        state.take_events(),
        vec![GameEvent::HardDrop { distance: 18 }]
    );

    let board = state.board();
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::O)));
    }
    assert_eq!(board.filled_count(), 4);

    // A fresh piece is already waiting at the spawn row.
    let next = state.active().unwrap();
    assert_eq!((next.x, next.y), (4, -1));
}

#[test]
fn test_hard_drop_distance_matches_single_steps() {
    let mut stepped = GameState::new(777);
    let mut dropped = GameState::new(777);
    stepped.start_game();
    dropped.start_game();

    // Soft drop until the step that locks (a lock respawns at the top).
    let mut steps = 0u32;
    loop {
        let before_y = stepped.active().unwrap().y;
        stepped.move_down();
        if stepped.active().unwrap().y != before_y + 1 {
            break;
        }
        steps += 1;
    }

    dropped.hard_drop();
    assert_eq!(dropped.score(), 2 * steps);
    assert_eq!(
        dropped.take_events(),
        vec![GameEvent::HardDrop { distance: steps }]
    );
    assert_eq!(dropped.board(), stepped.board());
}

#[test]
fn test_consecutive_tetrises_chain() {
    let mut state = scripted(&[PieceKind::I]);
    build_well(&mut state);
    // Two I pieces per column: 17 rows, then 13 onto the first
    assert_eq!(state.score(), 9 * 2 * (17 + 13));

    assert_eq!(
        drop_vertical_i(&mut state, 9),
        vec![
            GameEvent::HardDrop { distance: 17 },
            GameEvent::LineClear { count: 4 },
        ]
    );

    // The upper half of the well has fallen into place.
    assert_eq!(
        drop_vertical_i(&mut state, 9),
        vec![
            GameEvent::HardDrop { distance: 17 },
            GameEvent::LineClear { count: 4 },
            GameEvent::Combo { count: 2 },
            GameEvent::B2bTetris,
        ]
    );
    assert_eq!(state.score(), 9 * 2 * (17 + 13) + 2 * (34 + 800));
    assert_eq!(state.lines(), 8);
    assert_eq!(state.combo(), 2);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_stacking_locks_break_chain() {
    let mut state = scripted(&[PieceKind::I]);

    clear_tetris(&mut state);
    // Nine non-clearing locks stand between the two tetrises.
    for column in 0..9 {
        let events = drop_vertical_i(&mut state, column);
        assert_eq!(events.len(), 1, "{:?}", events);
    }
    assert_eq!(
        drop_vertical_i(&mut state, 9),
        vec![
            GameEvent::HardDrop { distance: 17 },
            GameEvent::LineClear { count: 4 },
        ]
    );

    clear_tetris(&mut state);
    assert_eq!(state.lines(), 12);
    assert_eq!(state.level(), 2);
    assert_eq!(state.drop_interval_ms(), 750);
}

#[test]
fn test_non_clearing_lock_breaks_combo() {
    let mut state = scripted(&[PieceKind::I]);
    clear_tetris(&mut state);
    assert_eq!(state.combo(), 1);

    drop_vertical_i(&mut state, 0);
    assert_eq!(state.combo(), 0);
}

#[test]
fn test_game_over_idempotence_and_restart() {
    let mut state = scripted(&[PieceKind::O]);
    while !state.game_over() {
        state.apply_action(GameAction::HardDrop);
    }
    assert!(state.active().is_none());
    state.take_events();

    let frozen = state.snapshot();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveDown,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::TogglePause,
    ] {
        assert!(!state.apply_action(action), "{:?}", action);
    }
    assert!(!state.tick());
    assert_eq!(state.snapshot(), frozen);

    state.apply_action(GameAction::StartGame);
    assert_eq!(state.status(), GameStatus::Running);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.combo(), 0);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.episode_id(), 2);
}

#[test]
fn test_render_never_touches_board() {
    let mut state = scripted(&[PieceKind::T]);
    state.tick();

    let grid = state.render();
    let painted = grid.iter().flatten().filter(|c| !c.is_empty()).count();
    // Four active cells plus four ghost cells
    assert_eq!(painted, 8);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(grid[19][3], RenderCell::Ghost(PieceKind::T));
    assert_eq!(grid[18][4], RenderCell::Ghost(PieceKind::T));
}

#[test]
fn test_snapshot_json_shape() {
    let mut state = scripted(&[PieceKind::O, PieceKind::T]);
    state.tick();
    state.apply_action(GameAction::HardDrop);

    let json = serde_json::to_value(state.take_snapshot()).unwrap();
    assert_eq!(json["score"], 36);
    assert_eq!(json["lines"], 0);
    assert_eq!(json["level"], 1);
    assert_eq!(json["status"], "running");
    assert_eq!(json["game_over"], false);
    assert_eq!(json["game_started"], true);
    assert_eq!(json["is_paused"], false);
    assert_eq!(json["tick_ms"], 800);
    assert_eq!(json["episode_id"], 1);
    assert_eq!(json["events"][0]["type"], "hard_drop");
    assert_eq!(json["events"][0]["distance"], 18);

    let board = json["board"].as_array().unwrap();
    assert_eq!(board.len(), 20);
    assert!(board.iter().all(|row| row.as_array().unwrap().len() == 10));
    assert_eq!(board[19][4], "#f0f000");
    assert!(board[19][0].is_null());
    // The active T sits at the top with its ghost resting on the O.
    assert_eq!(board[0][4], "#a000f0");
    assert_eq!(board[17][4], "ghost:#a000f0");

    assert_eq!(json["next_piece"]["kind"], "O");
    assert_eq!(json["next_piece"]["color"], "#f0f000");
    assert_eq!(json["next_piece"]["shape"], serde_json::json!([[1, 1], [1, 1]]));

    // The feed is drained by the previous read.
    assert!(state.take_snapshot().events.is_empty());
}

#[test]
fn test_danger_rises_as_stack_grows() {
    let mut state = scripted(&[PieceKind::O]);
    assert_eq!(DangerLevel::from_grid(&state.render()), DangerLevel::None);

    let mut seen = Vec::new();
    while !state.game_over() {
        seen.push(DangerLevel::from_grid(&state.render()));
        state.hard_drop();
    }
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
}
