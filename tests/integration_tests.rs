//! Integration tests for the game state: spawn, actions, falling and landing

use ledtris::core::{Board, GameState, Landing, PiecePhase};
use ledtris::types::{Action, Color, Shape};

const GRAY: Color = Color::new(5);

/// Board whose `rows` are full except column 5, where a vertical I drops in
fn well_board(rows: std::ops::RangeInclusive<i8>) -> Board {
    let mut board = Board::new();
    for row in rows {
        board.fill_row_except(row, GRAY, &[5]);
    }
    board
}

fn drop_vertical_i(state: &mut GameState) -> Landing {
    state.set_next(Shape::I, 0);
    assert_eq!(state.spawn_if_needed(), Ok(true));
    assert!(state.apply_action(Action::Up));
    state.advance(0).expect("hard drop lands on the next advance")
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), PiecePhase::Spawning);
    assert!(state.falling().is_none());

    assert_eq!(state.spawn_if_needed(), Ok(true));
    assert_eq!(state.phase(), PiecePhase::Falling);
    assert_eq!(state.pieces_spawned(), 1);

    // Nothing to do while a piece is falling
    assert_eq!(state.spawn_if_needed(), Ok(false));
    assert_eq!(state.pieces_spawned(), 1);
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);
    for _ in 0..20 {
        let spawned = a.spawn_if_needed();
        assert_eq!(spawned, b.spawn_if_needed());
        if spawned.is_err() {
            break;
        }
        assert_eq!(a.falling(), b.falling());
        assert_eq!(a.next(), b.next());
        a.apply_action(Action::Up);
        b.apply_action(Action::Up);
        assert_eq!(a.advance(0), b.advance(0));
    }
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_i_piece_clears_one_line() {
    let mut state = GameState::with_board(1, well_board(19..=19));

    let landing = drop_vertical_i(&mut state);

    assert_eq!(landing.shape, Shape::I);
    assert_eq!(landing.rows_cleared, 1);
    assert_eq!(landing.score_delta, 40);
    assert!(!landing.level_up);
    // 18 rows of hard drop plus the line
    assert_eq!(state.score(), 18 + 40);
    assert_eq!(state.lines(), 1);
    // What is left of the I slid down into rows 17..=19
    assert_eq!(state.board().filled_count(), 3);
    assert!(state.board().is_occupied(5, 19));
    assert!(!state.board().is_occupied(5, 16));
    assert_eq!(state.phase(), PiecePhase::Merged);
}

#[test]
fn test_horizontal_i_completes_bottom_row() {
    let mut board = Board::new();
    board.fill_row_except(19, GRAY, &[3, 4, 5, 6]);
    let mut state = GameState::with_board(1, board);
    state.set_next(Shape::I, 1);
    state.spawn_if_needed().unwrap();

    let rows = state.apply_action(Action::Up);
    assert!(rows);
    assert_eq!(state.falling().map(|p| p.y), Some(17));
    assert_eq!(state.phase(), PiecePhase::Landing);

    let landing = state.advance(0).unwrap();
    assert_eq!(landing.rows_cleared, 1);
    assert_eq!(landing.score_delta, 40 * state.level());
    assert_eq!(state.score(), 19 + 40);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_level_up_after_six_lines() {
    let mut state = GameState::with_board(1, well_board(14..=19));

    let first = drop_vertical_i(&mut state);
    assert_eq!(first.rows_cleared, 4);
    assert_eq!(first.score_delta, 1200);
    assert_eq!(state.lines(), 4);
    assert_eq!(state.level(), 1);

    let second = drop_vertical_i(&mut state);
    assert_eq!(second.rows_cleared, 2);
    // Scored at the level the piece landed on
    assert_eq!(second.score_delta, 100);
    assert!(second.level_up);
    assert_eq!(state.lines(), 6);
    assert_eq!(state.level(), 2);
    assert_eq!(state.fall_interval_ms(), 580);
}

#[test]
fn test_fall_timer_moves_piece_one_row() {
    let mut state = GameState::new(4);
    state.spawn_if_needed().unwrap();
    let start = state.falling().unwrap();

    assert_eq!(state.advance(639), None);
    assert_eq!(state.falling().unwrap().y, start.y);

    assert_eq!(state.advance(1), None);
    assert_eq!(state.falling().unwrap().y, start.y + 1);
    assert_eq!(state.fall_timer_ms(), 0);
}

#[test]
fn test_game_restart() {
    let mut state = GameState::new(12345);
    state.spawn_if_needed().unwrap();
    state.apply_action(Action::Up);
    state.advance(0);
    assert!(state.score() > 0);

    state = GameState::new(12345);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.board().filled_count(), 0);
}
