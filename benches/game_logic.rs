use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledtris::core::{Board, FallingPiece, GameState};
use ledtris::types::{Action, Color, RotationDirection, Shape};

fn bench_advance(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let _ = state.spawn_if_needed();

    c.bench_function("advance_50ms", |b| {
        b.iter(|| {
            if state.advance(black_box(50)).is_some() && state.spawn_if_needed().is_err() {
                state = GameState::new(12345);
                let _ = state.spawn_if_needed();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 16..20 {
                board.fill_row_except(row, Color::new(2), &[]);
            }
            black_box(board.clear_completed_rows());
        })
    });
}

fn bench_hard_drop_game(c: &mut Criterion) {
    c.bench_function("hard_drop_until_game_over", |b| {
        b.iter(|| {
            let mut state = GameState::new(black_box(7));
            while state.spawn_if_needed().is_ok() {
                state.apply_action(Action::Up);
                state.advance(0);
            }
            black_box(state.pieces_spawned())
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = FallingPiece::spawn(Shape::T, 0);
    piece.y = 8;

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            piece.try_rotate(black_box(&board), RotationDirection::Cw);
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_line_clear,
    bench_hard_drop_game,
    bench_try_rotate
);
criterion_main!(benches);
