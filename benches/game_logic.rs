use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gemfall::core::rng::GameRng;
use gemfall::core::{
    apply_gravity, find_matches, generate_board, has_valid_moves, GameBoard, Grid, TileIdSource,
};
use rand::SeedableRng;

fn bench_find_matches(c: &mut Criterion) {
    let grid = generate_board(&mut GameRng::seed_from_u64(12345), &TileIdSource::new());

    c.bench_function("find_matches_stable_board", |b| {
        b.iter(|| find_matches(black_box(&grid)))
    });
}

fn bench_has_valid_moves(c: &mut Criterion) {
    let grid = generate_board(&mut GameRng::seed_from_u64(12345), &TileIdSource::new());

    c.bench_function("has_valid_moves", |b| {
        b.iter(|| has_valid_moves(black_box(&grid)))
    });
}

fn bench_gravity(c: &mut Criterion) {
    let mut grid = generate_board(&mut GameRng::seed_from_u64(12345), &TileIdSource::new());
    // Punch a hole in the middle of every column.
    for pos in Grid::positions().filter(|p| p.row == 4) {
        grid.take(pos);
    }

    c.bench_function("apply_gravity_row_hole", |b| {
        b.iter(|| apply_gravity(black_box(&grid)))
    });
}

fn bench_generate_board(c: &mut Criterion) {
    let mut rng = GameRng::seed_from_u64(12345);
    let ids = TileIdSource::new();

    c.bench_function("generate_board", |b| {
        b.iter(|| generate_board(&mut rng, &ids))
    });
}

fn bench_hinted_swap(c: &mut Criterion) {
    let mut game = GameBoard::new(12345);

    c.bench_function("hinted_swap_with_cascade", |b| {
        b.iter(|| {
            if let Some((from, to)) = game.hint() {
                let _ = game.try_swap(from, to);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_find_matches,
    bench_has_valid_moves,
    bench_gravity,
    bench_generate_board,
    bench_hinted_swap
);
criterion_main!(benches);
