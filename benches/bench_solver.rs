use criterion::{criterion_group, criterion_main, Criterion};

use facelet_solver::config::BfsPass;
use facelet_solver::facelet::Facelets;
use facelet_solver::moves::Move::*;
use facelet_solver::moves::MOVE_TABLES;
use facelet_solver::solver::Solver;
use facelet_solver::state::CubeState;
use std::time::Duration;

fn cs_apply_moves() {
    let cs = CubeState::default();
    let _ = cs.apply_moves(&[R, U, R3, U3]);
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("CubeState Moves");
    group.bench_function("apply_moves", |b| b.iter(cs_apply_moves));
    group.bench_function("transform", |b| b.iter(|| MOVE_TABLES.transform(F2)));
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let solver = Solver::default();
    let facelets = Facelets::from(&CubeState::default().apply_moves(&[R, U, R3, F, D2]));
    c.bench_function("Solver", |b| b.iter(|| solver.solve(&facelets)));

    let start = CubeState::default().apply_moves(&[R, U, F3, L, D2]);
    let pass = BfsPass {
        max_depth: 6,
        time_budget: Duration::from_secs(10),
        node_budget: 300_000,
    };
    c.bench_function("BFS depth 6", |b| b.iter(|| solver.bfs(&start, &pass)));
}

criterion_group!(benches, bench_solver, bench_moves);
criterion_main!(benches);
