use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_tactics::game_state::position::Position;
use plum_tactics::game_state::position_hasher::ZobristHasher;
use plum_tactics::search::board_scoring::MaterialEvaluator;
use plum_tactics::search::quiescence::QuiescenceSearch;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: u8,
}

const WINDOW: i32 = 100_000;

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depth: 8,
    },
    BenchCase {
        name: "open_center",
        fen: "r1bqkb1r/pppp1ppp/2n2n2/4p3/3PP3/2N2N2/PPP2PPP/R1BQKB1R b KQkq - 0 4",
        depth: 8,
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depth: 8,
    },
    BenchCase {
        name: "open_center",
        fen: "r1bqkb1r/pppp1ppp/2n2n2/4p3/3PP3/2N2N2/PPP2PPP/R1BQKB1R b KQkq - 0 4",
        depth: 8,
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 12,
    },
    BenchCase {
        name: "promotion_race",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        depth: 12,
    },
];

fn suite_name() -> &'static str {
    match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    }
}

fn selected_cases() -> &'static [BenchCase] {
    match suite_name() {
        "standard" => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn bench_quiescence(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("quiescence_{}", suite_name()));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let hasher = ZobristHasher::default_shared();
    let search = QuiescenceSearch::new(MaterialEvaluator::default());

    for case in selected_cases() {
        let position =
            Position::from_fen(case.fen, hasher.clone()).expect("benchmark FEN should parse");

        // Node count of one run sets the throughput unit.
        search.reset_stats();
        search
            .search(&position, -WINDOW, WINDOW, case.depth, false)
            .expect("uninterruptible search cannot be cancelled");
        group.throughput(Throughput::Elements(search.stats().nodes()));

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &position, |b, pos| {
            b.iter(|| {
                search
                    .search(black_box(pos), -WINDOW, WINDOW, black_box(case.depth), false)
                    .expect("uninterruptible search cannot be cancelled")
            });
        });
    }

    group.finish();
}

criterion_group!(quiescence_benches, bench_quiescence);
criterion_main!(quiescence_benches);
