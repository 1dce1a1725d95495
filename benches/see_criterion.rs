use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_tactics::game_state::position::Position;
use plum_tactics::game_state::position_hasher::ZobristHasher;
use plum_tactics::search::piece_values::PieceValues;
use plum_tactics::search::static_exchange::StaticExchangeEvaluator;
use plum_tactics::utils::algebraic::algebraic_to_square;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    target: &'static str,
    from: &'static str,
    expected: i32,
}

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "undefended_pawn",
        fen: "7k/8/8/3p4/8/8/8/K2R4 w - - 0 1",
        target: "d5",
        from: "d1",
        expected: 180,
    },
    BenchCase {
        name: "xray_battery",
        fen: "4r2k/8/8/4p3/8/8/4R3/K3Q3 w - - 0 1",
        target: "e5",
        from: "e2",
        expected: 180,
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "undefended_pawn",
        fen: "7k/8/8/3p4/8/8/8/K2R4 w - - 0 1",
        target: "d5",
        from: "d1",
        expected: 180,
    },
    BenchCase {
        name: "pawn_defended",
        fen: "7k/8/4p3/3p4/8/8/8/K2Q4 w - - 0 1",
        target: "d5",
        from: "d1",
        expected: -1620,
    },
    BenchCase {
        name: "xray_battery",
        fen: "4r2k/8/8/4p3/8/8/4R3/K3Q3 w - - 0 1",
        target: "e5",
        from: "e2",
        expected: 180,
    },
    BenchCase {
        name: "crowded_square",
        fen: "3r3k/4q3/5n2/4p3/3P4/5N2/8/K3R3 w - - 0 1",
        target: "e5",
        from: "d4",
        expected: 180,
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

fn bench_see(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("see_{}", suite_name()));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(50);

    let hasher = ZobristHasher::default_shared();
    let values = PieceValues::default();
    let see = StaticExchangeEvaluator::new();

    for case in selected_cases() {
        let position =
            Position::from_fen(case.fen, hasher.clone()).expect("benchmark FEN should parse");
        let target = algebraic_to_square(case.target).expect("benchmark target should parse");
        let from = algebraic_to_square(case.from).expect("benchmark origin should parse");

        // Correctness guard before benchmarking.
        assert_eq!(
            see.eval(target, from, &position, &values),
            case.expected,
            "exchange mismatch for {}",
            case.name
        );

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &position, |b, pos| {
            b.iter(|| see.eval(black_box(target), black_box(from), black_box(pos), &values));
        });
    }

    group.finish();
}

criterion_group!(see_benches, bench_see);
criterion_main!(see_benches);
