use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sable_chess::game_state::game_state::GameState;
use sable_chess::search::board_scoring::PositionalScorer;
use sable_chess::search::minimax::{alpha_beta_search, SearchConfig, SearchControl};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: u8,
    /// Coordinates of the move the search must return, if the position has a
    /// known answer.
    expected_best: Option<(u8, u8)>,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depth: 2,
        expected_best: None,
    },
    BenchCase {
        name: "back_rank_mate",
        fen: "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
        depth: 3,
        expected_best: Some((0, 56)),
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 3,
        expected_best: None,
    },
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_beta");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let scorer = PositionalScorer::default();
    let control = SearchControl::default();

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let config = SearchConfig {
            max_depth: case.depth,
        };

        // Correctness guard before benchmarking.
        let mut probe = game.clone();
        let warmup = alpha_beta_search(&mut probe, &scorer, config, &control);
        let best = warmup.best_move.expect("benchmark positions have legal moves");
        if let Some(expected) = case.expected_best {
            assert_eq!((best.from, best.to), expected, "unexpected best move for {}", case.name);
        }

        let mut bench_game = game.clone();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_d{}", case.name, case.depth)),
            &warmup.nodes,
            |b, expected_nodes| {
                b.iter(|| {
                    let result = alpha_beta_search(black_box(&mut bench_game), &scorer, config, &control);
                    assert_eq!(result.nodes, *expected_nodes);
                    black_box(result.score)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
