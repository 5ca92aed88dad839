//! `ai::alphabeta` の性能計測（深さ別の探索）。

use core::hint::black_box;
use criterion::BenchmarkId;
use criterion::Criterion;
use reversi_core::ai::{self, Ai as _};
use reversi_core::engine;

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args().sample_size(10)
}

/// ランダムに `plies` 手進めた中盤局面を返す。
fn midgame(plies: u16) -> engine::Game {
    let mut agent = ai::random::Agent::new(42);
    let mut game = engine::Game::initial();
    for _turn in u16::MIN..plies {
        let mv = agent.select_move(game.board(), game.current_player());
        match mv.and_then(|square| game.play(square)) {
            Some(next) => game = next,
            None => break,
        }
    }
    game
}

/// `find_next_move` を深さごとに計測する。
fn bench_find_next_move(criterion: &mut Criterion) {
    let positions = [("initial", engine::Game::initial()), ("midgame", midgame(20))];
    let mut group = criterion.benchmark_group("ai/alphabeta/find_next_move");

    for (name, game) in positions {
        for depth in [2_i32, 4, 6] {
            let bench_id = BenchmarkId::new(name, depth);
            group.bench_with_input(bench_id, &depth, |bench, &input| {
                bench.iter(|| {
                    black_box(ai::alphabeta::find_next_move(
                        game.board(),
                        game.current_player(),
                        input,
                    ))
                });
            });
        }
    }

    group.finish();
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_find_next_move(&mut criterion);
    criterion.final_summary();
}
