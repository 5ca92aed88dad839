//! `engine` の性能計測（合法手生成、着手適用、状態遷移）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::Criterion;
use reversi_core::engine::{self, Rules as _};

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 初期局面（黒番）での代表的な合法手を返す。
const fn initial_black_move_square() -> Option<engine::Square> {
    engine::Square::from_xy(2, 3)
}

/// `Board::apply_move` を計測する。
fn bench_apply_move(criterion: &mut Criterion) {
    let Some(square) = initial_black_move_square() else {
        return;
    };

    criterion.bench_function("engine/apply_move_initial", |bench| {
        bench.iter_batched(
            engine::Board::initial,
            |board| black_box(board.apply_move(square, engine::Color::Black)),
            BatchSize::SmallInput,
        );
    });
}

/// `Board::legal_moves` を計測する（列挙まで含む）。
fn bench_legal_moves(criterion: &mut Criterion) {
    criterion.bench_function("engine/legal_moves_initial", |bench| {
        bench.iter(|| {
            black_box(
                engine::Board::initial()
                    .legal_moves(engine::Color::Black)
                    .count(),
            )
        });
    });
}

/// `Game::update_for_move` を計測する。
fn bench_update_for_move(criterion: &mut Criterion) {
    criterion.bench_function("engine/update_for_move_initial", |bench| {
        bench.iter(|| black_box(engine::Game::initial().update_for_move(2, 3)));
    });
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();

    bench_apply_move(&mut criterion);
    bench_legal_moves(&mut criterion);
    bench_update_for_move(&mut criterion);

    criterion.final_summary();
}
