//! 固定深さのミニマックス（ネガマックス形式、αβ枝刈り付き）。
//!
//! 子ノードは `Rules::legal_moves` の順（行優先）で展開し、同点の手は
//! 先に見つかったものを採用する。同じ入力には常に同じ手を返す。

mod eval;
mod limits;
mod search;

use core::sync::atomic::AtomicBool;

use tracing::debug;

use crate::ai::types::Ai;
use crate::engine::board::Board;
use crate::engine::rules::Rules;
use crate::engine::types::{Color, Square};

pub use limits::SearchStats;

/// 終局評価で石差に掛ける倍率（どの静的評価値よりも大きくなるように取る）。
const DISC_SCALE: i32 = 1_000;

/// 探索窓の無限大。
const INF: i32 = 1_000_000;

/// 探索深さの上限（ply）。
pub const MAX_DEPTH: u8 = 60;

/// アルファベータ探索を行うAI。
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Agent {
    /// 探索深さ。
    depth: u8,
}

impl Agent {
    /// 探索深さを返す。
    #[inline]
    #[must_use]
    pub const fn depth(self) -> u8 {
        self.depth
    }

    /// `depth` を指定して初期化する。
    #[inline]
    #[must_use]
    pub const fn new(depth: u8) -> Self {
        Self { depth }
    }
}

impl Ai for Agent {
    #[inline]
    fn select_move(&mut self, board: Board, color: Color) -> Option<Square> {
        find_next_move(board, color, i32::from(self.depth))
    }
}

/// 探索結果。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchOutcome {
    /// 選択した手（合法手が無ければ `None`）。
    best_move: Option<Square>,
    /// `best_move` の評価値（探索した手番視点）。
    score: i32,
    /// 探索統計。
    stats: SearchStats,
}

impl SearchOutcome {
    /// 選択した手を返す。
    #[inline]
    #[must_use]
    pub const fn best_move(self) -> Option<Square> {
        self.best_move
    }

    /// 評価値を返す。
    #[inline]
    #[must_use]
    pub const fn score(self) -> i32 {
        self.score
    }

    /// 探索統計を返す。
    #[inline]
    #[must_use]
    pub const fn stats(self) -> SearchStats {
        self.stats
    }
}

/// `color` の最善手を `depth` 手先まで読んで返す。
///
/// 合法手が無ければ `None`。`depth <= 0` の場合は展開せず、生成順で最初の合法手を返す。
#[inline]
#[must_use]
pub fn find_next_move<R: Rules>(board: R, color: Color, depth: i32) -> Option<Square> {
    search(board, color, depth, None).and_then(SearchOutcome::best_move)
}

/// 探索を実行し、手・評価値・統計を返す。
///
/// `cancel` が立った時点で探索を打ち切り、`None` を返す。
#[inline]
#[must_use]
#[tracing::instrument(level = "debug", skip(board, cancel))]
pub fn search<R: Rules>(
    board: R,
    color: Color,
    depth: i32,
    cancel: Option<&AtomicBool>,
) -> Option<SearchOutcome> {
    let mut ctx = limits::SearchContext::new(cancel);
    let Ok((best_move, score)) = search::root(board, color, depth, &mut ctx) else {
        debug!(nodes = ctx.stats().nodes(), "search cancelled");
        return None;
    };

    let stats = ctx.stats();
    debug!(
        best_move = ?best_move,
        score,
        nodes = stats.nodes(),
        cutoffs = stats.cutoffs(),
        passes = stats.passes(),
        "search finished"
    );

    Some(SearchOutcome {
        best_move,
        score,
        stats,
    })
}
