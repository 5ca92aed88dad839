use core::sync::atomic::{AtomicBool, Ordering};

/// 探索統計。
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchStats {
    /// ベータカットで枝刈りした回数。
    cutoffs: u64,
    /// 探索したノード数。
    nodes: u64,
    /// パス（手番だけ交代）で展開したノード数。
    passes: u64,
}

impl SearchStats {
    /// 枝刈りの回数を返す。
    #[inline]
    #[must_use]
    pub const fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    /// 枝刈りの回数を加算する。
    pub(super) const fn inc_cutoffs(&mut self) {
        self.cutoffs = self.cutoffs.wrapping_add(1);
    }

    /// 探索ノード数を加算する。
    pub(super) const fn inc_nodes(&mut self) {
        self.nodes = self.nodes.wrapping_add(1);
    }

    /// パス展開の回数を加算する。
    pub(super) const fn inc_passes(&mut self) {
        self.passes = self.passes.wrapping_add(1);
    }

    /// 探索ノード数を返す。
    #[inline]
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// パス展開の回数を返す。
    #[inline]
    #[must_use]
    pub const fn passes(&self) -> u64 {
        self.passes
    }
}

/// 取り消しにより探索を中断する。
#[derive(Debug, Clone, Copy)]
pub(super) struct SearchAbort;

/// 1回の探索で共有するコンテキスト。
pub(super) struct SearchContext<'ctx> {
    /// 立っていれば探索を打ち切る。
    cancel: Option<&'ctx AtomicBool>,
    /// 探索統計。
    stats: SearchStats,
}

impl<'ctx> SearchContext<'ctx> {
    /// ノードに入る。取り消されていれば `SearchAbort` を返す。
    pub(super) fn enter(&mut self) -> Result<(), SearchAbort> {
        self.stats.inc_nodes();
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(SearchAbort),
            _ => Ok(()),
        }
    }

    /// 探索コンテキストを生成する。
    pub(super) const fn new(cancel: Option<&'ctx AtomicBool>) -> Self {
        Self {
            cancel,
            stats: SearchStats {
                cutoffs: 0,
                nodes: 0,
                passes: 0,
            },
        }
    }

    /// 探索統計を返す。
    pub(super) const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 探索統計への可変参照を返す。
    pub(super) const fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }
}
