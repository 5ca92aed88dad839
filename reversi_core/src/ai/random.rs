use crate::ai::types::Ai;
use crate::engine::board::Board;
use crate::engine::rules::Rules as _;
use crate::engine::types::{Color, Square};

/// 64-bit 線形合同法 (LCG) の簡易 RNG。
/// - rand クレート不使用
/// - `seed` で決定的に再現可能
#[derive(Debug, Clone, Copy)]
struct Lcg64 {
    /// 内部状態。
    state: u64,
}

impl Lcg64 {
    /// LCG の内部状態を `seed` から初期化する。
    #[inline]
    const fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// 次の u32 を生成する（上位 32bit を返す）。
    #[inline]
    fn next_u32(&mut self) -> u32 {
        const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
        const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);

        u32::try_from(self.state >> 32).unwrap_or(u32::MAX)
    }
}

/// 合法手からランダムに1手を選択するAI。
///
/// 自己対戦テストとベンチマークの相手役。
#[derive(Debug)]
#[non_exhaustive]
pub struct Agent {
    /// 乱数生成器。
    rng: Lcg64,
}

impl Agent {
    /// `seed` を用いて初期化する。
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            rng: Lcg64::new(seed),
        }
    }
}

impl Ai for Agent {
    #[inline]
    fn select_move(&mut self, board: Board, color: Color) -> Option<Square> {
        let mut moves = board.legal_moves(color);
        let count = u64::try_from(moves.len()).unwrap_or(u64::MAX);
        if count == u64::MIN {
            return None;
        }

        // [0, count) へ写像する（乗算して上位 32bit を取る）。
        let scaled = u64::from(self.rng.next_u32()).wrapping_mul(count) >> 32;
        let skip = usize::try_from(scaled).unwrap_or(usize::MIN);
        moves.nth(skip)
    }
}

#[cfg(test)]
mod tests {
    use super::Agent;
    use crate::ai::types::Ai as _;
    use crate::engine::board::Board;
    use crate::engine::rules::Rules as _;
    use crate::engine::types::Color;

    #[test]
    fn same_seed_gives_same_moves() {
        let board = Board::initial();
        let mut a = Agent::new(7);
        let mut b = Agent::new(7);
        for _ in 0_u8..16 {
            assert_eq!(
                a.select_move(board, Color::Black),
                b.select_move(board, Color::Black)
            );
        }
    }

    #[test]
    fn picks_only_legal_moves() {
        let board = Board::initial();
        let mut agent = Agent::new(3);
        for _ in 0_u8..32 {
            let choice = agent.select_move(board, Color::White);
            assert!(choice.is_some_and(|sq| board.is_legal_move(sq, Color::White)));
        }
    }

    #[test]
    fn returns_none_without_moves() {
        let board = Board::from_bitboards(u64::MAX, u64::MIN).unwrap_or_else(|_| Board::initial());
        assert_eq!(Agent::new(1).select_move(board, Color::White), None);
    }
}
