use core::fmt;
use core::iter::FusedIterator;

use crate::engine::types::{Color, Piece, Square};

/// 着手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ApplyMoveError {
    /// 指定マスが合法手ではない。
    IllegalMove,
}

impl fmt::Display for ApplyMoveError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IllegalMove => f.write_str("move does not capture any disc"),
        }
    }
}

impl core::error::Error for ApplyMoveError {}

/// 盤面ルールの操作一式。
///
/// `Game` と探索AIはこのトレイト越しに盤面を扱う。実装は値型で、
/// どの操作も受け取った盤面を書き換えずに新しい値を返す。
pub trait Rules: Copy {
    /// `color` の石を `square` に置き、挟んだ石を裏返した盤面を返す。
    ///
    /// # Errors
    ///
    /// 指定マスが合法手でない場合、`ApplyMoveError::IllegalMove` を返す。
    fn apply_move(self, square: Square, color: Color) -> Result<Self, ApplyMoveError>;

    /// `color` が `square` に打てるかを返す。
    fn is_legal_move(self, square: Square, color: Color) -> bool;

    /// `color` の合法手を行優先順（y 昇順、x 昇順）で返す。
    fn legal_moves(self, color: Color) -> LegalMoves;

    /// 指定マスの状態を返す。
    fn piece_at(self, square: Square) -> Piece;

    /// 指定状態のマス数を返す。
    fn piece_count(self, piece: Piece) -> u32;
}

/// 合法手の列（1回だけ走査できる）。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegalMoves {
    /// 未走査の合法手ビットボード。
    bits: u64,
}

impl LegalMoves {
    /// 未走査の合法手ビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// 指定マスが残っているかを返す。
    #[inline]
    #[must_use]
    pub fn contains(&self, square: Square) -> bool {
        self.bits & square.bit() != u64::MIN
    }

    /// ビットボードから生成する。
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// 合法手が1つも残っていないかを返す。
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == u64::MIN
    }
}

impl Iterator for LegalMoves {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.bits == u64::MIN {
            return None;
        }

        let index = u8::try_from(self.bits.trailing_zeros()).unwrap_or(u8::MAX);
        self.bits &= self.bits.wrapping_sub(1);
        Some(Square::from_index_unchecked(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::try_from(self.bits.count_ones()).unwrap_or(usize::MAX);
        (len, Some(len))
    }
}

impl ExactSizeIterator for LegalMoves {}

impl FusedIterator for LegalMoves {}

#[cfg(test)]
mod tests {
    use super::LegalMoves;
    use crate::engine::types::Square;

    #[test]
    fn legal_moves_iterate_in_row_major_order() {
        let a = Square::from_xy(6, 0);
        let b = Square::from_xy(1, 2);
        let c = Square::from_xy(0, 7);
        let bits = [a, b, c]
            .into_iter()
            .flatten()
            .fold(u64::MIN, |acc, square| acc | square.bit());

        let moves = LegalMoves::from_bits(bits);
        assert_eq!(moves.len(), 3);
        let collected: Vec<Square> = moves.collect();
        let expected: Vec<Square> = [a, b, c].into_iter().flatten().collect();
        assert_eq!(collected, expected);
    }

    #[test]
    fn legal_moves_are_single_pass() {
        let mut moves = LegalMoves::from_bits(0b11);
        assert!(!moves.is_empty());
        assert!(moves.next().is_some());
        assert!(moves.next().is_some());
        assert!(moves.next().is_none());
        assert!(moves.is_empty());
        assert!(moves.next().is_none());
    }
}
