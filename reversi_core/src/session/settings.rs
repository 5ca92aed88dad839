use crate::ai::alphabeta::MAX_DEPTH;
use crate::engine::types::Color;

/// 既定の探索深さ（ply）。
const DEFAULT_DEPTH: u8 = 4;

/// セッションの設定（コンピュータの色と探索深さ）。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// コンピュータが持つ色。
    computer: Color,
    /// 探索深さ（1..=`MAX_DEPTH`）。
    depth: u8,
}

impl Settings {
    /// コンピュータの色を返す。
    #[inline]
    #[must_use]
    pub const fn computer(self) -> Color {
        self.computer
    }

    /// 探索深さを返す。
    #[inline]
    #[must_use]
    pub const fn depth(self) -> u8 {
        self.depth
    }

    /// 人間側の色を返す。
    #[inline]
    #[must_use]
    pub const fn human(self) -> Color {
        self.computer.opponent()
    }

    /// コンピュータの色を変更する。
    #[inline]
    #[must_use]
    pub const fn with_computer(self, computer: Color) -> Self {
        Self {
            computer,
            depth: self.depth,
        }
    }

    /// 探索深さを変更する（0 は 1 に、上限を超える値は `MAX_DEPTH` に丸める）。
    #[inline]
    #[must_use]
    pub const fn with_depth(self, depth: u8) -> Self {
        Self {
            computer: self.computer,
            depth: normalize_depth(depth),
        }
    }
}

impl Default for Settings {
    #[inline]
    fn default() -> Self {
        Self {
            computer: Color::White,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// 探索深さを正規化する。
const fn normalize_depth(depth: u8) -> u8 {
    if depth == u8::MIN {
        1
    } else if depth > MAX_DEPTH {
        MAX_DEPTH
    } else {
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_DEPTH, Settings};
    use crate::ai::alphabeta::MAX_DEPTH;
    use crate::engine::types::Color;

    #[test]
    fn default_puts_computer_on_white() {
        let settings = Settings::default();
        assert_eq!(settings.computer(), Color::White);
        assert_eq!(settings.human(), Color::Black);
        assert_eq!(settings.depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn depth_is_normalized() {
        assert_eq!(Settings::default().with_depth(0).depth(), 1);
        assert_eq!(Settings::default().with_depth(200).depth(), MAX_DEPTH);
        assert_eq!(Settings::default().with_depth(6).depth(), 6);
    }
}
