//! `tracing` 購読者の初期化。
//!
//! ライブラリ本体はイベントを出すだけで、購読者の設置は組み込み側（UI）が行う。

use core::fmt;

use tracing::Level;

/// 出力形式。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Format {
    /// 1行1イベントの JSON。
    Json,
    /// 人が読むためのテキスト。
    Pretty,
}

/// 購読者の設置に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LoggingError {
    /// すでにグローバル購読者が設置されている。
    AlreadyInstalled,
}

impl fmt::Display for LoggingError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::AlreadyInstalled => f.write_str("a global tracing subscriber is already installed"),
        }
    }
}

impl core::error::Error for LoggingError {}

/// グローバル購読者を設置する。
///
/// # Errors
///
/// すでに購読者が設置されている場合、`LoggingError::AlreadyInstalled` を返す。
#[inline]
pub fn init(format: Format, max_level: Level) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_thread_names(true)
        .with_target(true);

    let installed = match format {
        Format::Json => builder.json().with_current_span(true).try_init(),
        Format::Pretty => builder.try_init(),
    };

    installed.map_err(|_existing| LoggingError::AlreadyInstalled)
}
