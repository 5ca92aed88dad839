//! Reversi (Othello) core logic.
//!
//! このクレートは盤面ルールと対局進行を管理する `engine`、手を選択する `ai`、
//! 人間とコンピュータの対局を別スレッドで進める `session` を提供します。
//! 描画や入力は UI 側が担い、`session` が公開する局面を表示します。

#![forbid(unsafe_code)]

/// ゲームルール・盤面・進行を提供するモジュール。
pub mod engine;

/// AI（手選択アルゴリズム）を提供するモジュール。
pub mod ai;

/// `tracing` 購読者の初期化。
pub mod logging;

/// 人間対コンピュータの対局セッション。
pub mod session;
