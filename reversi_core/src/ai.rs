/// アルファベータ探索AI。
pub mod alphabeta;
/// 合法手からランダムに1手選ぶAI。
pub mod random;
pub mod types;

pub type SearchOutcome = alphabeta::SearchOutcome;

pub use types::Ai;
