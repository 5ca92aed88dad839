/// 盤面（ビットボード）と合法手/反転処理の実装。
pub mod board;
/// ゲーム進行（手番、パス、終局判定）の実装。
pub mod game;
/// 盤面ルールのトレイトと合法手の列。
pub mod rules;
pub mod types;

pub type Board = board::Board;
pub type BoardError = board::BoardError;
pub type Color = types::Color;
pub type Game = game::Game;
pub type GameStatus = game::Status;
pub type LegalMoves = rules::LegalMoves;
pub type Outcome = game::Outcome;
pub type Piece = types::Piece;
pub type Square = types::Square;

pub use rules::Rules;
