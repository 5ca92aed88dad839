use crate::engine::board::Board;
use crate::engine::types::{Color, Square};

/// 手を選択するAI。
pub trait Ai {
    /// `color` の手番で次の手を選択する（合法手が無ければ `None`）。
    fn select_move(&mut self, board: Board, color: Color) -> Option<Square>;
}
