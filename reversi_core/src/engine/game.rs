use core::fmt;

use crate::engine::board::{Board, BoardError};
use crate::engine::rules::{LegalMoves, Rules as _};
use crate::engine::types::{Color, Piece, Square};

/// 終局時の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Outcome {
    /// 引き分け。
    Tie,
    /// どちらかの勝ち。
    Win {
        /// 石差。
        margin: u32,
        /// 勝者。
        winner: Color,
    },
}

impl Outcome {
    /// 石数から結果を求める。
    #[inline]
    #[must_use]
    pub const fn from_counts(black: u32, white: u32) -> Self {
        if black > white {
            Self::Win {
                margin: black.wrapping_sub(white),
                winner: Color::Black,
            }
        } else if white > black {
            Self::Win {
                margin: white.wrapping_sub(black),
                winner: Color::White,
            }
        } else {
            Self::Tie
        }
    }
}

impl fmt::Display for Outcome {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Tie => f.write_str("Tie"),
            Self::Win { margin, winner } => write!(f, "{winner} wins by {margin}"),
        }
    }
}

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// 進行中（指定色の手番）。
    InProgress(Color),
    /// 終局（双方とも合法手なし）。
    Terminal(Outcome),
}

/// ある時点のゲーム（盤面＋手番）のスナップショット。
///
/// 値型で、着手は新しい `Game` を返す。石数や終局判定は盤面から都度導出する。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Game {
    /// 現在の盤面。
    board: Board,
    /// 手番。
    current: Color,
}

impl Game {
    /// 現在の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(self) -> Board {
        self.board
    }

    /// 手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(self) -> Color {
        self.current
    }

    /// 初期局面からゲームを開始する。
    #[inline]
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            board: Board::initial(),
            current: Color::Black,
        }
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.board.legal_moves(self.current).is_empty()
            && self.board.legal_moves(self.current.opponent()).is_empty()
    }

    /// 手番側の合法手を返す。
    #[inline]
    #[must_use]
    pub fn legal_moves(self) -> LegalMoves {
        self.board.legal_moves(self.current)
    }

    /// 終局していれば結果を返す。
    #[inline]
    #[must_use]
    pub fn outcome(self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }

        let (black, white) = self.board.counts();
        Some(Outcome::from_counts(black, white))
    }

    /// 指定座標の石を返す。
    ///
    /// # Errors
    ///
    /// 座標が盤外の場合、`BoardError::OutOfRange` を返す。
    #[inline]
    pub fn piece_at(self, x: u8, y: u8) -> Result<Piece, BoardError> {
        self.board.piece_at_xy(x, y)
    }

    /// 手番側が `square` に打った後のゲームを返す（合法手でなければ `None`）。
    #[inline]
    #[must_use]
    pub fn play(self, square: Square) -> Option<Self> {
        let Ok(next) = self.board.apply_move(square, self.current) else {
            return None;
        };

        Some(Self::settle(next, self.current.opponent()))
    }

    /// 指定色の石数を返す。
    #[inline]
    #[must_use]
    pub fn score(self, color: Color) -> u32 {
        self.board.piece_count(Piece::from(color))
    }

    /// `preferred` に打てる手があればその手番、なければ相手番にする。
    ///
    /// 双方とも打てない場合は `preferred` のまま（終局）。
    fn settle(board: Board, preferred: Color) -> Self {
        let current = if board.legal_moves(preferred).is_empty()
            && !board.legal_moves(preferred.opponent()).is_empty()
        {
            preferred.opponent()
        } else {
            preferred
        };

        Self { board, current }
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub fn status(self) -> Status {
        match self.outcome() {
            Some(outcome) => Status::Terminal(outcome),
            None => Status::InProgress(self.current),
        }
    }

    /// 手番側が座標 (x, y) に打つ。
    ///
    /// 合法手でない場合は何もせず、同じ状態を返す。
    ///
    /// # Errors
    ///
    /// 座標が盤外の場合、`BoardError::OutOfRange` を返す。
    #[inline]
    pub fn update_for_move(self, x: u8, y: u8) -> Result<Self, BoardError> {
        match Square::try_from_xy(x, y) {
            Ok(square) => Ok(self.play(square).unwrap_or(self)),
            Err(err) => Err(err.into()),
        }
    }

    /// 任意の盤面と手番からゲームを作る。
    ///
    /// `current` に合法手が無く相手にはある場合、手番は相手に移る。
    #[inline]
    #[must_use]
    pub fn with_board(board: Board, current: Color) -> Self {
        Self::settle(board, current)
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, Outcome, Status};
    use crate::engine::board::{Board, BoardError};
    use crate::engine::types::{Color, Square};

    fn bits(cells: &[(u8, u8)]) -> u64 {
        cells
            .iter()
            .filter_map(|&(x, y)| Square::from_xy(x, y))
            .fold(u64::MIN, |acc, square| acc | square.bit())
    }

    /// 黒が (2,0) に打つと白は打てなくなるが、黒は (2,2) に打てる局面。
    fn skip_board() -> Board {
        Board::from_bitboards(bits(&[(0, 0), (0, 2)]), bits(&[(1, 0), (1, 2)]))
            .unwrap_or_else(|_| Board::initial())
    }

    #[test]
    fn initial_state_is_black_in_progress() {
        let game = Game::initial();
        assert_eq!(game.status(), Status::InProgress(Color::Black));
        assert_eq!(game.score(Color::Black), 2);
        assert_eq!(game.score(Color::White), 2);
        assert!(!game.is_terminal());
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn first_move_passes_turn_to_white() {
        let next = Game::initial().update_for_move(2, 3);
        assert!(next.is_ok());
        let next = next.unwrap_or_else(|_| Game::initial());

        assert_eq!(next.status(), Status::InProgress(Color::White));
        assert_eq!(next.score(Color::Black), 4);
        assert_eq!(next.score(Color::White), 1);
    }

    #[test]
    fn illegal_attempts_leave_state_unchanged() {
        let game = Game::initial();
        // 埋まっているマス
        assert_eq!(game.update_for_move(3, 3), Ok(game));
        // 何も挟めないマス
        assert_eq!(game.update_for_move(0, 0), Ok(game));
        let corner = Square::from_xy(7, 7).unwrap_or_else(|| Square::from_index_unchecked(0));
        assert_eq!(game.play(corner), None);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let game = Game::initial();
        assert_eq!(
            game.update_for_move(8, 1),
            Err(BoardError::OutOfRange { x: 8, y: 1 })
        );
        assert_eq!(game.piece_at(0, 8), Err(BoardError::OutOfRange { x: 0, y: 8 }));
    }

    #[test]
    fn opponent_without_moves_is_skipped() {
        let game = Game::with_board(skip_board(), Color::Black);
        let next = game.update_for_move(2, 0).unwrap_or(game);

        assert_ne!(next, game);
        assert_eq!(next.status(), Status::InProgress(Color::Black));
        assert_eq!(next.current_player(), Color::Black);
    }

    #[test]
    fn game_ends_when_nobody_can_move() {
        let game = Game::with_board(skip_board(), Color::Black);
        let end = game
            .update_for_move(2, 0)
            .and_then(|g| g.update_for_move(2, 2))
            .unwrap_or(game);

        assert!(end.is_terminal());
        assert_eq!(
            end.status(),
            Status::Terminal(Outcome::Win {
                margin: 6,
                winner: Color::Black
            })
        );
        assert_eq!(end.outcome().map(|o| o.to_string()), Some("Black wins by 6".to_owned()));
        // 終局後の着手は無視される
        assert_eq!(end.update_for_move(3, 0), Ok(end));
    }

    #[test]
    fn tie_is_reported_for_equal_counts() {
        let board = Board::from_bitboards(bits(&[(0, 0)]), bits(&[(7, 7)]))
            .unwrap_or_else(|_| Board::initial());
        let game = Game::with_board(board, Color::White);
        assert_eq!(game.status(), Status::Terminal(Outcome::Tie));
        assert_eq!(Outcome::Tie.to_string(), "Tie");
    }

    #[test]
    fn with_board_moves_turn_to_the_side_that_can_play() {
        let board = Board::from_bitboards(bits(&[(0, 0), (1, 0), (2, 0), (0, 2)]), bits(&[(1, 2)]))
            .unwrap_or_else(|_| Board::initial());
        let game = Game::with_board(board, Color::White);
        assert_eq!(game.current_player(), Color::Black);
    }
}
