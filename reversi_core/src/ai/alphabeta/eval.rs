use crate::engine::rules::Rules;
use crate::engine::types::{Color, Piece, Square};

use super::DISC_SCALE;

/// 4隅。
const CORNERS: [Square; 4] = [
    Square::from_index_unchecked(0),
    Square::from_index_unchecked(7),
    Square::from_index_unchecked(56),
    Square::from_index_unchecked(63),
];

/// 各隅の斜め内側（X打ち）のマス。`CORNERS` と同じ並び。
const X_SQUARES: [Square; 4] = [
    Square::from_index_unchecked(9),
    Square::from_index_unchecked(14),
    Square::from_index_unchecked(49),
    Square::from_index_unchecked(54),
];

/// 非終局の評価関数（`side` 視点）。
///
/// 序盤は隅とモビリティ、終盤ほど石差を重く見る。石差はどの段階でも必ず加味する。
pub(super) fn evaluate<R: Rules>(board: R, side: Color) -> i32 {
    let empty = board.piece_count(Piece::Empty);
    let opponent = side.opponent();

    let material = diff_i32(
        board.piece_count(Piece::from(side)),
        board.piece_count(Piece::from(opponent)),
    );
    let corners = diff_i32(corner_count(board, side), corner_count(board, opponent));
    let x_squares = diff_i32(
        exposed_x_square_count(board, side),
        exposed_x_square_count(board, opponent),
    );
    let mobility = diff_i32(mobility(board, side), mobility(board, opponent));

    let (w_corner, w_x_square, w_mobility, w_material) = if empty > 44 {
        (30_i32, 12_i32, 5_i32, 1_i32)
    } else if empty > 20 {
        (30_i32, 8_i32, 3_i32, 1_i32)
    } else {
        (20_i32, 2_i32, 1_i32, 5_i32)
    };

    let mut score: i32 = 0;
    score = score.wrapping_add(corners.wrapping_mul(w_corner));
    score = score.wrapping_sub(x_squares.wrapping_mul(w_x_square));
    score = score.wrapping_add(mobility.wrapping_mul(w_mobility));
    score = score.wrapping_add(material.wrapping_mul(w_material));
    score
}

/// 終局時（双方とも打てない）の評価（`side` 視点）。
pub(super) fn terminal_score<R: Rules>(board: R, side: Color) -> i32 {
    let diff = diff_i32(
        board.piece_count(Piece::from(side)),
        board.piece_count(Piece::from(side.opponent())),
    );
    diff.wrapping_mul(DISC_SCALE)
}

/// `color` が取っている隅の数。
fn corner_count<R: Rules>(board: R, color: Color) -> u32 {
    let piece = Piece::from(color);
    let owned = CORNERS
        .iter()
        .filter(|&&corner| board.piece_at(corner) == piece)
        .count();
    u32::try_from(owned).unwrap_or(u32::MAX)
}

/// 隅が空いたまま `color` が打っている X 打ちの数。
fn exposed_x_square_count<R: Rules>(board: R, color: Color) -> u32 {
    let piece = Piece::from(color);
    let exposed = CORNERS
        .iter()
        .zip(X_SQUARES.iter())
        .filter(|&(&corner, &x_square)| {
            board.piece_at(corner) == Piece::Empty && board.piece_at(x_square) == piece
        })
        .count();
    u32::try_from(exposed).unwrap_or(u32::MAX)
}

/// 合法手数。
fn mobility<R: Rules>(board: R, color: Color) -> u32 {
    u32::try_from(board.legal_moves(color).len()).unwrap_or(u32::MAX)
}

/// `u32` 同士の差を `i32` として返す。
fn diff_i32(lhs: u32, rhs: u32) -> i32 {
    let ai = i32::try_from(lhs).unwrap_or(i32::MAX);
    let bi = i32::try_from(rhs).unwrap_or(i32::MAX);
    ai.wrapping_sub(bi)
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::engine::board::Board;
    use crate::engine::types::{Color, Square};

    fn row_three(len: u8) -> Board {
        let black = (u8::MIN..len)
            .filter_map(|x| Square::from_xy(x, 3))
            .fold(u64::MIN, |acc, square| acc | square.bit());
        Board::from_bitboards(black, u64::MIN).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn more_discs_score_higher_in_the_opening() {
        // 双方とも合法手・隅・X打ちなし、空きマスは44より多い。
        let five = evaluate(row_three(5), Color::Black);
        let one = evaluate(row_three(1), Color::Black);
        assert!(five > one, "five={five} one={one}");
        assert!(one > 0);
        assert!(evaluate(row_three(5), Color::White) < 0);
    }
}
