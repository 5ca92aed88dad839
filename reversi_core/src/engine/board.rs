use core::fmt;

use crate::engine::rules::{ApplyMoveError, LegalMoves, Rules};
use crate::engine::types::{Color, OutOfRange, Piece, Square};

/// A列（x = 0）のマスク。
const FILE_A: u64 = 0x0101_0101_0101_0101;

/// H列（x = 7）のマスク。
const FILE_H: u64 = 0x8080_8080_8080_8080;

/// 1方向に連続し得る相手石の最大数から、最初の1個を除いた数。
const RUN_EXTEND_STEPS: u8 = 5;

/// 初期配置の黒石（(4, 3) と (3, 4)）。
const START_BLACK: u64 = 0x0000_0008_1000_0000;

/// 初期配置の白石（(3, 3) と (4, 4)）。
const START_WHITE: u64 = 0x0000_0010_0800_0000;

/// 8方向。
const DIRECTIONS: [Direction; 8] = [
    Direction::up(1, !FILE_H),
    Direction::up(7, !FILE_A),
    Direction::up(8, u64::MAX),
    Direction::up(9, !FILE_H),
    Direction::down(1, !FILE_A),
    Direction::down(7, !FILE_H),
    Direction::down(8, u64::MAX),
    Direction::down(9, !FILE_A),
];

/// 盤面の生成・参照に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum BoardError {
    /// 座標が盤外。
    OutOfRange {
        /// 指定された x 座標。
        x: u8,
        /// 指定された y 座標。
        y: u8,
    },
    /// 黒と白が同じマスを占有している。
    Overlap {
        /// 重複しているマスのビットボード。
        cells: u64,
    },
}

impl From<OutOfRange> for BoardError {
    #[inline]
    fn from(err: OutOfRange) -> Self {
        Self::OutOfRange { x: err.x, y: err.y }
    }
}

impl fmt::Display for BoardError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::OutOfRange { x, y } => write!(f, "({x}, {y}) is outside the 8x8 board"),
            Self::Overlap { cells } => write!(f, "cells {cells:#018x} hold both colors"),
        }
    }
}

impl core::error::Error for BoardError {}

/// 8×8 の盤面（黒と白のビットボード）。
///
/// 値型で、着手は常に新しい `Board` を返す。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// 黒石のビットボード。
    black: u64,
    /// 白石のビットボード。
    white: u64,
}

impl Board {
    /// 黒石のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn black(self) -> u64 {
        self.black
    }

    /// 石を指定色と相手色に振り分けて返す。
    const fn by_color(self, color: Color) -> (u64, u64) {
        match color {
            Color::Black => (self.black, self.white),
            Color::White => (self.white, self.black),
        }
    }

    /// 石数（黒、白）を返す。
    #[inline]
    #[must_use]
    pub const fn counts(self) -> (u32, u32) {
        (self.black.count_ones(), self.white.count_ones())
    }

    /// 空きマス数を返す。
    #[inline]
    #[must_use]
    pub const fn empty_count(self) -> u32 {
        self.occupied().count_zeros()
    }

    /// 生のビットボードから盤面を生成する。
    ///
    /// # Errors
    ///
    /// 同じマスに黒と白の両方が立っている場合、`BoardError::Overlap` を返す。
    #[inline]
    pub const fn from_bitboards(black: u64, white: u64) -> Result<Self, BoardError> {
        let cells = black & white;
        if cells != u64::MIN {
            return Err(BoardError::Overlap { cells });
        }

        Ok(Self { black, white })
    }

    /// 初期盤面（中央に黒白2個ずつ）を返す。
    #[inline]
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            black: START_BLACK,
            white: START_WHITE,
        }
    }

    /// 座標指定で合法手かを返す。
    ///
    /// # Errors
    ///
    /// 座標が盤外の場合、`BoardError::OutOfRange` を返す。
    #[inline]
    pub fn is_legal_move_xy(self, x: u8, y: u8, color: Color) -> Result<bool, BoardError> {
        match Square::try_from_xy(x, y) {
            Ok(square) => Ok(self.is_legal_move(square, color)),
            Err(err) => Err(err.into()),
        }
    }

    /// 指定色の合法手ビットボードを返す。
    #[inline]
    #[must_use]
    pub fn legal_bits(self, color: Color) -> u64 {
        let (player, opponent) = self.by_color(color);
        let empty = !(player | opponent);

        DIRECTIONS.iter().fold(u64::MIN, |acc, dir| {
            acc | dir.landing_squares(player, opponent, empty)
        })
    }

    /// 盤面の占有ビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn occupied(self) -> u64 {
        self.black | self.white
    }

    /// 座標指定でマスの状態を返す。
    ///
    /// # Errors
    ///
    /// 座標が盤外の場合、`BoardError::OutOfRange` を返す。
    #[inline]
    pub fn piece_at_xy(self, x: u8, y: u8) -> Result<Piece, BoardError> {
        match Square::try_from_xy(x, y) {
            Ok(square) => Ok(self.piece_at(square)),
            Err(err) => Err(err.into()),
        }
    }

    /// 白石のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn white(self) -> u64 {
        self.white
    }
}

impl Rules for Board {
    #[inline]
    fn apply_move(self, square: Square, color: Color) -> Result<Self, ApplyMoveError> {
        let (player, opponent) = self.by_color(color);
        let placed = square.bit();
        if (player | opponent) & placed != u64::MIN {
            return Err(ApplyMoveError::IllegalMove);
        }

        let flipped = DIRECTIONS.iter().fold(u64::MIN, |acc, dir| {
            acc | dir.captures(player, opponent, placed)
        });
        if flipped == u64::MIN {
            return Err(ApplyMoveError::IllegalMove);
        }

        let next_player = player | placed | flipped;
        let next_opponent = opponent & !flipped;

        Ok(match color {
            Color::Black => Self {
                black: next_player,
                white: next_opponent,
            },
            Color::White => Self {
                black: next_opponent,
                white: next_player,
            },
        })
    }

    #[inline]
    fn is_legal_move(self, square: Square, color: Color) -> bool {
        self.legal_bits(color) & square.bit() != u64::MIN
    }

    #[inline]
    fn legal_moves(self, color: Color) -> LegalMoves {
        LegalMoves::from_bits(self.legal_bits(color))
    }

    #[inline]
    fn piece_at(self, square: Square) -> Piece {
        let mask = square.bit();
        if self.black & mask != u64::MIN {
            Piece::Black
        } else if self.white & mask != u64::MIN {
            Piece::White
        } else {
            Piece::Empty
        }
    }

    #[inline]
    fn piece_count(self, piece: Piece) -> u32 {
        match piece {
            Piece::Black => self.black.count_ones(),
            Piece::Empty => self.empty_count(),
            Piece::White => self.white.count_ones(),
        }
    }
}

impl fmt::Display for Board {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::with_capacity(72);
        for y in u8::MIN..Square::BOARD_LEN {
            for x in u8::MIN..Square::BOARD_LEN {
                let piece = Square::from_xy(x, y).map_or(Piece::Empty, |sq| self.piece_at(sq));
                text.push(match piece {
                    Piece::Black => 'X',
                    Piece::Empty => '.',
                    Piece::White => 'O',
                });
            }
            text.push('\n');
        }
        f.write_str(&text)
    }
}

/// 盤面上の1方向（シフト量と、盤端を越えるビットを落とすマスク）。
#[derive(Copy, Clone, Debug)]
struct Direction {
    /// シフト前に適用するマスク。
    mask: u64,
    /// シフト量。
    shift: u32,
    /// 上位ビット側へ進むなら `true`。
    toward_msb: bool,
}

impl Direction {
    /// `placed` から見てこの方向で挟める相手石を返す（挟めなければ0）。
    fn captures(self, player: u64, opponent: u64, placed: u64) -> u64 {
        let mut run = u64::MIN;
        let mut cursor = self.step(placed);
        while cursor & opponent != u64::MIN {
            run |= cursor;
            cursor = self.step(cursor);
        }

        if cursor & player == u64::MIN {
            return u64::MIN;
        }
        run
    }

    /// 下位ビット側へ進む方向。
    const fn down(shift: u32, mask: u64) -> Self {
        Self {
            mask,
            shift,
            toward_msb: false,
        }
    }

    /// 自石から相手石の列を越えた先の空きマス（この方向の着手候補）を返す。
    fn landing_squares(self, player: u64, opponent: u64, empty: u64) -> u64 {
        let mut run = self.step(player) & opponent;
        for _ in u8::MIN..RUN_EXTEND_STEPS {
            run |= self.step(run) & opponent;
        }
        self.step(run) & empty
    }

    /// 1マス進める。
    const fn step(self, bb: u64) -> u64 {
        let kept = bb & self.mask;
        if self.toward_msb {
            kept.wrapping_shl(self.shift)
        } else {
            kept.wrapping_shr(self.shift)
        }
    }

    /// 上位ビット側へ進む方向。
    const fn up(shift: u32, mask: u64) -> Self {
        Self {
            mask,
            shift,
            toward_msb: true,
        }
    }
}
