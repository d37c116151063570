// This file is part of the chessgame library.
// Copyright (C) 2026 chessgame contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{error::Error, fmt, str::FromStr};

/// A square of the 8x8 board, addressed by `row` and `column`, both
/// counting from 1.
///
/// Column 1 is the a-file and row 1 is white's back rank, so the square
/// displays as `a1`.
///
/// # Examples
///
/// ```
/// use chessgame::Square;
///
/// let sq = Square::new(4, 5).expect("on the board");
/// assert_eq!(sq.to_string(), "e4");
/// assert_eq!("e4".parse(), Ok(sq));
///
/// assert_eq!(Square::new(9, 1), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Coordinates"))]
pub struct Square {
    row: u8,
    column: u8,
}

/// Unchecked wire form of a [`Square`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Coordinates {
    row: u8,
    column: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<Coordinates> for Square {
    type Error = ParseSquareError;

    fn try_from(Coordinates { row, column }: Coordinates) -> Result<Square, ParseSquareError> {
        Square::new(row, column).ok_or(ParseSquareError)
    }
}

impl Square {
    /// Gets the square at the given coordinates, or `None` if either is
    /// outside `1..=8`.
    #[inline]
    pub const fn new(row: u8, column: u8) -> Option<Square> {
        if row >= 1 && row <= 8 && column >= 1 && column <= 8 {
            Some(Square { row, column })
        } else {
            None
        }
    }

    /// Coordinates known to be on the board.
    #[inline]
    pub(crate) const fn at(row: u8, column: u8) -> Square {
        debug_assert!(row >= 1 && row <= 8 && column >= 1 && column <= 8);
        Square { row, column }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Steps by the given deltas, returning `None` past the board edge.
    #[inline]
    pub fn offset(self, rows: i8, columns: i8) -> Option<Square> {
        let row = i16::from(self.row) + i16::from(rows);
        let column = i16::from(self.column) + i16::from(columns);
        if (1..=8).contains(&row) && (1..=8).contains(&column) {
            Some(Square::at(row as u8, column as u8))
        } else {
            None
        }
    }

    /// Chebyshev distance, the number of king steps between two squares.
    pub fn distance(self, other: Square) -> u8 {
        self.row
            .abs_diff(other.row)
            .max(self.column.abs_diff(other.column))
    }

    pub fn file_char(self) -> char {
        char::from(b'a' + self.column - 1)
    }

    pub fn rank_char(self) -> char {
        char::from(b'1' + self.row - 1)
    }

    /// Array indices into a row-major grid.
    #[inline]
    pub(crate) fn index(self) -> (usize, usize) {
        (usize::from(self.row - 1), usize::from(self.column - 1))
    }

    /// All 64 squares, row by row from `a1` to `h8`.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=8).flat_map(|row| (1..=8).map(move |column| Square::at(row, column)))
    }

    /// Parses a square name like `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Square::at(rank - b'1' + 1, file - b'a' + 1))
            }
            _ => Err(ParseSquareError),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file_char().to_ascii_uppercase(),
            self.rank_char()
        )
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}
