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

//! The occupancy grid.

use crate::{piece::PieceId, square::Square};

/// An 8x8 grid mapping each square to the id of the piece standing on it.
///
/// The grid only knows ids. Roles and colors live in the
/// [`Registry`](crate::Registry), and a [`Position`](crate::Position) keeps
/// both in agreement.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Board {
    squares: [[Option<PieceId>; 8]; 8],
}

impl Board {
    pub fn empty() -> Board {
        Board::default()
    }

    #[inline]
    pub fn id_at(&self, sq: Square) -> Option<PieceId> {
        let (row, column) = sq.index();
        self.squares[row][column]
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.id_at(sq).is_some()
    }

    /// Puts an id on a square, returning the id that stood there.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, id: PieceId) -> Option<PieceId> {
        let (row, column) = sq.index();
        self.squares[row][column].replace(id)
    }

    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<PieceId> {
        let (row, column) = sq.index();
        self.squares[row][column].take()
    }

    /// Occupied squares, row by row from `a1`.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        Square::all().filter_map(move |sq| self.id_at(sq).map(|id| (sq, id)))
    }

    pub fn count(&self) -> usize {
        self.squares.iter().flatten().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_take() {
        let mut board = Board::empty();
        let d4 = Square::new(4, 4).expect("d4");
        let id = PieceId::new(7).expect("non-zero");

        assert_eq!(board.set(d4, id), None);
        assert_eq!(board.id_at(d4), Some(id));
        assert!(board.is_occupied(d4));
        assert_eq!(board.count(), 1);
        assert_eq!(board.occupied().collect::<Vec<_>>(), [(d4, id)]);

        assert_eq!(board.take(d4), Some(id));
        assert_eq!(board.take(d4), None);
        assert_eq!(board, Board::empty());
    }
}
