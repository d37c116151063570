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

use std::fmt;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::{castling_side::CastlingSide, square::Square};

bitflags! {
    /// Special properties of a move candidate.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct MoveFlags: u8 {
        /// A pawn advancing two rows from its starting row.
        const DOUBLE_PAWN_PUSH = 1 << 0;
        /// A pawn capturing the en passant target beside it.
        const EN_PASSANT = 1 << 1;
        /// The king castling towards the h-file rook.
        const CASTLE_KING_SIDE = 1 << 2;
        /// The king castling towards the a-file rook.
        const CASTLE_QUEEN_SIDE = 1 << 3;
    }
}

/// A move candidate for a given piece: its destination and flags.
///
/// The moving piece is not part of the move. Candidates are produced per
/// piece, so the same value doubles as the hint a presentation layer
/// highlights and submits back.
///
/// For castling, `to` is the square the king lands on.
///
/// # Display
///
/// The destination square, followed by `O-O`, `O-O-O` or `e.p.` for the
/// special moves.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub to: Square,
    pub flags: MoveFlags,
}

impl Move {
    #[inline]
    pub const fn new(to: Square, flags: MoveFlags) -> Move {
        Move { to, flags }
    }

    /// A move without special properties: a plain step or a capture on the
    /// destination square.
    #[inline]
    pub const fn normal(to: Square) -> Move {
        Move::new(to, MoveFlags::empty())
    }

    #[inline]
    pub const fn double_pawn_push(to: Square) -> Move {
        Move::new(to, MoveFlags::DOUBLE_PAWN_PUSH)
    }

    #[inline]
    pub const fn en_passant(to: Square) -> Move {
        Move::new(to, MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn castle(side: CastlingSide, king_to: Square) -> Move {
        Move::new(king_to, side.flag())
    }

    pub const fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub const fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    /// Gets the castling side.
    pub fn castling_side(self) -> Option<CastlingSide> {
        CastlingSide::from_flags(self.flags)
    }

    pub const fn is_castle(self) -> bool {
        self.flags
            .intersects(MoveFlags::CASTLE_KING_SIDE.union(MoveFlags::CASTLE_QUEEN_SIDE))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to)?;
        match self.castling_side() {
            Some(CastlingSide::KingSide) => f.write_str(" O-O"),
            Some(CastlingSide::QueenSide) => f.write_str(" O-O-O"),
            None if self.is_en_passant() => f.write_str(" e.p."),
            None => Ok(()),
        }
    }
}

/// A container for the move candidates of a single piece, stored inline.
///
/// A queen in the center of an empty board has 27 moves, and a king has at
/// most 8 steps plus 2 castles, so the capacity is never exceeded.
pub type MoveList = ArrayVec<Move, 32>;
