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

use std::ops;

use crate::{color::Color, m::MoveFlags, square::Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// Column delta pointing from the king towards the rook.
    #[inline]
    pub const fn step(self) -> i8 {
        match self {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => -1,
        }
    }

    /// The column the rook starts on.
    pub const fn rook_from_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 8,
            CastlingSide::QueenSide => 1,
        }
    }

    pub const fn king_to_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 3,
        }
    }

    /// The column next to the castled king, on the side it came from.
    pub const fn rook_to_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 4,
        }
    }

    pub fn rook_from(self, color: Color) -> Square {
        Square::at(color.backrank(), self.rook_from_column())
    }

    pub fn king_to(self, color: Color) -> Square {
        Square::at(color.backrank(), self.king_to_column())
    }

    pub fn rook_to(self, color: Color) -> Square {
        Square::at(color.backrank(), self.rook_to_column())
    }

    /// The move flag marking a castle to this side.
    pub const fn flag(self) -> MoveFlags {
        match self {
            CastlingSide::KingSide => MoveFlags::CASTLE_KING_SIDE,
            CastlingSide::QueenSide => MoveFlags::CASTLE_QUEEN_SIDE,
        }
    }

    /// Reads the castling side from move flags. King side wins if both are
    /// set.
    pub fn from_flags(flags: MoveFlags) -> Option<CastlingSide> {
        if flags.contains(MoveFlags::CASTLE_KING_SIDE) {
            Some(CastlingSide::KingSide)
        } else if flags.contains(MoveFlags::CASTLE_QUEEN_SIDE) {
            Some(CastlingSide::QueenSide)
        } else {
            None
        }
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}
