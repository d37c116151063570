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

use std::{error::Error, fmt};

use crate::color::Color;

/// Reason a selection or move was declined.
///
/// A declined request never changes the game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PlayError {
    /// The piece belongs to the side not to move.
    NotPlayersTurn,
    /// The move is not among the selected piece's legal moves.
    IllegalMove,
    /// The game has already ended.
    GameOver,
    /// No piece is selected.
    NoSelection,
    /// No piece with this id is on the board.
    UnknownPiece,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayError::NotPlayersTurn => "piece does not belong to the side to move",
            PlayError::IllegalMove => "illegal move",
            PlayError::GameOver => "game is already over",
            PlayError::NoSelection => "no piece selected",
            PlayError::UnknownPiece => "no such piece on the board",
        })
    }
}

impl Error for PlayError {}

/// Reason a [`Setup`](crate::Setup) is not a legal position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PositionError {
    MissingKing { color: Color },
    TooManyKings { color: Color },
    PawnsOnBackrank,
    /// The en passant target is not a pawn of the side not to move that
    /// just double pushed.
    InvalidEpSquare,
    /// The side not to move is in check.
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::MissingKing { color } => write!(f, "{color} has no king"),
            PositionError::TooManyKings { color } => write!(f, "{color} has more than one king"),
            PositionError::PawnsOnBackrank => f.write_str("pawns on backrank"),
            PositionError::InvalidEpSquare => f.write_str("invalid en passant target"),
            PositionError::OppositeCheck => f.write_str("side not to move is in check"),
        }
    }
}

impl Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(PlayError::GameOver.to_string(), "game is already over");
        assert_eq!(
            PositionError::MissingKing { color: Color::Black }.to_string(),
            "black has no king"
        );
    }
}
