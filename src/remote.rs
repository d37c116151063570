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

//! Moves exchanged with a remote peer.
//!
//! The record carries plain numbers so that any transport can move it
//! around. Enable the `serde` feature to (de)serialize it, for example as
//! JSON with camel case field names.

use std::{error::Error, fmt};

use crate::{
    errors::PlayError,
    m::{Move, MoveFlags},
    piece::PieceId,
    square::Square,
};

/// A move as sent over the wire.
///
/// # Examples
///
/// ```
/// use chessgame::{remote::RemoteMove, Move, PieceId};
///
/// let pawn = PieceId::new(5).expect("non-zero");
/// let hint = Move::double_pawn_push("e4".parse()?);
///
/// let remote = RemoteMove::from_hint(7, pawn, hint, "alice");
/// assert_eq!((remote.row, remote.column), (4, 5));
/// assert_eq!(remote.to_hint(), Ok(hint));
/// # Ok::<_, chessgame::ParseSquareError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RemoteMove {
    pub game_id: u64,
    pub piece_id: u8,
    pub row: u8,
    pub column: u8,
    pub flags: MoveFlags,
    pub mover_id: String,
}

/// A [`RemoteMove`] that does not describe a move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RemoteMoveError {
    InvalidPiece,
    InvalidSquare,
    InvalidFlags,
}

impl fmt::Display for RemoteMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemoteMoveError::InvalidPiece => "invalid piece id in remote move",
            RemoteMoveError::InvalidSquare => "invalid target square in remote move",
            RemoteMoveError::InvalidFlags => "conflicting flags in remote move",
        })
    }
}

impl Error for RemoteMoveError {}

impl From<RemoteMoveError> for PlayError {
    fn from(err: RemoteMoveError) -> PlayError {
        match err {
            RemoteMoveError::InvalidPiece => PlayError::UnknownPiece,
            RemoteMoveError::InvalidSquare | RemoteMoveError::InvalidFlags => {
                PlayError::IllegalMove
            }
        }
    }
}

impl RemoteMove {
    pub fn from_hint(game_id: u64, piece: PieceId, m: Move, mover_id: &str) -> RemoteMove {
        RemoteMove {
            game_id,
            piece_id: piece.get(),
            row: m.to.row(),
            column: m.to.column(),
            flags: m.flags,
            mover_id: mover_id.to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns [`RemoteMoveError::InvalidPiece`] for id 0.
    pub fn piece(&self) -> Result<PieceId, RemoteMoveError> {
        PieceId::new(self.piece_id).ok_or(RemoteMoveError::InvalidPiece)
    }

    /// Converts the record into a hint that can be played.
    ///
    /// # Errors
    ///
    /// Fails if the target square is off the board, or if the flags
    /// contain unknown bits or more than one special property.
    pub fn to_hint(&self) -> Result<Move, RemoteMoveError> {
        let to = Square::new(self.row, self.column).ok_or(RemoteMoveError::InvalidSquare)?;
        if self.flags.bits().count_ones() > 1
            || !MoveFlags::all().contains(self.flags)
        {
            return Err(RemoteMoveError::InvalidFlags);
        }
        Ok(Move::new(to, self.flags))
    }
}
