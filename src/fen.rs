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

//! Read positions in Forsyth-Edwards-Notation.
//!
//! Only the placement, turn, castling and en passant fields are
//! interpreted. Move counters, if present, are ignored.
//!
//! # Examples
//!
//! ```
//! use chessgame::{Color, Setup};
//!
//! let setup: Setup = "r3k2r/8/8/8/8/8/8/R3K2R b Kq -".parse()?;
//! assert_eq!(setup.turn, Color::Black);
//!
//! let pos = setup.position().expect("legal position");
//! assert_eq!(pos.board_fen(), "r3k2r/8/8/8/8/8/8/R3K2R");
//! # Ok::<_, chessgame::fen::ParseFenError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    castling_side::CastlingSide,
    color::Color,
    role::Role,
    setup::Setup,
    square::Square,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidFen,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid en passant part in fen",
            ParseFenError::InvalidFen => "invalid fen",
        })
    }
}

impl Error for ParseFenError {}

impl Setup {
    /// Parses a FEN.
    ///
    /// Castling rights become `moved` flags: kings and rooks are marked as
    /// moved unless a castling letter names them, pawns count as moved off
    /// their starting row.
    ///
    /// # Errors
    ///
    /// Fails on malformed fields, or if a castling letter names a king or
    /// rook that is not on its home square.
    pub fn from_fen(fen: &str) -> Result<Setup, ParseFenError> {
        let mut parts = fen.split_ascii_whitespace();

        let mut setup = parse_board(parts.next().ok_or(ParseFenError::InvalidFen)?)?;

        if let Some(turn) = parts.next() {
            setup.turn = match turn.as_bytes() {
                [ch] => Color::from_char(char::from(*ch)).ok_or(ParseFenError::InvalidTurn)?,
                _ => return Err(ParseFenError::InvalidTurn),
            };
        }

        setup.for_each_mut(|square, color, role, moved| {
            *moved = match role {
                Role::King | Role::Rook => true,
                Role::Pawn => square.row() != color.pawn_rank(),
                Role::Knight | Role::Bishop | Role::Queen => false,
            };
        });

        if let Some(castling) = parts.next() {
            parse_castling(&mut setup, castling)?;
        }

        if let Some(ep) = parts.next() {
            if ep != "-" {
                let skipped =
                    Square::from_ascii(ep.as_bytes()).map_err(|_| ParseFenError::InvalidEpSquare)?;
                if skipped.row() != setup.turn.fold(6, 3) {
                    return Err(ParseFenError::InvalidEpSquare);
                }
                setup.ep_target = skipped.offset(-setup.turn.forward(), 0);
            }
        }

        // halfmove clock and fullmove number
        if parts.nth(2).is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(setup)
    }
}

impl FromStr for Setup {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Setup, ParseFenError> {
        Setup::from_fen(s)
    }
}

fn parse_board(board: &str) -> Result<Setup, ParseFenError> {
    let mut setup = Setup::empty();
    let mut rows = 0;

    for (rank, row) in board.split('/').zip((1..=8).rev()) {
        rows += 1;
        let mut column = 1;

        for ch in rank.chars() {
            if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(ParseFenError::InvalidBoard);
                }
                column += empty as u8;
            } else {
                let role = Role::from_char(ch).ok_or(ParseFenError::InvalidBoard)?;
                let color = Color::from_white(ch.is_ascii_uppercase());
                let square = Square::new(row, column).ok_or(ParseFenError::InvalidBoard)?;
                setup.put(square, color, role);
                column += 1;
            }

            if column > 9 {
                return Err(ParseFenError::InvalidBoard);
            }
        }

        if column != 9 {
            return Err(ParseFenError::InvalidBoard);
        }
    }

    if rows != 8 || board.split('/').count() != 8 {
        return Err(ParseFenError::InvalidBoard);
    }

    Ok(setup)
}

fn parse_castling(setup: &mut Setup, castling: &str) -> Result<(), ParseFenError> {
    if castling == "-" {
        return Ok(());
    }

    for ch in castling.chars() {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let side = match ch.to_ascii_lowercase() {
            'k' => CastlingSide::KingSide,
            'q' => CastlingSide::QueenSide,
            _ => return Err(ParseFenError::InvalidCastling),
        };

        let king = Square::at(color.backrank(), 5);
        let rook = side.rook_from(color);
        if setup.piece_at(king) != Some((color, Role::King))
            || setup.piece_at(rook) != Some((color, Role::Rook))
        {
            return Err(ParseFenError::InvalidCastling);
        }

        setup.set_moved(king, false).set_moved(rook, false);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_starting_fen_matches_default_placement() {
        let setup: Setup = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        let pos = setup.position().expect("legal position");
        assert_eq!(pos.board_fen(), crate::Position::default().board_fen());
        assert!(pos.pieces().iter().all(|piece| !piece.has_moved()));
    }

    #[test]
    fn test_castling_rights_become_moved_flags() {
        let pos = "r3k2r/8/8/8/8/8/P7/R3K2R w Kq -"
            .parse::<Setup>()
            .expect("valid fen")
            .position()
            .expect("legal position");
        let moved = |name: &str| pos.piece_at(sq(name)).expect("piece").has_moved();

        assert!(!moved("e1"));
        assert!(!moved("h1"));
        assert!(moved("a1"));
        assert!(!moved("e8"));
        assert!(!moved("a8"));
        assert!(moved("h8"));
        assert!(!moved("a2"));
    }

    #[test]
    fn test_ep_square_names_skipped_square() {
        let setup: Setup = "4k3/8/8/8/3pP3/8/8/4K3 b - e3".parse().expect("valid fen");
        assert_eq!(setup.ep_target, Some(sq("e4")));

        assert_eq!(
            "4k3/8/8/8/3pP3/8/8/4K3 b - e6".parse::<Setup>(),
            Err(ParseFenError::InvalidEpSquare)
        );
    }

    #[test]
    fn test_invalid_fens() {
        assert_eq!("".parse::<Setup>(), Err(ParseFenError::InvalidFen));
        assert_eq!(
            "8/8/8/8/8/8/8 w - -".parse::<Setup>(),
            Err(ParseFenError::InvalidBoard)
        );
        assert_eq!(
            "9/8/8/8/8/8/8/8 w - -".parse::<Setup>(),
            Err(ParseFenError::InvalidBoard)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 x - -".parse::<Setup>(),
            Err(ParseFenError::InvalidTurn)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w K -".parse::<Setup>(),
            Err(ParseFenError::InvalidCastling)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra".parse::<Setup>(),
            Err(ParseFenError::InvalidFen)
        );
    }
}
