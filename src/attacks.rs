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

//! Ray directions, jump offsets and the attack scanner.
//!
//! Directions are `(rows, columns)` deltas.
//!
//! # Examples
//!
//! ```
//! use chessgame::{attacks, Color, Position, Square};
//!
//! let pos = Position::default();
//! let f3: Square = "f3".parse()?;
//! assert!(attacks::is_attacked(&pos, f3, Color::White));
//! assert!(!attacks::is_attacked(&pos, f3, Color::Black));
//! # Ok::<_, chessgame::ParseSquareError>(())
//! ```

use crate::{color::Color, position::Position, role::Role, square::Square};

pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// All eight rays, diagonals first.
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

/// Tests if any piece of `by` attacks `sq`.
///
/// Probes the eight rays from `sq`. Along each ray only the first occupied
/// square matters: it either holds an attacker whose movement covers the
/// ray at that distance, or it blocks the ray. The eight knight jumps are
/// probed separately.
///
/// A piece of `by` standing on `sq` itself is not considered, so the scan
/// answers whether a piece of the other side placed there could be taken.
pub fn is_attacked(pos: &Position, sq: Square, by: Color) -> bool {
    ALL_DIRECTIONS
        .iter()
        .any(|&(rows, columns)| ray_attacked(pos, sq, by, rows, columns))
        || KNIGHT_JUMPS.iter().any(|&(rows, columns)| {
            sq.offset(rows, columns)
                .and_then(|from| pos.piece_at(from))
                .is_some_and(|piece| piece.color() == by && piece.role() == Role::Knight)
        })
}

fn ray_attacked(pos: &Position, sq: Square, by: Color, rows: i8, columns: i8) -> bool {
    let diagonal = rows != 0 && columns != 0;
    let mut cursor = sq;
    let mut distance = 0;

    while let Some(next) = cursor.offset(rows, columns) {
        cursor = next;
        distance += 1;

        if let Some(piece) = pos.piece_at(cursor) {
            return piece.color() == by
                && covers(piece.role(), by, rows, diagonal, distance);
        }
    }

    false
}

/// Whether a piece found `distance` squares away along a ray attacks back
/// down that ray. `rows` is the ray's row delta seen from the target.
fn covers(role: Role, by: Color, rows: i8, diagonal: bool, distance: u8) -> bool {
    match role {
        // The pawn stands one row behind the target in its own forward
        // direction.
        Role::Pawn => diagonal && distance == 1 && rows == -by.forward(),
        Role::Knight => false,
        Role::Bishop => diagonal,
        Role::Rook => !diagonal,
        Role::Queen => true,
        Role::King => distance == 1,
    }
}
