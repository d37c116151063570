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

use crate::position::Position;

/// Counts legal move paths of a given length.
///
/// Every legal move of the side to move is played on a private copy of
/// `pos` and taken back again, so a game over position simply ends its
/// branch with no further nodes.
///
/// Pawns always promote to a queen, so the counts match published values
/// only for positions where no promotion is reachable within `depth`.
///
/// # Examples
///
/// ```
/// use chessgame::{perft, Position};
///
/// let pos = Position::default();
/// assert_eq!(perft(&pos, 1), 20);
/// assert_eq!(perft(&pos, 2), 400);
/// assert_eq!(perft(&pos, 3), 8902);
/// ```
pub fn perft(pos: &Position, depth: u32) -> u64 {
    let mut pos = pos.clone();
    walk(&mut pos, depth)
}

fn walk(pos: &mut Position, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let mut nodes = 0;
    for id in pos.pieces().ids_of(pos.turn()) {
        for m in pos.legal_moves(id) {
            if depth == 1 {
                nodes += 1;
            } else if let Some(undo) = pos.do_move(id, m) {
                nodes += walk(pos, depth - 1);
                pos.undo(undo);
            }
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Setup;

    #[test]
    fn test_perft_leaves_position_untouched() {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq -"
            .parse::<Setup>()
            .expect("valid fen")
            .position()
            .expect("legal position");
        let before = pos.clone();
        assert_eq!(perft(&pos, 1), 26);
        assert_eq!(perft(&pos, 2), 568);
        assert_eq!(pos, before);
    }
}
