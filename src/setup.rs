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

use crate::{
    board::Board,
    color::{ByColor, Color},
    errors::PositionError,
    piece::{Piece, PieceId, Registry},
    position::Position,
    role::Role,
    square::Square,
};

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// A not necessarily legal position.
///
/// Pieces receive ids in the order they were put, starting at 1.
///
/// # Examples
///
/// ```
/// use chessgame::{Color, Role, Setup, Square};
///
/// let mut setup = Setup::empty();
/// setup
///     .put("e1".parse()?, Color::White, Role::King)
///     .put("e8".parse()?, Color::Black, Role::King)
///     .put("a7".parse()?, Color::White, Role::Pawn);
///
/// let pos = setup.position().expect("legal position");
/// assert_eq!(pos.pieces().len(), 3);
/// # Ok::<_, chessgame::ParseSquareError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Setup {
    placements: Vec<Placement>,

    /// Side to move.
    pub turn: Color,

    /// Square of the pawn that just double pushed and may be taken en
    /// passant by the side to move.
    pub ep_target: Option<Square>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Placement {
    square: Square,
    color: Color,
    role: Role,
    moved: bool,
}

impl Default for Setup {
    /// The standard starting layout.
    ///
    /// Ids run over the white pawns from the a-file, the white back rank
    /// from the a-file, the black pawns from the a-file, then the black back
    /// rank from the h-file. Remote peers rely on this numbering.
    fn default() -> Setup {
        let mut setup = Setup::empty();

        for color in Color::ALL {
            for column in 1..=8 {
                setup.put(Square::at(color.pawn_rank(), column), color, Role::Pawn);
            }

            for step in 0..8 {
                let column = color.fold(1 + step, 8 - step);
                let role = BACKRANK[usize::from(column - 1)];
                setup.put(Square::at(color.backrank(), column), color, role);
            }
        }

        setup
    }
}

impl Setup {
    pub fn empty() -> Setup {
        Setup {
            placements: Vec::new(),
            turn: Color::White,
            ep_target: None,
        }
    }

    /// Puts an unmoved piece on a square, replacing whatever stood there.
    pub fn put(&mut self, square: Square, color: Color, role: Role) -> &mut Setup {
        self.remove(square);
        self.placements.push(Placement {
            square,
            color,
            role,
            moved: false,
        });
        self
    }

    /// Clears a square. Returns whether a piece stood there.
    pub fn remove(&mut self, square: Square) -> bool {
        let before = self.placements.len();
        self.placements.retain(|p| p.square != square);
        self.placements.len() != before
    }

    /// Marks the piece on a square as moved or unmoved. An unmoved king and
    /// rook keep their castling rights.
    pub fn set_moved(&mut self, square: Square, moved: bool) -> &mut Setup {
        if let Some(p) = self.placements.iter_mut().find(|p| p.square == square) {
            p.moved = moved;
        }
        self
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, Role)> {
        self.placements
            .iter()
            .find(|p| p.square == square)
            .map(|p| (p.color, p.role))
    }

    pub(crate) fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(Square, Color, Role, &mut bool),
    {
        for p in &mut self.placements {
            f(p.square, p.color, p.role, &mut p.moved);
        }
    }

    /// Validates the setup and builds the position.
    ///
    /// # Errors
    ///
    /// Fails unless each side has exactly one king, no pawn stands on the
    /// first or last row, the en passant target (if any) is a pawn of the
    /// side not to move on its double push row with the skipped square
    /// empty, and the side not to move is not in check.
    pub fn position(&self) -> Result<Position, PositionError> {
        let kings = ByColor::new_with(|color| {
            self.placements
                .iter()
                .filter(|p| p.color == color && p.role == Role::King)
                .count()
        });
        if let Some(color) = kings.find(|&n| n == 0) {
            return Err(PositionError::MissingKing { color });
        }
        if let Some(color) = kings.find(|&n| n > 1) {
            return Err(PositionError::TooManyKings { color });
        }

        if self
            .placements
            .iter()
            .any(|p| p.role == Role::Pawn && (p.square.row() == 1 || p.square.row() == 8))
        {
            return Err(PositionError::PawnsOnBackrank);
        }

        if let Some(target) = self.ep_target {
            let them = !self.turn;
            let skipped = target.offset(self.turn.forward(), 0);
            let valid = self.piece_at(target) == Some((them, Role::Pawn))
                && target.row() == them.double_push_rank()
                && skipped.is_some_and(|sq| self.piece_at(sq).is_none());
            if !valid {
                return Err(PositionError::InvalidEpSquare);
            }
        }

        let pos = self.build();
        if pos.is_check(!self.turn) {
            return Err(PositionError::OppositeCheck);
        }

        Ok(pos)
    }

    /// Builds the position without validation.
    pub(crate) fn build(&self) -> Position {
        let mut board = Board::empty();
        let mut pieces = Registry::new();

        for (id, p) in (1..=u8::MAX).filter_map(PieceId::new).zip(&self.placements) {
            board.set(p.square, id);
            let mut piece = Piece::new(id, p.color, p.role, p.square);
            piece.moved = p.moved;
            pieces.insert(piece);
        }

        let ep_target = self.ep_target.and_then(|sq| board.id_at(sq));

        Position::from_parts(board, pieces, self.turn, ep_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_default_ids() {
        let pos = Setup::default().position().expect("legal position");
        let id_of = |name: &str| pos.piece_at(sq(name)).expect("piece").id().get();

        assert_eq!(id_of("a2"), 1);
        assert_eq!(id_of("h2"), 8);
        assert_eq!(id_of("a1"), 9);
        assert_eq!(id_of("e1"), 13);
        assert_eq!(id_of("h1"), 16);
        assert_eq!(id_of("a7"), 17);
        assert_eq!(id_of("h7"), 24);
        assert_eq!(id_of("h8"), 25);
        assert_eq!(id_of("e8"), 28);
        assert_eq!(id_of("a8"), 32);
        assert_eq!(pos.piece_at(sq("d8")).map(Piece::role), Some(Role::Queen));
        assert_eq!(pos.piece_at(sq("e8")).map(Piece::role), Some(Role::King));
    }

    #[test]
    fn test_put_replaces() {
        let mut setup = Setup::empty();
        setup
            .put(sq("d4"), Color::White, Role::Knight)
            .put(sq("d4"), Color::Black, Role::Bishop);
        assert_eq!(setup.piece_at(sq("d4")), Some((Color::Black, Role::Bishop)));
        assert!(setup.remove(sq("d4")));
        assert!(!setup.remove(sq("d4")));
    }

    #[test]
    fn test_validation() {
        let mut setup = Setup::empty();
        setup.put(sq("e1"), Color::White, Role::King);
        assert_eq!(
            setup.position(),
            Err(PositionError::MissingKing { color: Color::Black })
        );

        setup.put(sq("e8"), Color::Black, Role::King);
        setup.put(sq("a8"), Color::Black, Role::King);
        assert_eq!(
            setup.position(),
            Err(PositionError::TooManyKings { color: Color::Black })
        );

        setup.remove(sq("a8"));
        setup.put(sq("c1"), Color::White, Role::Pawn);
        assert_eq!(setup.position(), Err(PositionError::PawnsOnBackrank));

        setup.remove(sq("c1"));
        setup.put(sq("e4"), Color::White, Role::Rook);
        assert_eq!(setup.position(), Err(PositionError::OppositeCheck));

        setup.turn = Color::Black;
        assert!(setup.position().is_ok());
    }

    #[test]
    fn test_ep_target_validation() {
        let mut setup = Setup::empty();
        setup
            .put(sq("e1"), Color::White, Role::King)
            .put(sq("e8"), Color::Black, Role::King)
            .put(sq("d4"), Color::White, Role::Pawn);
        setup.turn = Color::Black;

        setup.ep_target = Some(sq("d4"));
        let pos = setup.position().expect("legal position");
        assert_eq!(pos.ep_target(), pos.piece_at(sq("d4")).map(Piece::id));

        setup.ep_target = Some(sq("e1"));
        assert_eq!(setup.position(), Err(PositionError::InvalidEpSquare));

        setup.turn = Color::White;
        setup.ep_target = Some(sq("d4"));
        assert_eq!(setup.position(), Err(PositionError::InvalidEpSquare));
    }
}
