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

use std::fmt::{self, Write as _};

use tracing::warn;

use crate::{
    attacks,
    board::Board,
    color::Color,
    m::{Move, MoveList},
    movegen,
    piece::{Piece, PieceId, Registry},
    role::Role,
    setup::Setup,
    square::Square,
};

/// A position: the board, the piece registry, the side to move and the
/// pawn that may be taken en passant.
///
/// Positions are built from a [`Setup`] and only change through moves, so
/// the board and the registry always agree: a square holds an id exactly
/// when that piece stands on it.
///
/// # Examples
///
/// ```
/// use chessgame::{Color, Position};
///
/// let pos = Position::default();
/// assert_eq!(pos.turn(), Color::White);
/// assert_eq!(pos.pieces().len(), 32);
/// assert!(!pos.is_check(Color::White));
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Position {
    board: Board,
    pieces: Registry,
    turn: Color,
    ep_target: Option<PieceId>,
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Position {
        Setup::default().build()
    }
}

/// The reversible delta of a move applied with [`Position::do_move`].
#[derive(Clone, Debug)]
pub(crate) struct Undo {
    pub(crate) mover: PieceId,
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) was_moved: bool,
    pub(crate) promoted: bool,
    pub(crate) captured: Option<Piece>,
    pub(crate) rook: Option<RookShift>,
    pub(crate) ep_target: Option<PieceId>,
    pub(crate) en_passant: bool,
}

/// The rook half of a castle.
#[derive(Clone, Debug)]
pub(crate) struct RookShift {
    id: PieceId,
    from: Square,
    to: Square,
    was_moved: bool,
}

impl Position {
    pub(crate) fn from_parts(
        board: Board,
        pieces: Registry,
        turn: Color,
        ep_target: Option<PieceId>,
    ) -> Position {
        Position {
            board,
            pieces,
            turn,
            ep_target,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn pieces(&self) -> &Registry {
        &self.pieces
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The pawn that double pushed on the previous half-move, if any.
    #[inline]
    pub fn ep_target(&self) -> Option<PieceId> {
        self.ep_target
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.id_at(sq).and_then(|id| self.pieces.get(id))
    }

    /// Finds the king of the given side.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = self
            .pieces
            .by_color(color)
            .find(|piece| piece.role() == Role::King)
            .map(Piece::square);

        if king.is_none() {
            warn!(%color, "no king found");
        }

        king
    }

    /// Tests if the king of `color` is attacked. A side without a king is
    /// never in check.
    pub fn is_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| attacks::is_attacked(self, king, !color))
    }

    /// Candidates for the given piece, ignoring its own king's safety.
    pub fn pseudo_legal_moves(&self, id: PieceId) -> MoveList {
        self.piece(id)
            .map_or_else(MoveList::new, |piece| movegen::pseudo_legal_moves(self, piece))
    }

    /// Tests if playing `m` with the given piece would leave its own king
    /// attacked.
    ///
    /// The move is applied to this position and taken back before
    /// returning, so the position is unchanged afterwards. An unknown piece,
    /// or a move that is not one of its candidates, counts as unable to move
    /// safely.
    pub fn is_self_check_after(&mut self, id: PieceId, m: Move) -> bool {
        !self.pseudo_legal_moves(id).contains(&m) || self.exposes_king(id, m)
    }

    /// Plays a candidate move, tests the mover's king and takes it back.
    fn exposes_king(&mut self, id: PieceId, m: Move) -> bool {
        let Some(color) = self.piece(id).map(Piece::color) else {
            return true;
        };

        match self.do_move(id, m) {
            Some(undo) => {
                let check = self.is_check(color);
                self.undo(undo);
                check
            }
            None => true,
        }
    }

    /// The legal moves of the given piece: its pseudo-legal candidates
    /// without those that leave its own king attacked.
    ///
    /// Does not consult the side to move.
    pub fn legal_moves(&mut self, id: PieceId) -> MoveList {
        let mut moves = self.pseudo_legal_moves(id);
        moves.retain(|m| !self.exposes_king(id, *m));
        moves
    }

    /// Stores the legal moves computed for a piece.
    pub(crate) fn set_legal_moves(&mut self, id: PieceId, moves: MoveList) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.legal_moves = moves;
        }
    }

    /// Applies a move for the given piece and passes the turn.
    ///
    /// The move is trusted to be a candidate of that piece. Returns `None`
    /// only if the piece does not exist.
    pub(crate) fn do_move(&mut self, id: PieceId, m: Move) -> Option<Undo> {
        let (color, role, from, was_moved) = {
            let piece = self.pieces.get(id)?;
            (piece.color, piece.role, piece.square, piece.moved)
        };

        let ep_target = self.ep_target.take();

        self.board.take(from);
        let mut captured = self.board.take(m.to).and_then(|victim| self.pieces.remove(victim));

        // The en passant victim does not stand on the destination square.
        let en_passant = m.is_en_passant() && captured.is_none();
        if en_passant {
            if let Some(victim) = ep_target.and_then(|victim| self.pieces.remove(victim)) {
                self.board.take(victim.square);
                captured = Some(victim);
            }
        }

        self.board.set(m.to, id);
        let promoted = role == Role::Pawn && m.to.row() == color.promotion_rank();
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.square = m.to;
            piece.moved = true;
            if promoted {
                piece.role = Role::Queen;
            }
        }

        if m.is_double_pawn_push() && role == Role::Pawn {
            self.ep_target = Some(id);
        }

        let rook = match m.castling_side() {
            Some(side) if role == Role::King => {
                let rook_from = side.rook_from(color);
                let rook_to = side.rook_to(color);
                self.board.take(rook_from).and_then(|rook_id| {
                    self.board.set(rook_to, rook_id);
                    self.pieces.get_mut(rook_id).map(|rook| {
                        let was_moved = rook.moved;
                        rook.square = rook_to;
                        rook.moved = true;
                        RookShift {
                            id: rook_id,
                            from: rook_from,
                            to: rook_to,
                            was_moved,
                        }
                    })
                })
            }
            _ => None,
        };

        self.turn = !self.turn;

        Some(Undo {
            mover: id,
            from,
            to: m.to,
            was_moved,
            promoted,
            captured,
            rook,
            ep_target,
            en_passant,
        })
    }

    /// Takes back a move applied with [`Position::do_move`].
    pub(crate) fn undo(&mut self, undo: Undo) {
        self.turn = !self.turn;

        if let Some(rook) = undo.rook {
            self.board.take(rook.to);
            self.board.set(rook.from, rook.id);
            if let Some(piece) = self.pieces.get_mut(rook.id) {
                piece.square = rook.from;
                piece.moved = rook.was_moved;
            }
        }

        self.board.take(undo.to);
        self.board.set(undo.from, undo.mover);
        if let Some(piece) = self.pieces.get_mut(undo.mover) {
            piece.square = undo.from;
            piece.moved = undo.was_moved;
            if undo.promoted {
                piece.role = Role::Pawn;
            }
        }

        if let Some(victim) = undo.captured {
            self.board.set(victim.square, victim.id);
            self.pieces.insert(victim);
        }

        self.ep_target = undo.ep_target;
    }

    /// Renders the piece placement, rank 8 first, in the notation read by
    /// [`Setup::from_fen`].
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(64);

        for row in (1..=8).rev() {
            let mut empty = 0;

            for column in 1..=8 {
                match self.piece_at(Square::at(row, column)) {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(fen, "{empty}");
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                let _ = write!(fen, "{empty}");
            }
            if row > 1 {
                fen.push('/');
            }
        }

        fen
    }
}

impl fmt::Display for Position {
    /// An ASCII diagram from white's point of view.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=8).rev() {
            for column in 1..=8 {
                let sq = Square::at(row, column);
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
                f.write_char(if column < 8 { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn position(fen: &str) -> Position {
        fen.parse::<Setup>()
            .expect("valid fen")
            .position()
            .expect("legal position")
    }

    fn id_at(pos: &Position, name: &str) -> PieceId {
        pos.piece_at(sq(name)).expect("piece on square").id()
    }

    fn round_trip(pos: &mut Position, from: &str, m: Move) -> Undo {
        let before = pos.clone();
        let id = id_at(pos, from);
        let undo = pos.do_move(id, m).expect("piece exists");
        let after = pos.clone();
        pos.undo(undo.clone());
        assert_eq!(*pos, before);
        *pos = after;
        undo
    }

    #[test]
    fn test_default_board_fen() {
        assert_eq!(
            Position::default().board_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_double_push_sets_ep_target() {
        let mut pos = Position::default();
        let pawn = id_at(&pos, "e2");
        round_trip(&mut pos, "e2", Move::double_pawn_push(sq("e4")));
        assert_eq!(pos.ep_target(), Some(pawn));
        assert_eq!(pos.turn(), Color::Black);

        round_trip(&mut pos, "g8", Move::normal(sq("f6")));
        assert_eq!(pos.ep_target(), None);
    }

    #[test]
    fn test_castle_moves_rook_and_undoes() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        let rook = id_at(&pos, "h1");
        let undo = round_trip(&mut pos, "e1", Move::castle(crate::CastlingSide::KingSide, sq("g1")));
        assert!(undo.rook.is_some());
        assert_eq!(pos.board_fen(), "r3k2r/8/8/8/8/8/8/R4RK1");
        let rook = pos.piece(rook).expect("rook still on board");
        assert_eq!(rook.square(), sq("f1"));
        assert!(rook.has_moved());

        round_trip(&mut pos, "e8", Move::castle(crate::CastlingSide::QueenSide, sq("c8")));
        assert_eq!(pos.board_fen(), "2kr3r/8/8/8/8/8/8/R4RK1");
    }

    #[test]
    fn test_en_passant_removes_passed_pawn() {
        let mut pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6");
        let victim = id_at(&pos, "d5");
        assert_eq!(pos.ep_target(), Some(victim));

        let undo = round_trip(&mut pos, "e5", Move::en_passant(sq("d6")));
        assert!(undo.en_passant);
        assert_eq!(undo.captured.map(|p| p.id()), Some(victim));
        assert!(pos.piece(victim).is_none());
        assert_eq!(pos.board_fen(), "4k3/8/3P4/8/8/8/8/4K3");
    }

    #[test]
    fn test_promotion_keeps_id() {
        let mut pos = position("8/4P3/8/8/8/8/k7/4K3 w - -");
        let pawn = id_at(&pos, "e7");
        let undo = round_trip(&mut pos, "e7", Move::normal(sq("e8")));
        assert!(undo.promoted);
        let queen = pos.piece(pawn).expect("promoted piece");
        assert_eq!(queen.role(), Role::Queen);
        assert_eq!(queen.square(), sq("e8"));
    }

    #[test]
    fn test_self_check_filter_leaves_position_untouched() {
        // the knight on e2 is pinned by the rook on e8
        let mut pos = position("4r1k1/8/8/8/8/8/4N3/4K3 w - -");
        let knight = id_at(&pos, "e2");
        let before = pos.clone();

        let m = Move::normal(sq("c3"));
        assert!(pos.is_self_check_after(knight, m));
        assert!(pos.is_self_check_after(knight, m));
        assert_eq!(pos, before);

        assert_eq!(pos.pseudo_legal_moves(knight).len(), 6);
        assert!(pos.legal_moves(knight).is_empty());
        assert_eq!(pos, before);
    }

    #[test]
    fn test_self_check_query_ignores_foreign_moves() {
        let mut pos = position("4k3/8/8/8/8/8/8/4KB1R w K -");
        let king = id_at(&pos, "e1");
        let before = pos.clone();

        // f1 is occupied, so castling is not a candidate
        let castle = Move::castle(crate::CastlingSide::KingSide, sq("g1"));
        assert!(pos.is_self_check_after(king, castle));
        assert!(pos.is_self_check_after(king, Move::normal(sq("e5"))));
        assert_eq!(pos, before);
        assert_eq!(pos.board_fen(), "4k3/8/8/8/8/8/8/4KB1R");

        assert!(!pos.is_self_check_after(king, Move::normal(sq("d1"))));
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let mut setup = Setup::empty();
        setup.put(sq("a1"), Color::White, Role::Rook);
        setup.put(sq("a8"), Color::Black, Role::Rook);
        let pos = setup.build();
        assert_eq!(pos.king_square(Color::White), None);
        assert!(!pos.is_check(Color::White));
    }

    #[test]
    fn test_display_diagram() {
        let pos = position("4k3/8/8/8/8/8/8/4K2R w K -");
        let diagram = pos.to_string();
        assert_eq!(diagram.lines().count(), 8);
        assert_eq!(diagram.lines().next(), Some(". . . . k . . ."));
        assert_eq!(diagram.lines().last(), Some(". . . . K . . R"));
    }
}
