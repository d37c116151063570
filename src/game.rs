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

use tracing::{debug, trace};

use crate::{
    board::Board,
    color::Color,
    errors::{PlayError, PositionError},
    m::{Move, MoveList},
    piece::{Piece, PieceId, Registry},
    position::Position,
    remote::RemoteMove,
    setup::Setup,
};

/// The result of a finished game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Resignation { winner: Color },
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } | Outcome::Resignation { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        matches!(self, Outcome::Stalemate)
    }

    pub const fn as_str(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whose turn it is, or how the game ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    ToMove(Color),
    Over(Outcome),
}

impl Status {
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Status::ToMove(_) => None,
            Status::Over(outcome) => Some(outcome),
        }
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Status::Over(_))
    }
}

/// What happened on an applied move. Exactly one event is raised per move.
///
/// When several apply, the later variant wins: a capture that gives check
/// is reported as [`Event::Check`], a capturing promotion as
/// [`Event::Promotion`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Move,
    Capture,
    Castle,
    EnPassant,
    Promotion,
    Check,
}

/// A game between two sides on a single board.
///
/// The game keeps the legal moves of every piece of the side to move up to
/// date after each move. Requests that are declined return a [`PlayError`]
/// and leave the game exactly as it was.
///
/// # Examples
///
/// ```
/// use chessgame::{Color, Event, Game, Move, Status};
///
/// let mut game = Game::new();
/// let pawn = game.position().piece_at("e2".parse()?).expect("pawn").id();
///
/// let moves = game.select(pawn)?;
/// assert_eq!(moves.len(), 2);
///
/// let event = game.play(Move::double_pawn_push("e4".parse()?))?;
/// assert_eq!(event, Event::Move);
/// assert_eq!(game.status(), Status::ToMove(Color::Black));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    status: Status,
    selected: Option<PieceId>,
    check: bool,
    captured: Vec<Piece>,
    plies: u32,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// Starts a game from the standard starting position.
    pub fn new() -> Game {
        Game::from_position(Position::default())
    }

    /// Starts a game from the given position.
    ///
    /// The legal moves of the side to move are computed right away, so a
    /// position without legal moves is already over.
    pub fn from_position(position: Position) -> Game {
        let turn = position.turn();
        let mut game = Game {
            position,
            status: Status::ToMove(turn),
            selected: None,
            check: false,
            captured: Vec::new(),
            plies: 0,
        };
        game.refresh();
        game
    }

    /// Validates a setup and starts a game from it.
    ///
    /// # Errors
    ///
    /// See [`Setup::position()`].
    pub fn from_setup(setup: &Setup) -> Result<Game, PositionError> {
        setup.position().map(Game::from_position)
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    #[inline]
    pub fn pieces(&self) -> &Registry {
        self.position.pieces()
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Tests if the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Pieces captured so far, in the order they were taken.
    #[inline]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Number of half-moves played.
    #[inline]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// The legal moves of a piece. Empty for pieces of the side not to
    /// move and for pieces no longer on the board.
    pub fn legal_moves(&self, id: PieceId) -> &[Move] {
        self.position.piece(id).map_or(&[][..], Piece::legal_moves)
    }

    /// Total number of legal moves of the side to move.
    pub fn legal_move_count(&self) -> usize {
        self.position
            .pieces()
            .by_color(self.turn())
            .map(|piece| piece.legal_moves().len())
            .sum()
    }

    /// Selects a piece of the side to move and returns its legal moves.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::GameOver`] after the game has ended,
    /// [`PlayError::UnknownPiece`] if the piece is not on the board and
    /// [`PlayError::NotPlayersTurn`] if it belongs to the other side.
    pub fn select(&mut self, id: PieceId) -> Result<&[Move], PlayError> {
        self.check_playable(id).inspect_err(|err| {
            trace!(piece = %id, %err, "selection declined");
        })?;

        trace!(piece = %id, "piece selected");
        self.selected = Some(id);
        Ok(self.legal_moves(id))
    }

    /// Plays a move with the selected piece.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoSelection`] if no piece is selected, otherwise
    /// as [`Game::play_piece()`].
    pub fn play(&mut self, m: Move) -> Result<Event, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }
        let id = self.selected.ok_or(PlayError::NoSelection)?;
        self.play_piece(id, m)
    }

    /// Plays a move with the given piece.
    ///
    /// On success the turn passes, the legal moves of the new side to move
    /// are recomputed and the game may end in checkmate or stalemate.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::GameOver`], [`PlayError::UnknownPiece`] or
    /// [`PlayError::NotPlayersTurn`] as [`Game::select()`] does, and
    /// [`PlayError::IllegalMove`] if `m` is not among the legal moves of the
    /// piece.
    pub fn play_piece(&mut self, id: PieceId, m: Move) -> Result<Event, PlayError> {
        self.check_playable(id)
            .and_then(|()| {
                if self.legal_moves(id).contains(&m) {
                    Ok(())
                } else {
                    Err(PlayError::IllegalMove)
                }
            })
            .inspect_err(|err| {
                trace!(piece = %id, to = %m.to, %err, "move declined");
            })?;

        let undo = self
            .position
            .do_move(id, m)
            .ok_or(PlayError::UnknownPiece)?;

        let mut event = Event::Move;
        if undo.captured.is_some() {
            event = Event::Capture;
        }
        if m.is_castle() {
            event = Event::Castle;
        } else if undo.en_passant {
            event = Event::EnPassant;
        }
        if undo.promoted {
            event = Event::Promotion;
        }

        if let Some(piece) = undo.captured {
            self.captured.push(piece);
        }
        self.selected = None;
        self.plies += 1;
        self.refresh();

        if self.check {
            event = Event::Check;
        }

        debug!(piece = %id, to = %m.to, ?event, plies = self.plies, "move applied");
        Ok(event)
    }

    /// Plays a move received from a remote peer.
    ///
    /// # Errors
    ///
    /// Records that do not describe a piece or a move are declined with
    /// [`PlayError::UnknownPiece`] or [`PlayError::IllegalMove`]. Otherwise
    /// as [`Game::play_piece()`].
    pub fn play_remote(&mut self, remote: &RemoteMove) -> Result<Event, PlayError> {
        let id = remote.piece()?;
        let m = remote.to_hint()?;
        trace!(game = remote.game_id, mover = %remote.mover_id, "remote move received");
        self.play_piece(id, m)
    }

    /// Ends the game with the given side giving up.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::GameOver`] if the game has already ended.
    pub fn resign(&mut self, color: Color) -> Result<Outcome, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }

        let outcome = Outcome::Resignation { winner: !color };
        self.status = Status::Over(outcome);
        self.selected = None;
        debug!(%color, %outcome, "resigned");
        Ok(outcome)
    }

    fn check_playable(&self, id: PieceId) -> Result<(), PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }
        let piece = self.position.piece(id).ok_or(PlayError::UnknownPiece)?;
        if piece.color() != self.turn() {
            return Err(PlayError::NotPlayersTurn);
        }
        Ok(())
    }

    /// Recomputes the legal moves of the side to move, then check and
    /// status. The cached moves of the other side are cleared.
    fn refresh(&mut self) {
        let turn = self.position.turn();

        for id in self.position.pieces().ids_of(!turn) {
            self.position.set_legal_moves(id, MoveList::new());
        }

        let mut total = 0;
        for id in self.position.pieces().ids_of(turn) {
            let moves = self.position.legal_moves(id);
            total += moves.len();
            self.position.set_legal_moves(id, moves);
        }

        self.check = self.position.is_check(turn);
        self.status = if total > 0 {
            Status::ToMove(turn)
        } else if self.check {
            Status::Over(Outcome::Checkmate { winner: !turn })
        } else {
            Status::Over(Outcome::Stalemate)
        };

        if let Status::Over(outcome) = self.status {
            debug!(%outcome, "game over");
        }
    }
}
