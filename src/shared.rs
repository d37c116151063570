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

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    color::Color,
    errors::PlayError,
    game::{Event, Game, Outcome, Status},
    m::{Move, MoveList},
    piece::PieceId,
    remote::RemoteMove,
};

/// A handle to a [`Game`] that can be shared between threads.
///
/// Each call holds the lock of the game for its whole duration, so moves
/// and the recomputation of legal moves that follows are never interleaved.
/// Clones refer to the same game.
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// use chessgame::{Color, SharedGame, Status};
///
/// let game = SharedGame::default();
///
/// let handle = {
///     let game = game.clone();
///     thread::spawn(move || game.resign(Color::Black))
/// };
/// handle.join().expect("thread finished")?;
///
/// assert!(game.status().outcome().is_some());
/// # Ok::<_, chessgame::PlayError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> SharedGame {
        SharedGame {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// See [`Game::select()`]. Returns a copy of the legal moves.
    pub fn select(&self, id: PieceId) -> Result<MoveList, PlayError> {
        self.inner
            .lock()
            .select(id)
            .map(|moves| moves.iter().copied().collect())
    }

    /// See [`Game::play_piece()`].
    pub fn play_piece(&self, id: PieceId, m: Move) -> Result<Event, PlayError> {
        self.inner.lock().play_piece(id, m)
    }

    /// See [`Game::play_remote()`].
    pub fn play_remote(&self, remote: &RemoteMove) -> Result<Event, PlayError> {
        self.inner.lock().play_remote(remote)
    }

    /// See [`Game::resign()`].
    pub fn resign(&self, color: Color) -> Result<Outcome, PlayError> {
        self.inner.lock().resign(color)
    }

    pub fn status(&self) -> Status {
        self.inner.lock().status()
    }

    /// Runs `f` with the game locked.
    pub fn with<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Game) -> T,
    {
        f(&self.inner.lock())
    }

    /// A copy of the current state of the game.
    pub fn snapshot(&self) -> Game {
        self.inner.lock().clone()
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> SharedGame {
        SharedGame::new(game)
    }
}
