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

//! A two player chess rules engine with stable piece identities.
//!
//! Every piece keeps its [`PieceId`] from the start of the game until it is
//! captured, including through promotion. A [`Game`] exposes the legal moves
//! of each piece of the side to move, applies chosen moves and reports
//! checkmate and stalemate.
//!
//! # Examples
//!
//! Select a piece and look at its legal moves:
//!
//! ```
//! use chessgame::{Game, Square};
//!
//! let mut game = Game::new();
//! let knight = game.position().piece_at(Square::new(1, 7).expect("g1")).expect("knight").id();
//!
//! let moves = game.select(knight)?;
//! assert_eq!(moves.len(), 2);
//! # Ok::<_, chessgame::PlayError>(())
//! ```
//!
//! Play moves and detect the end of the game:
//!
//! ```
//! use chessgame::{Color, Event, Game, Move, Outcome};
//!
//! let mut game = Game::new();
//! let mut play = |from: &str, m: Move| -> Result<Event, Box<dyn std::error::Error>> {
//!     let id = game.position().piece_at(from.parse()?).ok_or("empty square")?.id();
//!     Ok(game.play_piece(id, m)?)
//! };
//!
//! play("f2", Move::normal("f3".parse()?))?;
//! play("e7", Move::double_pawn_push("e5".parse()?))?;
//! play("g2", Move::double_pawn_push("g4".parse()?))?;
//! assert_eq!(play("d8", Move::normal("h4".parse()?))?, Event::Check);
//!
//! assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Start from any legal position given in [FEN](fen):
//!
//! ```
//! use chessgame::{Game, Setup};
//!
//! let setup: Setup = "7k/8/6K1/8/8/8/8/5Q2 w - -".parse()?;
//! let game = Game::from_setup(&setup)?;
//! assert_eq!(game.legal_move_count(), 27);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Logging
//!
//! Applied moves and finished games are reported as [`tracing`] events at
//! debug level, declined requests at trace level. The library never installs
//! a subscriber.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   the vocabulary types, moves, outcomes and [`RemoteMove`].

#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod board;
mod castling_side;
mod color;
mod errors;
mod game;
mod m;
mod perft;
mod piece;
mod position;
mod role;
mod setup;
mod shared;
mod square;

pub mod attacks;
pub mod fen;
pub mod movegen;
pub mod remote;

pub use board::Board;
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color, ParseColorError};
pub use errors::{PlayError, PositionError};
pub use game::{Event, Game, Outcome, Status};
pub use m::{Move, MoveFlags, MoveList};
pub use perft::perft;
pub use piece::{Piece, PieceId, Registry};
pub use position::Position;
pub use remote::{RemoteMove, RemoteMoveError};
pub use role::Role;
pub use setup::Setup;
pub use shared::SharedGame;
pub use square::{ParseSquareError, Square};
