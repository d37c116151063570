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

use std::{fmt, num::NonZeroU8};

use crate::{
    color::Color,
    m::{Move, MoveList},
    role::Role,
    square::Square,
};

/// Identifies a piece for its whole lifetime, including after promotion.
///
/// # Examples
///
/// ```
/// use chessgame::PieceId;
///
/// let id = PieceId::new(5).expect("non-zero");
/// assert_eq!(id.get(), 5);
/// assert_eq!(PieceId::new(0), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceId(NonZeroU8);

impl PieceId {
    #[inline]
    pub const fn new(id: u8) -> Option<PieceId> {
        match NonZeroU8::new(id) {
            Some(id) => Some(PieceId(id)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        usize::from(self.get() - 1)
    }
}

impl From<PieceId> for u8 {
    fn from(id: PieceId) -> u8 {
        id.get()
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.get())
    }
}

/// An entry of the piece registry.
///
/// Pieces are only mutated through the position they belong to, which keeps
/// `square` in sync with the board.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) color: Color,
    pub(crate) role: Role,
    pub(crate) square: Square,
    pub(crate) moved: bool,
    pub(crate) legal_moves: MoveList,
}

impl Piece {
    pub(crate) fn new(id: PieceId, color: Color, role: Role, square: Square) -> Piece {
        Piece {
            id,
            color,
            role,
            square,
            moved: false,
            legal_moves: MoveList::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// Whether the piece has moved at least once. Unmoved kings and rooks
    /// keep their castling rights.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// The legal moves computed for this piece at the start of the current
    /// half-move. Empty for pieces of the side not to move.
    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn char(&self) -> char {
        self.role.char_of(self.color)
    }
}

/// The set of pieces currently on the board, indexed by id.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Registry {
    slots: Vec<Option<Piece>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    #[inline]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub(crate) fn insert(&mut self, piece: Piece) {
        let index = piece.id.index();
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(piece);
    }

    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.get(id).is_some()
    }

    /// Pieces in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.slots.iter().flatten()
    }

    pub fn by_color(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.iter().filter(move |piece| piece.color == color)
    }

    /// Ids of the pieces of one side, collected so the position can be
    /// mutated while walking them.
    pub(crate) fn ids_of(&self, color: Color) -> Vec<PieceId> {
        self.by_color(color).map(Piece::id).collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
