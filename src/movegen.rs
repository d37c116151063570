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

//! Pseudo-legal move generation for a single piece.

use crate::{
    attacks::{self, ALL_DIRECTIONS, DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL},
    castling_side::CastlingSide,
    m::{Move, MoveList},
    piece::Piece,
    position::Position,
    role::Role,
    square::Square,
};

/// Generates the moves `piece` could make in `pos` if its own king's
/// safety were ignored.
///
/// The result depends only on the given snapshot. Candidates come out in a
/// stable order: by direction, then by distance along it.
pub fn pseudo_legal_moves(pos: &Position, piece: &Piece) -> MoveList {
    let mut moves = MoveList::new();

    match piece.role() {
        Role::Pawn => gen_pawn_moves(pos, piece, &mut moves),
        Role::Knight => KnightTag::gen_moves(pos, piece, &mut moves),
        Role::Bishop => BishopTag::gen_moves(pos, piece, &mut moves),
        Role::Rook => RookTag::gen_moves(pos, piece, &mut moves),
        Role::Queen => QueenTag::gen_moves(pos, piece, &mut moves),
        Role::King => {
            KingTag::gen_moves(pos, piece, &mut moves);
            gen_castling_moves(pos, piece, &mut moves);
        }
    }

    moves
}

/// A piece that jumps to a fixed set of offsets.
trait Stepper {
    const OFFSETS: &'static [(i8, i8)];

    fn gen_moves(pos: &Position, piece: &Piece, moves: &mut MoveList) {
        for &(rows, columns) in Self::OFFSETS {
            if let Some(to) = piece.square().offset(rows, columns) {
                if !is_ally(pos, piece, to) {
                    moves.push(Move::normal(to));
                }
            }
        }
    }
}

/// A piece that walks along rays until blocked.
trait Slider {
    const DIRECTIONS: &'static [(i8, i8)];

    fn gen_moves(pos: &Position, piece: &Piece, moves: &mut MoveList) {
        for &(rows, columns) in Self::DIRECTIONS {
            let mut cursor = piece.square();
            while let Some(to) = cursor.offset(rows, columns) {
                cursor = to;
                match pos.piece_at(to) {
                    None => moves.push(Move::normal(to)),
                    Some(other) => {
                        if other.color() != piece.color() {
                            moves.push(Move::normal(to));
                        }
                        break;
                    }
                }
            }
        }
    }
}

struct KingTag;
struct KnightTag;
struct BishopTag;
struct RookTag;
struct QueenTag;

impl Stepper for KingTag {
    const OFFSETS: &'static [(i8, i8)] = &ALL_DIRECTIONS;
}

impl Stepper for KnightTag {
    const OFFSETS: &'static [(i8, i8)] = &KNIGHT_JUMPS;
}

impl Slider for BishopTag {
    const DIRECTIONS: &'static [(i8, i8)] = &DIAGONAL;
}

impl Slider for RookTag {
    const DIRECTIONS: &'static [(i8, i8)] = &ORTHOGONAL;
}

impl Slider for QueenTag {
    const DIRECTIONS: &'static [(i8, i8)] = &ALL_DIRECTIONS;
}

fn is_ally(pos: &Position, piece: &Piece, sq: Square) -> bool {
    pos.piece_at(sq)
        .is_some_and(|other| other.color() == piece.color())
}

fn is_enemy(pos: &Position, piece: &Piece, sq: Square) -> bool {
    pos.piece_at(sq)
        .is_some_and(|other| other.color() != piece.color())
}

fn gen_pawn_moves(pos: &Position, pawn: &Piece, moves: &mut MoveList) {
    let color = pawn.color();
    let forward = color.forward();
    let from = pawn.square();

    // Pushes never capture, and the double push may not jump over a piece.
    if let Some(single) = from.offset(forward, 0) {
        if !pos.board().is_occupied(single) {
            moves.push(Move::normal(single));

            if from.row() == color.pawn_rank() {
                if let Some(double) = single.offset(forward, 0) {
                    if !pos.board().is_occupied(double) {
                        moves.push(Move::double_pawn_push(double));
                    }
                }
            }
        }
    }

    for columns in [1, -1] {
        if let Some(to) = from.offset(forward, columns) {
            if is_enemy(pos, pawn, to) {
                moves.push(Move::normal(to));
            }
        }
    }

    // The en passant target stands beside the pawn and is taken by moving
    // to the square it skipped.
    if let Some(target) = pos.ep_target().and_then(|id| pos.piece(id)) {
        let beside = target.square().row() == from.row()
            && target.square().column().abs_diff(from.column()) == 1;

        if beside && target.color() != color && target.role() == Role::Pawn {
            if let Some(to) = target.square().offset(forward, 0) {
                if !pos.board().is_occupied(to) {
                    moves.push(Move::en_passant(to));
                }
            }
        }
    }
}

fn gen_castling_moves(pos: &Position, king: &Piece, moves: &mut MoveList) {
    if king.has_moved() {
        return;
    }

    for side in CastlingSide::ALL {
        if is_castle_eligible(pos, king, side) {
            moves.push(Move::castle(side, side.king_to(king.color())));
        }
    }
}

/// Tests if `king` may castle to `side`.
///
/// Requires the king on its home square on the e-file, the unmoved rook of
/// the same color on its home square, every
/// square strictly between king and rook to be empty, and none of the
/// squares the king stands on, crosses or lands on to be attacked.
///
/// Whether the king itself has moved is checked by the caller.
pub fn is_castle_eligible(pos: &Position, king: &Piece, side: CastlingSide) -> bool {
    let color = king.color();
    let from = king.square();

    if from != Square::at(color.backrank(), 5) {
        return false;
    }

    let rook_in_place = pos.piece_at(side.rook_from(color)).is_some_and(|rook| {
        rook.role() == Role::Rook && rook.color() == color && !rook.has_moved()
    });
    if !rook_in_place {
        return false;
    }

    let rook_column = side.rook_from_column();
    let (low, high) = if rook_column < from.column() {
        (rook_column, from.column())
    } else {
        (from.column(), rook_column)
    };
    if (low + 1..high).any(|column| pos.board().is_occupied(Square::at(from.row(), column))) {
        return false;
    }

    let king_to = side.king_to_column();
    let (low, high) = if king_to < from.column() {
        (king_to, from.column())
    } else {
        (from.column(), king_to)
    };
    (low..=high).all(|column| !attacks::is_attacked(pos, Square::at(from.row(), column), !color))
}
