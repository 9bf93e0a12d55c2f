//! Collision testing and in-place rotation.

use crate::board::Board;
use crate::pieces::{Matrix, EMPTY};
use crate::player::ActivePiece;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

/// True when any occupied cell of `piece` lands on a filled board cell or
/// off the board entirely.
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    piece
        .blocks()
        .any(|(x, y, _)| board.get(x, y) != Some(EMPTY))
}

/// Rotates a square matrix a quarter turn in place: transpose, then reverse
/// each row (clockwise) or the row order (counter-clockwise).
pub fn rotate(matrix: &mut Matrix, rotation: Rotation) {
    let rows = matrix.rows_mut();
    for y in 0..rows.len() {
        for x in 0..y {
            let tmp = rows[x][y];
            rows[x][y] = rows[y][x];
            rows[y][x] = tmp;
        }
    }

    match rotation {
        Rotation::Clockwise => rows.iter_mut().for_each(|row| row.reverse()),
        Rotation::CounterClockwise => rows.reverse(),
    }
}

/// Rotates the piece and, if it now collides, nudges it sideways by
/// 1, -2, 3, -4, ... columns until it fits. Gives up once the next nudge
/// would exceed the matrix width, leaving the piece exactly as it was.
///
/// Returns whether the rotation was kept.
pub fn rotate_with_kick(board: &Board, piece: &mut ActivePiece, rotation: Rotation) -> bool {
    let original_x = piece.position.x;
    rotate(&mut piece.matrix, rotation);

    let limit = piece.matrix.width() as i32;
    let mut offset: i32 = 1;
    while collides(board, piece) {
        piece.position.x += offset;
        offset = -(offset + offset.signum());
        if offset > limit {
            rotate(&mut piece.matrix, rotation.inverse());
            piece.position.x = original_x;
            return false;
        }
    }
    true
}
