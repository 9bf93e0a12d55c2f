use crate::pieces::{Matrix, PieceKind, PieceProvider};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The falling piece: a matrix it owns exclusively and the board offset of
/// the matrix's top-left corner.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ActivePiece {
    pub matrix: Matrix,
    pub position: Position,
}

impl ActivePiece {
    pub fn new(matrix: Matrix, position: Position) -> Self {
        Self { matrix, position }
    }

    pub fn new_at(kind: PieceKind, x: i32, y: i32) -> Self {
        Self::new(kind.instantiate(), Position::new(x, y))
    }

    /// Board coordinates of every occupied cell.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.matrix.blocks().map(move |(x, y, value)| {
            (
                x as i32 + self.position.x,
                y as i32 + self.position.y,
                value,
            )
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct Player {
    pub active: Option<ActivePiece>,
    pub next: Option<Matrix>,
    pub score: u64,
}

impl Player {
    /// Hands the queued piece over for activation and queues a fresh one.
    /// Draws the queued piece first if nothing is queued yet.
    pub fn promote_next(&mut self, provider: &mut dyn PieceProvider) -> Matrix {
        let promoted = match self.next.take() {
            Some(matrix) => matrix,
            None => provider.next_piece().instantiate(),
        };
        self.next = Some(provider.next_piece().instantiate());
        promoted
    }

    /// Replaces the queued piece with a fresh draw.
    pub fn requeue(&mut self, provider: &mut dyn PieceProvider) {
        self.next = Some(provider.next_piece().instantiate());
    }
}
