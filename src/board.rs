use crate::pieces::{Cell, EMPTY};
use crate::player::ActivePiece;

/// Points for the first row removed in a sweep; each further row in the same
/// sweep is worth twice the previous one.
pub const FIRST_ROW_POINTS: u64 = 10;

/// Fixed-size grid of landed cells, row 0 at the top.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![EMPTY; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `(x, y)`, or `None` when the coordinate is off the board.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        self.rows[y][x] = value;
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(EMPTY);
        }
    }

    /// Writes the piece's occupied cells into the board. The caller has
    /// already checked for collision.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y, value) in piece.blocks() {
            self.rows[y as usize][x as usize] = value;
        }
    }

    /// Removes every full row and returns the points earned.
    ///
    /// Rows are scanned bottom-up. A removed row is replaced by an empty row
    /// at the top and the same index is scanned again, since the row above
    /// has moved into it. The total saturates at `u64::MAX`.
    pub fn sweep_rows(&mut self) -> u64 {
        // A zero-width row is trivially full and would never stop sweeping.
        if self.width == 0 {
            return 0;
        }

        let mut row_points = FIRST_ROW_POINTS;
        let mut points: u64 = 0;
        let mut y = self.rows.len();

        while y > 0 {
            if self.is_row_complete(y - 1) {
                let mut row = self.rows.remove(y - 1);
                row.fill(EMPTY);
                self.rows.insert(0, row);

                points = points.saturating_add(row_points);
                row_points = row_points.saturating_mul(2);
            } else {
                y -= 1;
            }
        }

        points
    }

    /// True when row `y` has no empty cells.
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows[y].iter().all(|&cell| cell != EMPTY)
    }

    /// Number of occupied cells in row `y`.
    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.rows[y].iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Number of occupied cells on the whole board.
    pub fn total_filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|&&cell| cell != EMPTY).count()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::pieces::PieceKind;

    pub fn empty_board() -> Board {
        Board::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    pub fn fill_row(board: &mut Board, y: usize) {
        for x in 0..board.width() {
            board.set(x, y, PieceKind::T.code());
        }
    }

    pub fn fill_row_with_gap(board: &mut Board, y: usize, gap_x: usize) {
        for x in 0..board.width() {
            if x != gap_x {
                board.set(x, y, PieceKind::T.code());
            }
        }
    }
}
