use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Cells and Matrices
// ============================================================================

/// A board or piece cell: `0` is empty, `1..=7` identifies the piece that
/// left it there.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// Square grid of cells owned by a single piece.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Matrix {
    rows: Vec<Vec<Cell>>,
}

impl Matrix {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the first row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    /// Non-empty cells as `(x, y, value)` in matrix-local coordinates.
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value != EMPTY)
                .map(move |(x, &value)| (x, y, value))
        })
    }

    /// Identity of the piece this matrix was instantiated from.
    pub fn kind(&self) -> Option<PieceKind> {
        self.blocks().next().and_then(|(_, _, value)| PieceKind::from_code(value))
    }
}

// ============================================================================
// Piece Catalog
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

const TEMPLATE_I: &[&[Cell]] = &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]];
const TEMPLATE_J: &[&[Cell]] = &[&[2, 0, 0], &[2, 2, 2], &[0, 0, 0]];
const TEMPLATE_L: &[&[Cell]] = &[&[0, 0, 3], &[3, 3, 3], &[0, 0, 0]];
const TEMPLATE_O: &[&[Cell]] = &[&[4, 4], &[4, 4]];
const TEMPLATE_S: &[&[Cell]] = &[&[0, 5, 5], &[5, 5, 0], &[0, 0, 0]];
const TEMPLATE_T: &[&[Cell]] = &[&[0, 6, 0], &[6, 6, 6], &[0, 0, 0]];
const TEMPLATE_Z: &[&[Cell]] = &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]];

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// The immutable shape template.
    pub fn template(&self) -> &'static [&'static [Cell]] {
        match self {
            PieceKind::I => TEMPLATE_I,
            PieceKind::J => TEMPLATE_J,
            PieceKind::L => TEMPLATE_L,
            PieceKind::O => TEMPLATE_O,
            PieceKind::S => TEMPLATE_S,
            PieceKind::T => TEMPLATE_T,
            PieceKind::Z => TEMPLATE_Z,
        }
    }

    /// Fresh copy of the template that the caller may rotate freely.
    pub fn instantiate(&self) -> Matrix {
        Matrix::from_rows(self.template().iter().map(|row| row.to_vec()).collect())
    }

    pub fn code(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    pub fn from_code(code: Cell) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform, independent draws over the seven shapes.
pub struct RandomPieceProvider {
    rng: StdRng,
}

impl RandomPieceProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPieceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::random(&mut self.rng)
    }
}

/// Cycles through a fixed list. Used to script games in tests.
pub struct SequencePieceProvider {
    pieces: Vec<PieceKind>,
    index: usize,
}

impl SequencePieceProvider {
    /// Panics if `pieces` is empty.
    pub fn new(pieces: Vec<PieceKind>) -> Self {
        assert!(!pieces.is_empty(), "sequence provider needs at least one piece");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> PieceKind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}
