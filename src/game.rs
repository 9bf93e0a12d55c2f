use tracing::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::engine::{collides, rotate_with_kick, Rotation};
use crate::pieces::{Cell, PieceProvider, RandomPieceProvider};
use crate::player::{ActivePiece, Player, Position};

// ============================================================================
// Configuration
// ============================================================================

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Timing (in milliseconds)
pub const DROP_INTERVAL_MS: u64 = 1000;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    /// Created but not started; the next piece is already queued.
    Idle,
    Running,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    pub fn dx(self) -> i32 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// What a command did. Commands never fail; they are either ignored in the
/// current state or applied with one of these results.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Not accepted in the current state.
    Ignored,
    /// Accepted, but a collision left the piece where it was.
    Blocked,
    /// Gravity time accumulated without reaching the drop interval.
    Pending,
    Moved,
    Rotated,
    Spawned,
    /// The piece was merged into the board and a new one spawned.
    Locked { points: u64 },
    GameOver,
    Started,
    Resumed,
    Paused,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    PieceLocked,
    RowsCleared { points: u64 },
    ScoreChanged(u64),
    GameOver,
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    pub board: Board,
    pub player: Player,
    pub state: GameState,
    drop_interval_ms: u64,
    drop_counter_ms: u64,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

// ============================================================================
// Game Logic
// ============================================================================

impl Game {
    pub fn new(config: &GameConfig) -> Self {
        let provider = match config.seed {
            Some(seed) => RandomPieceProvider::seeded(seed),
            None => RandomPieceProvider::new(),
        };
        Self::with_provider(config, Box::new(provider))
    }

    /// An idle session with the first queued piece already drawn.
    pub fn with_provider(config: &GameConfig, mut provider: Box<dyn PieceProvider>) -> Self {
        let mut player = Player::default();
        player.requeue(provider.as_mut());

        Self {
            board: Board::new(config.width, config.height),
            player,
            state: GameState::Idle,
            drop_interval_ms: config.drop_interval_ms,
            drop_counter_ms: 0,
            piece_provider: provider,
            events: Vec::new(),
        }
    }

    /// A running session on a prepared board with `piece` already falling.
    pub fn with_board(board: Board, piece: ActivePiece) -> Self {
        let config = GameConfig {
            width: board.width(),
            height: board.height(),
            ..GameConfig::default()
        };
        let mut game = Self::with_provider(&config, Box::new(RandomPieceProvider::new()));
        game.board = board;
        game.player.active = Some(piece);
        game.state = GameState::Running;
        game
    }

    pub fn drop_interval_ms(&self) -> u64 {
        self.drop_interval_ms
    }

    /// Gravity time accumulated since the last drop.
    pub fn drop_counter_ms(&self) -> u64 {
        self.drop_counter_ms
    }

    pub fn score(&self) -> u64 {
        self.player.score
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.player.active.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Starts a new game from `Idle` or `GameOver`, or resumes from `Paused`.
    pub fn start(&mut self) -> Outcome {
        match self.state {
            GameState::Running => Outcome::Ignored,
            GameState::Paused => {
                self.state = GameState::Running;
                self.events.push(GameEvent::Resumed);
                info!("game resumed");
                Outcome::Resumed
            }
            GameState::Idle | GameState::GameOver => self.new_game(),
        }
    }

    fn new_game(&mut self) -> Outcome {
        self.board.clear();
        self.player.score = 0;
        self.player.active = None;
        self.player.requeue(self.piece_provider.as_mut());
        self.drop_counter_ms = 0;
        self.state = GameState::Running;
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::Started);
        info!(
            width = self.board.width(),
            height = self.board.height(),
            "new game started"
        );

        match self.reset_active_piece() {
            Outcome::GameOver => Outcome::GameOver,
            _ => Outcome::Started,
        }
    }

    pub fn pause(&mut self) -> Outcome {
        if self.state != GameState::Running {
            return Outcome::Ignored;
        }
        self.state = GameState::Paused;
        self.events.push(GameEvent::Paused);
        info!(score = self.player.score, "game paused");
        Outcome::Paused
    }

    /// Advances the gravity timer. Once the accumulated time reaches the drop
    /// interval the piece drops one row and the accumulator restarts at zero.
    pub fn tick(&mut self, delta_ms: u64) -> Outcome {
        if self.state != GameState::Running {
            return Outcome::Ignored;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(delta_ms);
        if self.drop_counter_ms >= self.drop_interval_ms {
            return self.drop_piece();
        }
        Outcome::Pending
    }

    pub fn move_piece(&mut self, shift: Shift) -> Outcome {
        if self.state != GameState::Running {
            return Outcome::Ignored;
        }
        let Some(piece) = self.player.active.as_mut() else {
            return Outcome::Ignored;
        };

        piece.position.x += shift.dx();
        if collides(&self.board, piece) {
            piece.position.x -= shift.dx();
            return Outcome::Blocked;
        }
        Outcome::Moved
    }

    pub fn rotate_piece(&mut self, rotation: Rotation) -> Outcome {
        if self.state != GameState::Running {
            return Outcome::Ignored;
        }
        let Some(piece) = self.player.active.as_mut() else {
            return Outcome::Ignored;
        };

        if rotate_with_kick(&self.board, piece, rotation) {
            Outcome::Rotated
        } else {
            Outcome::Blocked
        }
    }

    /// Moves the piece down one row, locking it in place if it cannot move.
    pub fn drop_piece(&mut self) -> Outcome {
        if self.state != GameState::Running {
            return Outcome::Ignored;
        }
        let Some(piece) = self.player.active.as_mut() else {
            return Outcome::Ignored;
        };

        piece.position.y += 1;
        let outcome = if collides(&self.board, piece) {
            piece.position.y -= 1;
            self.lock_and_spawn()
        } else {
            Outcome::Moved
        };

        self.drop_counter_ms = 0;
        outcome
    }

    /// Drops the piece to its lowest resting row and locks it immediately.
    pub fn hard_drop(&mut self) -> Outcome {
        if self.state != GameState::Running {
            return Outcome::Ignored;
        }
        let Some(piece) = self.player.active.as_mut() else {
            return Outcome::Ignored;
        };

        while !collides(&self.board, piece) {
            piece.position.y += 1;
        }
        piece.position.y -= 1;

        let outcome = self.lock_and_spawn();
        self.drop_counter_ms = 0;
        outcome
    }

    fn lock_and_spawn(&mut self) -> Outcome {
        let Some(piece) = self.player.active.take() else {
            return Outcome::Ignored;
        };

        self.board.merge(&piece);
        self.events.push(GameEvent::PieceLocked);

        let points = self.board.sweep_rows();
        if points > 0 {
            self.player.score = self.player.score.saturating_add(points);
            self.events.push(GameEvent::RowsCleared { points });
            self.events.push(GameEvent::ScoreChanged(self.player.score));
        }
        debug!(
            kind = ?piece.matrix.kind(),
            x = piece.position.x,
            y = piece.position.y,
            points,
            "piece locked"
        );

        match self.reset_active_piece() {
            Outcome::GameOver => Outcome::GameOver,
            _ => Outcome::Locked { points },
        }
    }

    /// Promotes the queued piece to the top centre of the board and queues a
    /// new one. If the new piece has no room, the board and score are
    /// cleared and the game is over.
    pub fn reset_active_piece(&mut self) -> Outcome {
        let matrix = self.player.promote_next(self.piece_provider.as_mut());
        let x = (self.board.width() / 2) as i32 - (matrix.width() / 2) as i32;
        let piece = ActivePiece::new(matrix, Position::new(x, 0));

        let blocked = collides(&self.board, &piece);
        self.player.active = Some(piece);

        if blocked {
            info!(score = self.player.score, "game over");
            self.board.clear();
            self.player.score = 0;
            self.state = GameState::GameOver;
            self.events.push(GameEvent::ScoreChanged(0));
            self.events.push(GameEvent::GameOver);
            return Outcome::GameOver;
        }
        Outcome::Spawned
    }

    /// Returns the board with the active piece overlaid
    pub fn render_grid(&self) -> Vec<Vec<Cell>> {
        let mut visual = self.board.rows().to_vec();

        if let Some(piece) = &self.player.active {
            for (x, y, value) in piece.blocks() {
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                    if let Some(cell) = visual.get_mut(y).and_then(|row| row.get_mut(x)) {
                        *cell = value;
                    }
                }
            }
        }

        visual
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
