use tracing::debug;

use crate::clock::TickSource;
use crate::game::{Game, GameEvent, GameState, Outcome};
use crate::input::Action;

/// Front-end state around a game session: the start/pause control, the grid
/// overlay toggle and the score display.
pub struct App {
    pub game: Game,
    pub show_grid: bool,
    score_label: String,
    needs_redraw: bool,
    should_quit: bool,
    clock: Box<dyn TickSource>,
}

impl App {
    pub fn new(game: Game, show_grid: bool, clock: Box<dyn TickSource>) -> Self {
        let score_label = game.score().to_string();
        Self {
            game,
            show_grid,
            score_label,
            needs_redraw: true,
            should_quit: false,
            clock,
        }
    }

    pub fn score_label(&self) -> &str {
        &self.score_label
    }

    /// Text of the start/pause control for the current state.
    pub fn start_label(&self) -> &'static str {
        match self.game.state {
            GameState::Idle => "START",
            GameState::Running => "PAUSE",
            GameState::Paused => "RESUME",
            GameState::GameOver => "RESTART",
        }
    }

    pub fn status_message(&self) -> &'static str {
        match self.game.state {
            GameState::Paused => "PAUSED",
            GameState::GameOver => "GAME OVER",
            GameState::Idle | GameState::Running => "",
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Returns true once if something changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        let outcome = match action {
            Action::Quit => {
                self.should_quit = true;
                Outcome::Ignored
            }
            Action::ToggleGrid => {
                self.show_grid = !self.show_grid;
                self.needs_redraw = true;
                debug!(show_grid = self.show_grid, "grid overlay toggled");
                Outcome::Ignored
            }
            Action::ToggleStart => {
                if self.game.is_running() {
                    self.game.pause()
                } else {
                    self.clock.reset();
                    self.game.start()
                }
            }
            Action::Move(shift) => self.game.move_piece(shift),
            Action::SoftDrop => self.game.drop_piece(),
            Action::Rotate(rotation) => self.game.rotate_piece(rotation),
            Action::HardDrop => self.game.hard_drop(),
        };

        self.sync();
        if outcome != Outcome::Ignored {
            self.needs_redraw = true;
        }
        outcome
    }

    /// Runs one frame: feeds the elapsed time to the gravity timer while the
    /// game is running.
    pub fn frame(&mut self) -> Outcome {
        if !self.game.is_running() {
            self.clock.reset();
            return Outcome::Ignored;
        }

        let delta = self.clock.delta_ms();
        let outcome = self.game.tick(delta);
        self.sync();
        if outcome != Outcome::Pending {
            self.needs_redraw = true;
        }
        outcome
    }

    fn sync(&mut self) {
        for event in self.game.take_events() {
            if let GameEvent::ScoreChanged(score) = event {
                self.score_label = score.to_string();
            }
            self.needs_redraw = true;
        }
    }
}
