//! Frame timing that feeds `Game::tick`.

use std::collections::VecDeque;
use std::time::Instant;

/// Source of elapsed time between frames, in milliseconds.
pub trait TickSource {
    fn delta_ms(&mut self) -> u64;

    /// Forget the previous frame so the next delta starts from zero.
    fn reset(&mut self);
}

/// Wall-clock tick source. The first frame after creation or `reset`
/// reports zero elapsed time.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for FrameClock {
    fn delta_ms(&mut self) -> u64 {
        let now = Instant::now();
        let delta = self
            .last
            .map(|last| now.duration_since(last).as_millis() as u64)
            .unwrap_or(0);
        self.last = Some(now);
        delta
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

/// Replays a fixed list of deltas, then reports zero. Scripted deltas are
/// not wall time, so `reset` leaves them in place.
#[derive(Debug, Default)]
pub struct ManualClock {
    deltas: VecDeque<u64>,
}

impl ManualClock {
    pub fn new(deltas: impl IntoIterator<Item = u64>) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
        }
    }

    pub fn push(&mut self, delta_ms: u64) {
        self.deltas.push_back(delta_ms);
    }
}

impl TickSource for ManualClock {
    fn delta_ms(&mut self) -> u64 {
        self.deltas.pop_front().unwrap_or(0)
    }

    fn reset(&mut self) {}
}
