use crate::Milliseconds;

/// Non-blocking interval timer.
///
/// A `SoftTimer` is polled rather than waited on: it records when it was
/// started and answers whether its duration has elapsed since then. A timer
/// that has never been started is already expired, and a zero-length timer
/// expires as soon as it is started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftTimer {
    duration: Milliseconds,
    start: Milliseconds,
    running: bool,
}
impl SoftTimer {
    /// Creates a new, unstarted timer.
    pub const fn new(duration: Milliseconds) -> Self {
        Self {
            duration,
            start: Milliseconds::zero(),
            running: false,
        }
    }

    /// Arms the timer from `now`.
    pub fn start(&mut self, now: Milliseconds) {
        self.start = now;
        self.running = true;
    }

    /// Re-arms the timer from its previous deadline rather than from the
    /// current time, so a periodic timer does not accumulate the latency of
    /// the loop that polls it.
    pub fn advance(&mut self) {
        self.start = self.start.wrapping_add(self.duration);
    }

    /// Changes the duration without re-arming the timer.
    pub fn set_duration(&mut self, duration: Milliseconds) {
        self.duration = duration;
    }

    /// Returns the duration of the timer.
    pub fn get_duration(&self) -> Milliseconds {
        self.duration
    }

    /// Checks whether the duration has elapsed at `now`.
    pub fn expired(&self, now: Milliseconds) -> bool {
        !self.running || now.elapsed_since(self.start) >= self.duration
    }
}
