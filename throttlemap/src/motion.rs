use ufmt_macros::uDebug;

use crate::timer::SoftTimer;
use crate::{Actuator, Milliseconds, Position};

/// States of the motion state machine.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum MotionState {
    /// Ready to accept a command.
    Idle,
    /// A command has just been applied; its outcome is decided next tick.
    Executing,
    /// Holding until the wait timer expires.
    Waiting,
    /// Stepping towards a ramp target.
    Linear,
}

/// Bookkeeping for a linear ramp.
///
/// The ramp takes one step per interval. Intervals are whole milliseconds,
/// so the remainder of `duration / steps` is spread across them: step `k`
/// (counting from zero) is due at `floor(duration * (k + 1) / steps)` after
/// the start, and the final step lands exactly at `duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct RampPlan {
    target: Position,
    total_steps: u8,
    remaining_steps: u8,
    duration: Milliseconds,
    step_timer: SoftTimer,
}
impl RampPlan {
    /// Plans a ramp.
    ///
    /// # Parameters
    ///
    /// - `from`: Position at the start of the ramp.
    /// - `target`: Position at the end of the ramp.
    /// - `duration`: Time the ramp should take.
    ///
    /// # Returns
    ///
    /// - `Some(plan)`: the ramp.
    /// - `None`: if `from` and `target` are the same, so there is nothing to
    ///   do.
    pub fn new(
        from: Position,
        target: Position,
        duration: Milliseconds,
    ) -> Option<Self> {
        let total_steps = from.distance_to(target);
        if total_steps == 0 {
            return None;
        }
        let mut plan = Self {
            target,
            total_steps,
            remaining_steps: total_steps,
            duration,
            step_timer: SoftTimer::new(Milliseconds::zero()),
        };
        plan.step_timer.set_duration(plan.interval(0));
        Some(plan)
    }

    /// Returns the target of the ramp.
    pub fn target(&self) -> Position {
        self.target
    }

    /// Returns the number of steps still to take.
    pub fn remaining_steps(&self) -> u8 {
        self.remaining_steps
    }

    /// Time from the start of the ramp until step `k` is due.
    fn deadline(&self, k: u8) -> u32 {
        let total = self.duration.get_value() as u64 * (k as u64 + 1);
        (total / self.total_steps as u64) as u32
    }

    /// Time between step `k - 1` and step `k`.
    fn interval(&self, k: u8) -> Milliseconds {
        let previous = if k == 0 { 0 } else { self.deadline(k - 1) };
        Milliseconds::new(self.deadline(k) - previous)
    }

    fn start(&mut self, now: Milliseconds) {
        self.step_timer.start(now);
    }

    /// Takes the next step if it is due.
    ///
    /// At most one step is taken per call; a late caller catches up over the
    /// following calls because each interval is measured from the previous
    /// deadline.
    ///
    /// # Returns
    ///
    /// `true` once no steps remain.
    fn poll<A: Actuator>(
        &mut self,
        actuator: &mut A,
        now: Milliseconds,
    ) -> bool {
        if self.remaining_steps > 0 && self.step_timer.expired(now) {
            let current = actuator.position();
            if let Some(next) = current
                .direction_to(self.target)
                .and_then(|direction| current.step(direction))
            {
                actuator.set_position(next);
            }
            self.remaining_steps -= 1;

            let taken = self.total_steps - self.remaining_steps;
            self.step_timer.advance();
            if self.remaining_steps > 0 {
                self.step_timer.set_duration(self.interval(taken));
            }
        }
        self.remaining_steps == 0
    }
}

/// The motion and wait state machine.
///
/// Commands are applied while the machine is [MotionState::Idle], after
/// which [MotionController::begin] hands control to the machine. Each call
/// to [MotionController::poll] then advances it by at most one transition.
pub struct MotionController {
    state: MotionState,
    wait_timer: SoftTimer,
    ramp: Option<RampPlan>,
}
impl MotionController {
    /// Creates a new, idle state machine.
    pub fn new() -> Self {
        Self {
            state: MotionState::Idle,
            wait_timer: SoftTimer::new(Milliseconds::zero()),
            ramp: None,
        }
    }

    /// Leaves `Idle` after a command has been applied.
    pub fn begin(&mut self) {
        self.state = MotionState::Executing;
    }

    /// Starts a wait of `duration` from `now`.
    pub fn start_wait(&mut self, duration: Milliseconds, now: Milliseconds) {
        self.wait_timer = SoftTimer::new(duration);
        self.wait_timer.start(now);
    }

    /// Starts `plan` from `now`.
    pub fn start_ramp(&mut self, mut plan: RampPlan, now: Milliseconds) {
        plan.start(now);
        self.ramp = Some(plan);
    }

    /// Returns the current state.
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Checks whether the machine can accept a command.
    pub fn is_idle(&self) -> bool {
        self.state == MotionState::Idle
    }

    /// Returns the ramp in progress, if any.
    pub fn ramp(&self) -> Option<&RampPlan> {
        self.ramp.as_ref()
    }

    /// Advances the state machine.
    ///
    /// # Returns
    ///
    /// `true` on the transition back to `Idle`, which ends the current
    /// command.
    pub fn poll<A: Actuator>(
        &mut self,
        actuator: &mut A,
        now: Milliseconds,
    ) -> bool {
        let (next, finished) = match self.state {
            MotionState::Idle => (MotionState::Idle, false),
            MotionState::Executing => {
                if !self.wait_timer.expired(now) {
                    (MotionState::Waiting, false)
                } else if self.ramp.is_some() {
                    (MotionState::Linear, false)
                } else {
                    (MotionState::Idle, true)
                }
            }
            MotionState::Waiting => {
                if self.wait_timer.expired(now) {
                    (MotionState::Idle, true)
                } else {
                    (MotionState::Waiting, false)
                }
            }
            MotionState::Linear => {
                let done = match self.ramp.as_mut() {
                    Some(plan) => plan.poll(actuator, now),
                    None => true,
                };
                if done {
                    self.ramp = None;
                    (MotionState::Idle, true)
                } else {
                    (MotionState::Linear, false)
                }
            }
        };
        self.state = next;
        finished
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new()
    }
}
