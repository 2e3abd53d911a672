use crate::Actuator;
use crate::Direction;
use crate::Position;
use crate::Wiper;

/// Digital potentiometer which tracks its own wiper position.
///
/// A `DigitalPot` executes its movements by pulsing some underlying
/// [Wiper]. The part has no position read-back, so the tracked position is
/// only trustworthy after a forced recalibration (see
/// [DigitalPot::set_position]).
pub struct DigitalPot<W> {
    wiper: W,
    position: Position,
    max_ohms: u32,
}
impl<W: Wiper> DigitalPot<W> {
    /// Creates a new digital potentiometer.
    ///
    /// The new potentiometer assumes its wiper is at tap zero.
    ///
    /// # Parameters
    ///
    /// - `wiper`: The underlying wiper to use.
    /// - `max_ohms`: End-to-end resistance of the part.
    pub fn new(wiper: W, max_ohms: u32) -> Self {
        Self {
            wiper,
            position: Position::zero(),
            max_ohms,
        }
    }

    /// Moves the wiper to `target`.
    ///
    /// With `force_recalibrate`, the wiper is first driven down a full
    /// scale regardless of where it is believed to be; it saturates at tap
    /// zero, which re-synchronises the tracked position with the part.
    ///
    /// # Parameters
    ///
    /// - `target`: Position to move to.
    /// - `force_recalibrate`: Whether to re-zero before moving.
    pub fn set_position(&mut self, target: Position, force_recalibrate: bool) {
        if force_recalibrate {
            for _ in 0..Position::MAX.get_value() {
                self.wiper.step(Direction::Down);
            }
            self.position = Position::zero();
        }

        while let Some(direction) = self.position.direction_to(target) {
            self.step(direction);
        }
    }

    /// Moves the wiper up a single tap.
    ///
    /// # Returns
    ///
    /// - `Some(position)`: the new position, if the wiper moved.
    /// - `None`: if the wiper was already at the top.
    pub fn increment_one(&mut self) -> Option<Position> {
        self.step(Direction::Up)
    }

    /// Moves the wiper a single tap.
    ///
    /// This pulses the underlying wiper only if the tracked position would
    /// stay in range.
    ///
    /// # Parameters
    ///
    /// - `direction`: The direction in which to move.
    ///
    /// # Returns
    ///
    /// - `Some(position)`: the new position, if the wiper moved.
    /// - `None`: if the wiper is already at that end.
    pub fn step(&mut self, direction: Direction) -> Option<Position> {
        let next_position_option = self.position.step(direction);

        if let Some(next_position) = next_position_option {
            self.wiper.step(direction);
            self.position = next_position;
        }

        next_position_option
    }

    /// Returns the current wiper position.
    pub fn get_position(&self) -> Position {
        self.position
    }

    /// Returns the wiper-to-low-end resistance, rounded to the nearest ohm.
    pub fn get_resistance_ohms(&self) -> u32 {
        let taps = Position::MAX.get_value() as u32;
        (self.max_ohms * self.position.get_value() as u32 + taps / 2) / taps
    }
}

impl<W: Wiper> Actuator for DigitalPot<W> {
    fn set_position(&mut self, position: Position) {
        DigitalPot::set_position(self, position, false);
    }

    fn position(&self) -> Position {
        self.get_position()
    }

    fn resistance_ohms(&self) -> u32 {
        self.get_resistance_ohms()
    }
}
