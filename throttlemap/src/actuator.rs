mod digital_pot;
mod direction;
mod wiper;

pub use digital_pot::DigitalPot;
pub use direction::Direction;
pub use wiper::Wiper;

#[cfg(test)]
pub use wiper::test::TestWiper;

use crate::Position;

/// The positioning capability the control loop drives.
///
/// This is what the command interpreter and the motion controller see of the
/// potentiometer: move to a tap, report the tap, report the resistance.
pub trait Actuator {
    /// Moves to `position`, taking as many single-tap steps as needed.
    fn set_position(&mut self, position: Position);

    /// Returns the current position.
    fn position(&self) -> Position;

    /// Returns the equivalent resistance at the current position, in ohms.
    fn resistance_ohms(&self) -> u32;
}
