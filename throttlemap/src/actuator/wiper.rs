use crate::Direction;

/// Wiper of a digital potentiometer.
///
/// A wiper moves one tap per call and has no notion of its own position.
/// Like the real part, it is expected to stop silently at either end of the
/// resistor. For a wiper that knows where it is, see [crate::DigitalPot].
pub trait Wiper {
    /// Moves the wiper a single tap in the supplied direction.
    ///
    /// # Parameters
    ///
    /// - `direction`: Direction in which to move.
    fn step(&mut self, direction: Direction);
}
