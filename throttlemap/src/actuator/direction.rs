use ufmt_macros::uDebug;

/// Describes the direction of a single wiper movement.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Direction {
    /// Towards the high end of the resistor (U/D pin high).
    Up,
    /// Towards the low end of the resistor (U/D pin low).
    Down,
}

#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating a [Direction].
    pub fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Up), Just(Direction::Down)]
    }
}
