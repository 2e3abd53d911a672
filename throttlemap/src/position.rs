use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

use crate::Direction;

/// Underlying type representing a wiper position.
type PositionRepr = u8;

/// Wiper position of the digital potentiometer, in taps.
///
/// A `Position` is always in the range `[0, 99]`; every way of building or
/// moving one is checked against that range.
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct Position(PositionRepr);
impl Position {
    /// The highest tap.
    pub const MAX: Position = Position(99);

    /// Creates a new `Position`, provided `value` is a valid tap.
    pub fn new(value: i32) -> Option<Self> {
        if (0..=Self::MAX.0 as i32).contains(&value) {
            Some(Self(value as PositionRepr))
        } else {
            None
        }
    }

    /// The lowest tap.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the tap number.
    pub fn get_value(&self) -> PositionRepr {
        self.0
    }

    /// Returns the position `delta` taps away, if that is still a valid tap.
    pub fn offset(&self, delta: i32) -> Option<Self> {
        (self.0 as i32).checked_add(delta).and_then(Self::new)
    }

    /// Returns the neighbouring position in `direction`, if there is one.
    pub fn step(&self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.offset(1),
            Direction::Down => self.offset(-1),
        }
    }

    /// Returns the direction to move in to get from `self` to `target`, or
    /// `None` if they are the same.
    pub fn direction_to(&self, target: Position) -> Option<Direction> {
        if target > *self {
            Some(Direction::Up)
        } else if target < *self {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Returns the number of taps between `self` and `other`.
    pub fn distance_to(&self, other: Position) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl uDisplay for Position {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uDisplay::fmt(&self.0, f)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating every valid [Position].
    pub fn position() -> impl Strategy<Value = Position> {
        (0..=99i32).prop_map(|p| Position::new(p).unwrap())
    }

    #[test]
    fn test_new_bounds() {
        assert_eq!(Some(Position::zero()), Position::new(0));
        assert_eq!(Some(Position::MAX), Position::new(99));
        assert_eq!(None, Position::new(100));
        assert_eq!(None, Position::new(-1));
    }

    #[test]
    fn test_step_at_ends() {
        assert_eq!(None, Position::zero().step(Direction::Down));
        assert_eq!(None, Position::MAX.step(Direction::Up));
        assert_eq!(Position::new(1), Position::zero().step(Direction::Up));
    }

    #[test]
    fn test_offset_overflow() {
        assert_eq!(None, Position::MAX.offset(i32::MAX));
        assert_eq!(None, Position::zero().offset(i32::MIN));
    }

    proptest! {
        #[test]
        fn test_direction_and_distance(a in position(), b in position()) {
            match a.direction_to(b) {
                None => assert_eq!(a, b),
                Some(Direction::Up) => assert!(b > a),
                Some(Direction::Down) => assert!(b < a),
            }
            assert_eq!(
                (a.get_value() as i32 - b.get_value() as i32).unsigned_abs(),
                a.distance_to(b) as u32
            );
        }
    }

    proptest! {
        #[test]
        fn test_offset_stays_in_range(p in position(), delta in -200i32..200) {
            let expected = p.get_value() as i32 + delta;
            match p.offset(delta) {
                Some(q) => assert_eq!(expected, q.get_value() as i32),
                None => assert!(!(0..=99).contains(&expected)),
            }
        }
    }
}
