use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

/// Underlying type representing the number of millivolts.
type MillivoltsRepr = u32;

/// Voltage in millivolts.
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct Millivolts(MillivoltsRepr);
impl Millivolts {
    /// Creates a new `Millivolts`.
    pub const fn new(value: MillivoltsRepr) -> Self {
        Self(value)
    }

    /// Returns the value as a `u32`.
    pub fn get_value(&self) -> MillivoltsRepr {
        self.0
    }
}

/// Displays the voltage in volts, rounded to two decimal places.
///
/// eg.
///   - 0    -> 0.00
///   - 2346 -> 2.35
///   - 5000 -> 5.00
impl uDisplay for Millivolts {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let centivolts = (self.0 + 5) / 10;
        let int_part = centivolts / 100;
        let frc_part = centivolts % 100;

        uDisplay::fmt(&int_part, f)?;
        f.write_char('.')?;
        if frc_part < 10 {
            f.write_char('0')?;
        }
        uDisplay::fmt(&frc_part, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::serial::TestSerial;
    use proptest::prelude::*;
    use ufmt::uwrite;

    fn show(mv: u32) -> String {
        let mut out = TestSerial::new();
        uwrite!(&mut out, "{}", Millivolts::new(mv)).unwrap();
        out.take_output()
    }

    #[test]
    fn test_display_examples() {
        assert_eq!("0.00", show(0));
        assert_eq!("0.01", show(5));
        assert_eq!("0.10", show(100));
        assert_eq!("2.35", show(2346));
        assert_eq!("2.34", show(2344));
        assert_eq!("5.00", show(4999));
        assert_eq!("5.00", show(5000));
    }

    proptest! {
        #[test]
        fn test_display_matches_float(mv in 0u32..100_000) {
            let expected = format!("{:.2}", (mv as f64 + 0.001) / 1000.0);
            assert_eq!(expected, show(mv));
        }
    }
}
