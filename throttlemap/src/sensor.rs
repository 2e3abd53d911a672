use crate::Millivolts;

/// Analog input measuring the voltage at the potentiometer divider.
///
/// [AnalogInput::read_raw] is a blocking conversion. Its latency is bounded
/// by the converter (about 110 µs on the ATmega328P at the default
/// prescaler) and the reporter's settling window assumes the reading is
/// complete by the time it returns.
pub trait AnalogInput {
    /// Full-scale raw reading.
    const MAX_RAW: u16;

    /// Voltage corresponding to a full-scale reading.
    const REFERENCE: Millivolts;

    /// Performs one conversion and returns the raw reading.
    fn read_raw(&mut self) -> u16;

    /// Performs one conversion and returns it in millivolts.
    fn read_millivolts(&mut self) -> Millivolts {
        to_millivolts(self.read_raw(), Self::MAX_RAW, Self::REFERENCE)
    }
}

/// Converts a raw converter reading to millivolts.
///
/// Readings above `max_raw` are clamped to full scale.
pub fn to_millivolts(
    raw: u16,
    max_raw: u16,
    reference: Millivolts,
) -> Millivolts {
    if max_raw == 0 {
        return Millivolts::new(0);
    }
    let raw = raw.min(max_raw) as u32;
    Millivolts::new(raw * reference.get_value() / max_raw as u32)
}

#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::prelude::*;

    /// Sensor to use for testing purposes: a 10-bit converter referenced to
    /// 5 V that returns whatever it was last given.
    pub struct TestSensor {
        raw: u16,
    }
    impl TestSensor {
        /// Creates a new test sensor returning `raw`.
        pub fn new(raw: u16) -> Self {
            Self { raw }
        }
    }
    impl AnalogInput for TestSensor {
        const MAX_RAW: u16 = 1023;
        const REFERENCE: Millivolts = Millivolts::new(5000);

        fn read_raw(&mut self) -> u16 {
            self.raw
        }
    }

    #[test]
    fn test_conversion_examples() {
        let reference = Millivolts::new(5000);
        assert_eq!(Millivolts::new(0), to_millivolts(0, 1023, reference));
        assert_eq!(Millivolts::new(5000), to_millivolts(1023, 1023, reference));
        assert_eq!(Millivolts::new(2500), to_millivolts(1023, 2046, reference));
        assert_eq!(Millivolts::new(5000), to_millivolts(4000, 1023, reference));
    }

    #[test]
    fn test_read_millivolts() {
        let mut sensor = TestSensor::new(512);
        // 512 * 5000 / 1023 = 2502.44...
        assert_eq!(Millivolts::new(2502), sensor.read_millivolts());
    }

    proptest! {
        #[test]
        fn test_conversion_is_monotonic(a: u16, b: u16) {
            let reference = Millivolts::new(5000);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            assert!(
                to_millivolts(lo, 1023, reference)
                    <= to_millivolts(hi, 1023, reference)
            );
        }
    }
}
