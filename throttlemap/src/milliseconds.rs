use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

/// Underlying type representing the number of milliseconds.
type MillisecondsRepr = u32;

/// Time in milliseconds.
///
/// This is used both for instants read from the free-running millisecond
/// counter and for durations between them. The counter wraps after about 49.7
/// days, so instants must only ever be compared through
/// [Milliseconds::elapsed_since].
#[derive(
    Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Default,
)]
pub struct Milliseconds(MillisecondsRepr);
impl Milliseconds {
    /// Creates a new `Milliseconds`.
    pub const fn new(value: MillisecondsRepr) -> Self {
        Self(value)
    }

    /// Zero milliseconds.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the value as a `u32`.
    pub fn get_value(&self) -> MillisecondsRepr {
        self.0
    }

    /// Returns the time elapsed from `earlier` until `self`.
    ///
    /// The subtraction wraps, so the result is correct across a counter
    /// rollover provided the real interval is shorter than the counter
    /// period.
    pub fn elapsed_since(&self, earlier: Milliseconds) -> Milliseconds {
        Milliseconds(self.0.wrapping_sub(earlier.0))
    }

    /// Adds a duration to an instant, wrapping like the hardware counter.
    pub fn wrapping_add(&self, duration: Milliseconds) -> Milliseconds {
        Milliseconds(self.0.wrapping_add(duration.0))
    }
}

impl uDisplay for Milliseconds {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uDisplay::fmt(&self.0, f)
    }
}
