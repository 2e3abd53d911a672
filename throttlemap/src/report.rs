use ufmt::{uDisplay, uWrite, Formatter};

use crate::timer::SoftTimer;
use crate::{Milliseconds, Millivolts, Position};

/// One sample of the potentiometer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Voltage measured at the divider.
    pub voltage: Millivolts,
    /// Wiper position.
    pub position: Position,
    /// Resistance corresponding to `position`.
    pub resistance_ohms: u32,
    /// When the sample was taken.
    pub timestamp: Milliseconds,
}
impl Measurement {
    /// A measurement of nothing, taken at time zero.
    pub const fn zero() -> Self {
        Self {
            voltage: Millivolts::new(0),
            position: Position::zero(),
            resistance_ohms: 0,
            timestamp: Milliseconds::zero(),
        }
    }
}

/// Displays the payload of a status line.
///
/// eg. `2.35,42,40727,123456`
impl uDisplay for Measurement {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uDisplay::fmt(&self.voltage, f)?;
        f.write_char(',')?;
        uDisplay::fmt(&self.position, f)?;
        f.write_char(',')?;
        uDisplay::fmt(&self.resistance_ohms, f)?;
        f.write_char(',')?;
        uDisplay::fmt(&self.timestamp, f)
    }
}

/// Decides when a status line is due.
///
/// A status line goes out once per report interval, and additionally as soon
/// as possible after the wiper moves or a read is requested. Either way,
/// nothing is reported until the settling time has passed since the last
/// movement, so the measured voltage reflects the new position.
pub struct Reporter {
    settle_timer: SoftTimer,
    cadence_timer: SoftTimer,
    new_value: bool,
    last_position: Position,
}
impl Reporter {
    /// Creates a new reporter.
    ///
    /// A new reporter always has a value pending, so the first status line
    /// is sent as soon as possible.
    ///
    /// # Parameters
    ///
    /// - `settle_time`: Settling time after a movement.
    /// - `report_interval`: Interval between unsolicited status lines.
    /// - `last_position`: Wiper position as last seen.
    pub fn new(
        settle_time: Milliseconds,
        report_interval: Milliseconds,
        last_position: Position,
    ) -> Self {
        Self {
            settle_timer: SoftTimer::new(settle_time),
            cadence_timer: SoftTimer::new(report_interval),
            new_value: true,
            last_position,
        }
    }

    /// Records the current wiper position.
    ///
    /// A change since the previous call restarts the settling time and marks
    /// a new value as pending.
    pub fn observe(&mut self, position: Position, now: Milliseconds) {
        if position != self.last_position {
            self.settle_timer.start(now);
            self.new_value = true;
            self.last_position = position;
        }
    }

    /// Requests a status line regardless of the report interval.
    pub fn request(&mut self) {
        self.new_value = true;
    }

    /// Checks whether a value is waiting to be reported.
    pub fn has_pending(&self) -> bool {
        self.new_value
    }

    /// Checks whether a status line is due now.
    ///
    /// A `true` return is taken to mean that the line was sent.
    pub fn poll(&mut self, now: Milliseconds) -> bool {
        let due = self.settle_timer.expired(now)
            && (self.new_value || self.cadence_timer.expired(now));
        if due {
            self.cadence_timer.start(now);
            self.new_value = false;
        }
        due
    }
}
