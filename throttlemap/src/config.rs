use crate::Milliseconds;

/// Timing constants and switches for the control loop.
///
/// These are fixed when the firmware is built; nothing changes them at run
/// time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// A partial line is dropped after this long without a new byte.
    pub idle_timeout: Milliseconds,
    /// Time allowed for the divider voltage to settle after the wiper moves.
    pub settle_time: Milliseconds,
    /// Interval between unsolicited status lines.
    pub report_interval: Milliseconds,
    /// Interval between toggles of the heartbeat LED.
    pub heartbeat_interval: Milliseconds,
    /// Whether received lines are echoed back.
    pub echo: bool,
}
impl Config {
    /// Settings used by the DynoControl firmware.
    pub const DEFAULT: Config = Config {
        idle_timeout: Milliseconds::new(1000),
        settle_time: Milliseconds::new(20),
        report_interval: Milliseconds::new(100),
        heartbeat_interval: Milliseconds::new(1000),
        echo: false,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
