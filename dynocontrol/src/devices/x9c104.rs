use arduino_hal::{
    delay_us,
    port::{mode::Output, Pin, PinOps},
};
use throttlemap::{Direction, Wiper};

/// X9C104 digital potentiometer.
///
/// The wiper moves one tap on each falling edge of INC while CS is low. The
/// part stores the wiper position to its non-volatile memory if CS rises
/// while INC is high; this driver always deselects with INC low, so the
/// part powers up at whatever tap it last stored and must be recalibrated.
///
/// # Type Parameters
///
/// - `CS`: chip select pin
/// - `INC`: increment pin
/// - `UD`: up/down pin
pub struct X9c104<CS, INC, UD> {
    pin_cs: Pin<Output, CS>,
    pin_inc: Pin<Output, INC>,
    pin_ud: Pin<Output, UD>,
}

impl<CS: PinOps, INC: PinOps, UD: PinOps> X9c104<CS, INC, UD> {
    /// U/D setup time before INC falls, in microseconds.
    const DIRECTION_SETUP_US: u32 = 3;
    /// INC low and high times, in microseconds.
    const PULSE_US: u32 = 1;

    /// Creates a new `X9C104`, leaving the part deselected.
    ///
    /// # Parameters
    ///
    /// - `pin_cs`: Pin connected to CS.
    /// - `pin_inc`: Pin connected to INC.
    /// - `pin_ud`: Pin connected to U/D.
    pub fn new(
        mut pin_cs: Pin<Output, CS>,
        mut pin_inc: Pin<Output, INC>,
        pin_ud: Pin<Output, UD>,
    ) -> Self {
        pin_inc.set_high();
        pin_cs.set_high();
        Self {
            pin_cs,
            pin_inc,
            pin_ud,
        }
    }
}

impl<CS: PinOps, INC: PinOps, UD: PinOps> Wiper for X9c104<CS, INC, UD> {
    fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.pin_ud.set_high(),
            Direction::Down => self.pin_ud.set_low(),
        }
        self.pin_cs.set_low();
        delay_us(Self::DIRECTION_SETUP_US);

        self.pin_inc.set_low();
        delay_us(Self::PULSE_US);

        // Deselect with INC low: no store.
        self.pin_cs.set_high();
        self.pin_inc.set_high();
        delay_us(Self::PULSE_US);
    }
}
