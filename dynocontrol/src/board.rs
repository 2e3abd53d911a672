use arduino_hal::{
    default_serial, delay_ms, pins,
    port::{mode::Output, Pin, D13, D2, D3, D4},
    prelude::_unwrap_infallible_UnwrapInfallible,
    Adc, Peripherals, Pins,
};
use throttlemap::{Config, Controller, DigitalPot, Position};
use ufmt::uwriteln;

use crate::devices::{millis, DividerTap, UnoConsole, X9c104};

/// Capacity of the serial line buffer.
const LINE_CAPACITY: usize = 32;

type Pot = DigitalPot<X9c104<D4, D3, D2>>;
type Led = Pin<Output, D13>;

/// The DynoControl board: an Arduino Uno driving an X9C104.
///
/// Pin assignment:
///
/// - D2: X9C104 U/D
/// - D3: X9C104 INC
/// - D4: X9C104 CS
/// - D13: heartbeat LED
/// - A0: divider voltage
pub struct Board {
    controller: Controller<Pot, DividerTap, Led, LINE_CAPACITY>,
    console: UnoConsole,
}

impl Board {
    const BAUD_RATE: u32 = 57600;
    const VERSION: &'static str = "0.72";
    /// Measured end-to-end resistance of the fitted part.
    const POT_MAX_OHMS: u32 = 96_000;
    const STARTUP_DELAY_MS: u32 = 20;

    /// Brings up the board.
    ///
    /// This announces the firmware, re-zeroes the potentiometer and sends
    /// the end marker once the board is ready for commands.
    pub fn new() -> Self {
        let peripherals: Peripherals = unsafe { Peripherals::steal() };
        let pins: Pins = pins!(peripherals);
        let serial = default_serial!(peripherals, pins, Self::BAUD_RATE);

        millis::init(peripherals.TC0);
        // SAFETY: the clock is the only interrupt, and it is configured.
        unsafe { avr_device::interrupt::enable() };

        let mut console = UnoConsole::new(serial);
        uwriteln!(&mut console, "Throttle Mapper Ver. {}", Self::VERSION)
            .unwrap_infallible();

        let mut adc = Adc::new(peripherals.ADC, Default::default());
        let sensor = DividerTap::new(pins.a0.into_analog_input(&mut adc), adc);

        let wiper = X9c104::new(
            pins.d4.into_output(),
            pins.d3.into_output(),
            pins.d2.into_output(),
        );
        let mut pot = DigitalPot::new(wiper, Self::POT_MAX_OHMS);
        pot.set_position(Position::zero(), true);

        let led = pins.d13.into_output();

        delay_ms(Self::STARTUP_DELAY_MS);
        uwriteln!(&mut console, "E").unwrap_infallible();

        let controller = Controller::new(pot, sensor, led, Config::DEFAULT);
        Self {
            controller,
            console,
        }
    }

    /// Runs one iteration of the control loop.
    pub fn tick(&mut self) {
        self.controller
            .tick(&mut self.console, millis::now())
            .unwrap_infallible();
    }
}
