use core::convert::Infallible;

use arduino_hal::{
    hal::port::{PD0, PD1},
    pac::USART0,
    port::{
        mode::{Input, Output},
        Pin,
    },
    prelude::*,
    Usart,
};
use throttlemap::SerialPort;
use ufmt::uWrite;

pub type UnoSerial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

/// The USB serial link of the Uno.
pub struct UnoConsole {
    serial: UnoSerial,
}

impl UnoConsole {
    /// Creates a new `UnoConsole`.
    pub fn new(serial: UnoSerial) -> Self {
        Self { serial }
    }
}

impl uWrite for UnoConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        uWrite::write_str(&mut self.serial, s)
    }
}

impl SerialPort for UnoConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.serial.read().ok()
    }
}
