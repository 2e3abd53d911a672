use arduino_hal::{
    hal::port::PC0,
    port::{mode::Analog, Pin},
    Adc,
};
use throttlemap::{AnalogInput, Millivolts};

/// The divider formed by the potentiometer, read on analog pin A0.
pub struct DividerTap {
    pin: Pin<Analog, PC0>,
    adc: Adc,
}

impl DividerTap {
    /// Creates a new `DividerTap`.
    ///
    /// # Parameters
    ///
    /// - `pin`: The analog input pin.
    /// - `adc`: The converter, which this takes ownership of.
    pub fn new(pin: Pin<Analog, PC0>, adc: Adc) -> Self {
        Self { pin, adc }
    }
}

impl AnalogInput for DividerTap {
    const MAX_RAW: u16 = 1023;
    const REFERENCE: Millivolts = Millivolts::new(5000);

    fn read_raw(&mut self) -> u16 {
        self.pin.analog_read(&mut self.adc)
    }
}
