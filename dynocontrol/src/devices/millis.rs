//! Millisecond clock on timer/counter 0.
//!
//! TC0 runs in CTC mode with a compare-match interrupt every millisecond.
//! The interrupt is the only thing that writes the counter.

use core::cell::Cell;

use arduino_hal::pac::TC0;
use avr_device::interrupt::{self, Mutex};
use throttlemap::Milliseconds;

const PRESCALER: u32 = 64;
const TIMER_COUNTS: u32 = 250;
const MILLIS_INCREMENT: u32 = PRESCALER * TIMER_COUNTS / 16_000;

static MILLIS_COUNTER: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// Starts the clock from zero.
///
/// Interrupts must be enabled afterwards for the clock to run.
pub fn init(tc0: TC0) {
    tc0.tccr0a().write(|w| w.wgm0().ctc());
    tc0.ocr0a()
        .write(|w| unsafe { w.bits((TIMER_COUNTS - 1) as u8) });
    tc0.tccr0b().write(|w| w.cs0().prescale_64());
    tc0.timsk0().write(|w| w.ocie0a().set_bit());

    interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).set(0));
}

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    interrupt::free(|cs| {
        let counter = MILLIS_COUNTER.borrow(cs);
        counter.set(counter.get().wrapping_add(MILLIS_INCREMENT));
    })
}

/// Returns the time since [init].
pub fn now() -> Milliseconds {
    Milliseconds::new(interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).get()))
}
