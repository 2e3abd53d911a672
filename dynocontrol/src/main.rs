#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

mod board;
mod devices;

use board::Board;
use panic_halt as _;

#[arduino_hal::entry]
fn main() -> ! {
    let mut board = Board::new();
    loop {
        board.tick();
    }
}
