#![cfg_attr(not(test), no_std)]

mod actuator;
pub mod command;
mod config;
mod controller;
pub mod input;
mod milliseconds;
mod millivolts;
pub mod motion;
mod position;
pub mod report;
pub mod sensor;
pub mod serial;
mod timer;

pub use actuator::Actuator;
pub use actuator::DigitalPot;
pub use actuator::Direction;
pub use actuator::Wiper;
pub use config::Config;
pub use controller::Controller;
pub use controller::QUEUE_DEPTH;
pub use milliseconds::Milliseconds;
pub use millivolts::Millivolts;
pub use position::Position;
pub use sensor::AnalogInput;
pub use serial::SerialPort;
pub use timer::SoftTimer;

#[cfg(test)]
pub use actuator::TestWiper;
