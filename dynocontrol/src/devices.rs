mod analog;
pub mod millis;
mod serial;
mod x9c104;

pub use analog::DividerTap;
pub use serial::UnoConsole;
pub use x9c104::X9c104;
