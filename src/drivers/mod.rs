//! Output drivers, hardware initialisation, and the task watchdog.

pub mod hw_init;
pub mod switch;
pub mod watchdog;
