//! Control decision logic: the hysteretic regulator and its alarm set.

pub mod alarms;
pub mod regulator;

pub use alarms::{Alarm, AlarmSet};
pub use regulator::{ActuatorState, Decision, PeltierState, Regulator, Sample};
