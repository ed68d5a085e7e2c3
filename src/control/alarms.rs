//! Advisory alarm kinds and the per-cycle alarm set.
//!
//! Alarms are recomputed from scratch every cycle and never latched. They
//! are informational only: the engage/disengage guards in the regulator
//! already take every corrective action the system is allowed to take.

use core::fmt;

use serde::{Serialize, Serializer};

/// A single advisory alarm kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Alarm {
    /// Drive current fell below the window while the element was engaged.
    CurrentLow = 0b0000_0001,
    /// Drive current is above the window.
    CurrentHigh = 0b0000_0010,
    /// Temperature is above the critical-high margin.
    TempCriticalHigh = 0b0000_0100,
    /// Temperature is below the critical-low margin.
    TempCriticalLow = 0b0000_1000,
    /// Temperature sensor could not be read this cycle.
    SensorFault = 0b0001_0000,
    /// Current sense could not be read this cycle.
    CurrentSenseFault = 0b0010_0000,
}

impl Alarm {
    /// Every alarm kind, in reporting order.
    pub const ALL: [Alarm; 6] = [
        Alarm::SensorFault,
        Alarm::CurrentSenseFault,
        Alarm::CurrentLow,
        Alarm::CurrentHigh,
        Alarm::TempCriticalHigh,
        Alarm::TempCriticalLow,
    ];

    /// Return the bitmask for this alarm.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentLow => write!(f, "current below minimum, Peltier disengaged"),
            Self::CurrentHigh => write!(f, "current above maximum, Peltier disengaged"),
            Self::TempCriticalHigh => write!(f, "temperature critically high"),
            Self::TempCriticalLow => write!(f, "temperature critically low"),
            Self::SensorFault => write!(f, "temperature sensor read failed, holding outputs"),
            Self::CurrentSenseFault => write!(f, "current sense read failed, Peltier disengaged"),
        }
    }
}

/// Set of alarms raised in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmSet(u8);

impl AlarmSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, alarm: Alarm) {
        self.0 |= alarm.mask();
    }

    /// Insert `alarm` when `condition` holds.
    pub fn raise_if(&mut self, alarm: Alarm, condition: bool) {
        if condition {
            self.insert(alarm);
        }
    }

    pub fn contains(&self, alarm: Alarm) -> bool {
        self.0 & alarm.mask() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Raw bitmask (see [`Alarm::mask`]).
    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Alarm> + '_ {
        Alarm::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl FromIterator<Alarm> for AlarmSet {
    fn from_iter<I: IntoIterator<Item = Alarm>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for alarm in iter {
            set.insert(alarm);
        }
        set
    }
}

impl Serialize for AlarmSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
