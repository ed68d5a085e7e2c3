//! System configuration parameters
//!
//! All operating parameters for the regulator are compile-time constants.
//! [`SystemConfig::REFERENCE`] is the shipped configuration; it is checked
//! once at boot by [`SystemConfig::validate`] and never modified afterwards.

use serde::Serialize;

/// Cooler is forced on above `max_temp_c + COOLER_ASSIST_MARGIN_C`.
pub const COOLER_ASSIST_MARGIN_C: f32 = 2.0;
/// `TempCriticalHigh` above `max_temp_c + CRITICAL_HIGH_MARGIN_C`.
pub const CRITICAL_HIGH_MARGIN_C: f32 = 5.0;
/// `TempCriticalLow` below `min_temp_c - CRITICAL_LOW_MARGIN_C`.
pub const CRITICAL_LOW_MARGIN_C: f32 = 2.0;

/// Temperature band and current window for the regulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Lower edge of the target band (°C).
    pub min_temp_c: f32,
    /// Upper edge of the target band (°C).
    pub max_temp_c: f32,
    /// Dead-band extension applied outside the target band (°C).
    pub hysteresis_c: f32,
    /// Lowest drive current at which the Peltier may be engaged (A).
    pub min_current_a: f32,
    /// Highest drive current at which the Peltier may be engaged (A).
    pub max_current_a: f32,
}

impl Thresholds {
    pub const REFERENCE: Self = Self {
        min_temp_c: 2.0,
        max_temp_c: 15.0,
        hysteresis_c: 0.5,
        min_current_a: 6.0,
        max_current_a: 7.0,
    };

    /// Peltier engages strictly above this temperature.
    pub fn engage_above_c(&self) -> f32 {
        self.max_temp_c + self.hysteresis_c
    }

    /// Peltier disengages strictly below this temperature.
    pub fn disengage_below_c(&self) -> f32 {
        self.min_temp_c - self.hysteresis_c
    }

    pub fn cooler_assist_above_c(&self) -> f32 {
        self.max_temp_c + COOLER_ASSIST_MARGIN_C
    }

    pub fn critical_high_above_c(&self) -> f32 {
        self.max_temp_c + CRITICAL_HIGH_MARGIN_C
    }

    pub fn critical_low_below_c(&self) -> f32 {
        self.min_temp_c - CRITICAL_LOW_MARGIN_C
    }

    /// Inclusive current-window check.
    pub fn current_in_window(&self, current_a: f32) -> bool {
        current_a >= self.min_current_a && current_a <= self.max_current_a
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            self.min_temp_c,
            self.max_temp_c,
            self.hysteresis_c,
            self.min_current_a,
            self.max_current_a,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("thresholds must be finite"));
        }
        if self.min_temp_c >= self.max_temp_c {
            return Err(ConfigError::Invalid("min_temp_c must be below max_temp_c"));
        }
        if self.hysteresis_c < 0.0 {
            return Err(ConfigError::Invalid("hysteresis_c must not be negative"));
        }
        if self.min_current_a > self.max_current_a {
            return Err(ConfigError::Invalid(
                "min_current_a must not exceed max_current_a",
            ));
        }
        if self.min_current_a < 0.0 {
            return Err(ConfigError::Invalid("min_current_a must not be negative"));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Calibration of the Hall-effect current sensor read through the ADC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentSenseConfig {
    /// Full-scale ADC code (12-bit → 4095).
    pub adc_max: u16,
    /// ADC reference voltage (V).
    pub vref_v: f32,
    /// Sensor output at zero current (V).
    pub zero_current_v: f32,
    /// Sensor sensitivity (V per A). ACS712-20A: 100 mV/A.
    pub volts_per_amp: f32,
    /// Readings with magnitude above this are rejected as implausible (A).
    pub plausible_limit_a: f32,
}

impl CurrentSenseConfig {
    pub const ACS712_20A: Self = Self {
        adc_max: 4095,
        vref_v: 3.3,
        zero_current_v: 1.65,
        volts_per_amp: 0.1,
        plausible_limit_a: 20.0,
    };
}

/// Core system configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemConfig {
    // --- Regulation ---
    pub thresholds: Thresholds,

    // --- Sensing ---
    pub current_sense: CurrentSenseConfig,

    // --- Timing ---
    /// Control cycle period (milliseconds).
    pub cycle_period_ms: u32,
    /// Main-loop yield between cadence polls (milliseconds).
    pub idle_yield_ms: u32,
}

impl SystemConfig {
    pub const REFERENCE: Self = Self {
        thresholds: Thresholds::REFERENCE,
        current_sense: CurrentSenseConfig::ACS712_20A,
        cycle_period_ms: 2000,
        idle_yield_ms: 100,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        let cs = &self.current_sense;
        if cs.adc_max == 0 {
            return Err(ConfigError::Invalid("adc_max must be non-zero"));
        }
        if !(cs.volts_per_amp.is_finite() && cs.volts_per_amp > 0.0) {
            return Err(ConfigError::Invalid("volts_per_amp must be positive"));
        }
        if !(cs.vref_v.is_finite() && cs.vref_v > 0.0) {
            return Err(ConfigError::Invalid("vref_v must be positive"));
        }
        if !(cs.plausible_limit_a.is_finite() && cs.plausible_limit_a > self.thresholds.max_current_a) {
            return Err(ConfigError::Invalid(
                "plausible_limit_a must exceed max_current_a",
            ));
        }
        if self.cycle_period_ms == 0 {
            return Err(ConfigError::Invalid("cycle_period_ms must be non-zero"));
        }
        if self.idle_yield_ms >= self.cycle_period_ms {
            return Err(ConfigError::Invalid(
                "idle_yield_ms must be shorter than the cycle period",
            ));
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// The configuration the firmware is built with.
pub const CONFIG: SystemConfig = SystemConfig::REFERENCE;

/// A configuration constant failed its consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}
