//! Hall-effect current sensor (ACS712-20A) read through ADC1.
//!
//! The sensor outputs `zero_current_v + I × volts_per_amp`, sampled by
//! the 12-bit ADC:
//!
//! ```text
//! volts = raw / adc_max × vref
//! amps  = (volts − zero_current_v) / volts_per_amp
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC1 current channel via the oneshot API
//! (initialised by hw_init).  A failed conversion is an error, never 0 A.
//! On host/test: reads from a static AtomicU32 for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::CurrentSenseConfig;
use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Injected value meaning "conversion failed".
#[cfg(not(target_os = "espidf"))]
pub const SIM_ADC_FAIL: u32 = u32::MAX;

/// Mid-scale: zero current with the reference calibration.
#[cfg(not(target_os = "espidf"))]
static SIM_CURRENT_ADC: AtomicU32 = AtomicU32::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_current_adc(raw: u32) {
    SIM_CURRENT_ADC.store(raw, Ordering::Relaxed);
}

pub struct CurrentSensor {
    cal: CurrentSenseConfig,
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    adc_channel: u32,
}

impl CurrentSensor {
    pub fn new(adc_channel: u32, cal: CurrentSenseConfig) -> Self {
        Self { cal, adc_channel }
    }

    /// Read the drive current in amperes.
    pub fn read(&self) -> Result<f32, SensorError> {
        let raw = self.read_adc()?;
        self.raw_to_amps(raw)
    }

    /// Convert a raw ADC code, rejecting codes beyond full scale and
    /// currents beyond the plausibility limit.
    pub fn raw_to_amps(&self, raw: u16) -> Result<f32, SensorError> {
        let cal = &self.cal;
        if raw > cal.adc_max {
            return Err(SensorError::OutOfRange);
        }
        let volts = f32::from(raw) / f32::from(cal.adc_max) * cal.vref_v;
        let amps = (volts - cal.zero_current_v) / cal.volts_per_amp;
        if !amps.is_finite() || amps.abs() > cal.plausible_limit_a {
            return Err(SensorError::OutOfRange);
        }
        Ok(amps)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let raw = SIM_CURRENT_ADC.load(Ordering::Relaxed);
        if raw == SIM_ADC_FAIL {
            return Err(SensorError::AdcReadFailed);
        }
        u16::try_from(raw).map_err(|_| SensorError::OutOfRange)
    }
}
