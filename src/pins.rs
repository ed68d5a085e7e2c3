//! GPIO / peripheral pin assignments for the regulator board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 single-wire data line (open-drain, external 10 kΩ pull-up).
pub const DHT_DATA_GPIO: i32 = 4;

/// ACS712-20A current-sense output, analog voltage, 1.65 V at 0 A.
/// ADC1 channel 2 (GPIO 3 on ESP32-S3).
pub const CURRENT_ADC_GPIO: i32 = 3;
/// ADC1 channel number matching [`CURRENT_ADC_GPIO`].
pub const CURRENT_ADC_CHANNEL: u32 = 2;

// ---------------------------------------------------------------------------
// Outputs (MOSFET low-side switches, active HIGH)
// ---------------------------------------------------------------------------

/// Peltier element driver.
pub const PELTIER_GPIO: i32 = 5;
/// Heatsink cooler fan driver.
pub const COOLER_GPIO: i32 = 6;
