//! DHT11 humidity/temperature sensor (single-wire, open-drain).
//!
//! ## Protocol
//!
//! ```text
//!  host  ──┐ ≥18 ms  ┌── 30 µs ─┐
//!          └─────────┘          │ release
//!  DHT11                        └─ 80 µs low ─ 80 µs high ─ 40 × bit
//!  bit:  50 µs low, then high for ~27 µs (0) or ~70 µs (1)
//! ```
//!
//! The 40 bits form a 5-byte frame:
//! `[RH int, RH dec, T int, T dec, checksum]`, where the checksum is the
//! low byte of the sum of the first four.  Bit 7 of the temperature
//! decimal byte carries the sign on revisions that report sub-zero values.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-banged on the data GPIO with bounded busy waits.
//! On host/test: reads a frame injected with [`sim_set_frame`].

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::SensorError;

/// Bit 40 flags an injected frame as present.
#[cfg(not(target_os = "espidf"))]
const SIM_PRESENT: u64 = 1 << 40;

#[cfg(not(target_os = "espidf"))]
static SIM_FRAME: AtomicU64 = AtomicU64::new(0);

/// Inject the next frame returned by [`Dht11::read`] on host builds.
/// `None` simulates a sensor that does not answer.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_frame(frame: Option<[u8; 5]>) {
    let packed = frame.map_or(0, |f| {
        f.iter()
            .enumerate()
            .fold(SIM_PRESENT, |acc, (i, b)| acc | (u64::from(*b) << (8 * i)))
    });
    SIM_FRAME.store(packed, Ordering::Relaxed);
}

/// Plausible temperature range for an accepted frame (°C).
const TEMP_RANGE_C: core::ops::RangeInclusive<f32> = -40.0..=80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dht11Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Validate and decode a raw 5-byte frame.
pub fn decode_frame(frame: &[u8; 5]) -> Result<Dht11Reading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }
    // A bus held low decodes as all zeros with a "valid" checksum.
    if frame.iter().all(|b| *b == 0) {
        return Err(SensorError::NoResponse);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;
    let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) * 0.1;
    let temperature_c = if frame[3] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    if !TEMP_RANGE_C.contains(&temperature_c) || humidity_pct > 100.0 {
        return Err(SensorError::OutOfRange);
    }

    Ok(Dht11Reading {
        temperature_c,
        humidity_pct,
    })
}

pub struct Dht11 {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
}

impl Dht11 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn read(&self) -> Result<Dht11Reading, SensorError> {
        let frame = self.read_frame()?;
        decode_frame(&frame)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_frame(&self) -> Result<[u8; 5], SensorError> {
        let packed = SIM_FRAME.load(Ordering::Relaxed);
        if packed & SIM_PRESENT == 0 {
            return Err(SensorError::NoResponse);
        }
        let mut frame = [0u8; 5];
        for (i, b) in frame.iter_mut().enumerate() {
            *b = (packed >> (8 * i)) as u8;
        }
        Ok(frame)
    }

    #[cfg(target_os = "espidf")]
    fn read_frame(&self) -> Result<[u8; 5], SensorError> {
        use esp_idf_svc::sys::*;

        let pin = self.gpio;
        // SAFETY: the data pin is owned by this driver and configured in
        // hw_init; main-loop access only.
        unsafe {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
            gpio_set_level(pin, 0);
            esp_rom_delay_us(18_000);
            gpio_set_level(pin, 1);
            esp_rom_delay_us(30);
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
        }

        // Response: low 80 µs, high 80 µs, then the first bit's low phase.
        wait_for_level(pin, false, 100).map_err(|_| SensorError::NoResponse)?;
        wait_for_level(pin, true, 100).map_err(|_| SensorError::NoResponse)?;
        wait_for_level(pin, false, 100).map_err(|_| SensorError::NoResponse)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            wait_for_level(pin, true, 80)?;
            let high_us = wait_for_level(pin, false, 100)?;
            if high_us > 40 {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Ok(frame)
    }
}

/// Busy-wait until `pin` reads `level`; returns the time waited in µs.
#[cfg(target_os = "espidf")]
fn wait_for_level(pin: i32, level: bool, timeout_us: i64) -> Result<i64, SensorError> {
    use esp_idf_svc::sys::{esp_timer_get_time, gpio_get_level};

    // SAFETY: timer and GPIO level reads are side-effect-free register reads.
    let start = unsafe { esp_timer_get_time() };
    loop {
        let now = unsafe { esp_timer_get_time() };
        if (unsafe { gpio_get_level(pin) } != 0) == level {
            return Ok(now - start);
        }
        if now - start > timeout_us {
            return Err(SensorError::Timeout);
        }
    }
}
