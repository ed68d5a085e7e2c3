//! Mock hardware adapter for integration tests.
//!
//! Plays back a scripted sequence of samples and records every output
//! write, in order, so tests can assert on switching order and on the
//! full command history without touching real GPIO.

use std::collections::VecDeque;

use thermoreg::app::events::AppEvent;
use thermoreg::app::ports::{ActuatorPort, EventSink, SamplerPort};
use thermoreg::control::{ActuatorState, Sample};
use thermoreg::error::ActuatorError;

// ── Output write record ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Peltier(bool),
    Cooler(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    script: VecDeque<Sample>,
    /// Returned once the script runs dry.
    pub idle: Sample,
    pub writes: Vec<Write>,
    /// Output named here fails every write.
    pub broken: Option<&'static str>,
    pub samples_taken: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            idle: Sample::from_raw(10.0, 6.5),
            writes: Vec::new(),
            broken: None,
            samples_taken: 0,
        }
    }

    pub fn scripted<I: IntoIterator<Item = Sample>>(samples: I) -> Self {
        let mut hw = Self::new();
        hw.script.extend(samples);
        hw
    }

    pub fn push(&mut self, sample: Sample) {
        self.script.push_back(sample);
    }

    /// Level of each output after replaying the write log.
    pub fn outputs(&self) -> ActuatorState {
        self.writes.iter().fold(ActuatorState::OFF, |mut s, w| {
            match *w {
                Write::Peltier(on) => s.peltier_on = on,
                Write::Cooler(on) => s.cooler_on = on,
            }
            s
        })
    }

    fn write(&mut self, w: Write) -> Result<(), ActuatorError> {
        let output = match w {
            Write::Peltier(_) => "peltier",
            Write::Cooler(_) => "cooler",
        };
        if self.broken == Some(output) {
            return Err(ActuatorError::GpioWriteFailed { output });
        }
        self.writes.push(w);
        Ok(())
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplerPort for MockHardware {
    fn sample(&mut self) -> Sample {
        self.samples_taken += 1;
        self.script.pop_front().unwrap_or(self.idle)
    }
}

impl ActuatorPort for MockHardware {
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError> {
        if state.peltier_on {
            self.write(Write::Cooler(state.cooler_on))?;
            self.write(Write::Peltier(true))
        } else {
            self.write(Write::Peltier(false))?;
            self.write(Write::Cooler(state.cooler_on))
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
