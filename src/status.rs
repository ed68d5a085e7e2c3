//! Last-published cycle snapshot.
//!
//! The control loop is the only writer of actuator state.  Any other path
//! that wants to show it (a console command, a second task) reads the
//! last published [`CycleReport`] from a [`StatusBoard`].  The report is
//! `Copy` and lives behind a critical-section mutex, so a reader always
//! observes one whole cycle, never a half-written one.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::app::events::CycleReport;

pub struct StatusBoard {
    last: Mutex<CriticalSectionRawMutex, Cell<Option<CycleReport>>>,
}

impl StatusBoard {
    pub const fn new() -> Self {
        Self {
            last: Mutex::new(Cell::new(None)),
        }
    }

    /// Replace the published snapshot.  Control loop only.
    pub fn publish(&self, report: CycleReport) {
        self.last.lock(|cell| cell.set(Some(report)));
    }

    /// Most recent snapshot, or `None` before the first cycle.
    pub fn latest(&self) -> Option<CycleReport> {
        self.last.lock(Cell::get)
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Board the firmware control loop publishes to.
pub static STATUS: StatusBoard = StatusBoard::new();
