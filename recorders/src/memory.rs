//! In-memory recorder

use core::recorder::*;
use std::sync::Mutex;

/// Collects exit records and absorber tallies in memory. Useful for tests and
/// for callers that post-process records programmatically.
#[derive(Default)]
pub struct MemoryRecorder {
    /// Collected exit records.
    exits: Mutex<Vec<ExitRecord>>,

    /// Collected absorber tallies.
    tallies: Mutex<Vec<AbsorberTally>>,
}

impl MemoryRecorder {
    /// Create a new empty `MemoryRecorder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the exit records collected so far.
    pub fn exits(&self) -> Vec<ExitRecord> {
        self.exits.lock().unwrap().clone()
    }

    /// Snapshot of the absorber tallies collected so far.
    pub fn tallies(&self) -> Vec<AbsorberTally> {
        self.tallies.lock().unwrap().clone()
    }
}

impl ExitRecorder for MemoryRecorder {
    /// Returns the recorder type name.
    fn get_type(&self) -> &'static str {
        "memory"
    }

    /// Append one exit record.
    ///
    /// * `record` - The record.
    fn record_exit(&self, record: &ExitRecord) {
        self.exits.lock().unwrap().push(record.clone());
    }
}

impl TallyRecorder for MemoryRecorder {
    /// Returns the recorder type name.
    fn get_type(&self) -> &'static str {
        "memory"
    }

    /// Append one absorber tally.
    ///
    /// * `tally` - The tally.
    fn record_tally(&self, tally: &AbsorberTally) {
        self.tallies.lock().unwrap().push(tally.clone());
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
