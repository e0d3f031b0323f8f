//! File recorders

use core::mc::Float;
use core::recorder::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Mutex;

/// Appends detected exits to a text file, one record per line:
/// `x y z transmission_angle weight path_length [displaced_path_length]`.
pub struct FileExitRecorder {
    /// Buffered writer shared by the workers.
    writer: Mutex<BufWriter<File>>,
}

impl FileExitRecorder {
    /// Create a new `FileExitRecorder`, truncating any existing file.
    ///
    /// * `path` - The file path.
    pub fn create(path: &str) -> Result<Self, String> {
        let file = match File::create(path) {
            Ok(file) => file,
            Err(err) => return Err(format!("Could not create {}. {}", path, err)),
        };
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Flush buffered records to disk.
    pub fn flush(&self) -> Result<(), String> {
        let mut writer = self.writer.lock().unwrap();
        writer
            .flush()
            .map_err(|err| format!("Error writing exit records. {:}.", err))
    }
}

impl ExitRecorder for FileExitRecorder {
    /// Returns the recorder type name.
    fn get_type(&self) -> &'static str {
        "file"
    }

    /// Append one exit record.
    ///
    /// * `record` - The record.
    fn record_exit(&self, record: &ExitRecord) {
        let mut writer = self.writer.lock().unwrap();
        let result = match record.displaced_path_length {
            Some(displaced) => writeln!(
                writer,
                "{} {} {} {} {} {} {}",
                record.position.x,
                record.position.y,
                record.position.z,
                record.transmission_angle,
                record.weight,
                record.path_length,
                displaced
            ),
            None => writeln!(
                writer,
                "{} {} {} {} {} {}",
                record.position.x,
                record.position.y,
                record.position.z,
                record.transmission_angle,
                record.weight,
                record.path_length
            ),
        };
        if let Err(err) = result {
            error!("Error writing exit record. {:}.", err);
        }
    }
}

/// Writes final absorber tallies to a text file, one
/// `absorber_id absorber_type absorbed_weight` line per absorber.
pub struct FileTallyRecorder {
    /// Buffered writer.
    writer: Mutex<BufWriter<File>>,
}

impl FileTallyRecorder {
    /// Create a new `FileTallyRecorder`, truncating any existing file.
    ///
    /// * `path` - The file path.
    pub fn create(path: &str) -> Result<Self, String> {
        let file = match File::create(path) {
            Ok(file) => file,
            Err(err) => return Err(format!("Could not create {}. {}", path, err)),
        };
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Flush buffered tallies to disk.
    pub fn flush(&self) -> Result<(), String> {
        let mut writer = self.writer.lock().unwrap();
        writer
            .flush()
            .map_err(|err| format!("Error writing absorber tallies. {:}.", err))
    }
}

impl TallyRecorder for FileTallyRecorder {
    /// Returns the recorder type name.
    fn get_type(&self) -> &'static str {
        "file"
    }

    /// Append one absorber tally.
    ///
    /// * `tally` - The tally.
    fn record_tally(&self, tally: &AbsorberTally) {
        let mut writer = self.writer.lock().unwrap();
        let result = writeln!(
            writer,
            "{} {} {}",
            tally.absorber_id, tally.absorber_type, tally.absorbed_weight
        );
        if let Err(err) = result {
            error!("Error writing absorber tally. {:}.", err);
        }
    }
}

/// Write the post-run fluence table, one `r fluence` line per bin.
///
/// * `path`  - The file path.
/// * `pairs` - Bin centre depths paired with fluence values.
pub fn write_fluence(path: &str, pairs: &[(Float, Float)]) -> Result<(), String> {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => return Err(format!("Could not create {}. {}", path, err)),
    };

    let mut writer = BufWriter::new(file);
    for (r, fluence) in pairs {
        if let Err(err) = writeln!(writer, "{:.5} {:.3e}", r, fluence) {
            return Err(format!("Error writing fluence table. {:}.", err));
        }
    }
    writer
        .flush()
        .map_err(|err| format!("Error writing fluence table. {:}.", err))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
