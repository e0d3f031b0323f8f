//! Recorders

use crate::geometry::Point3f;
use crate::mc::Float;
use std::sync::Arc;

/// A single detected photon exit event.
#[derive(Clone, Debug)]
pub struct ExitRecord {
    /// Exit position on the medium wall.
    pub position: Point3f,

    /// Transmission angle in radians, measured from the wall normal.
    pub transmission_angle: Float,

    /// Residual photon weight at exit.
    pub weight: Float,

    /// Geometric path length travelled inside the medium.
    pub path_length: Float,

    /// Path length through the acoustically displaced scattering sites, when
    /// displacement data is attached to the medium.
    pub displaced_path_length: Option<Float>,
}

impl ExitRecord {
    /// Create a new `ExitRecord`.
    ///
    /// * `position`              - Exit position on the medium wall.
    /// * `transmission_angle`    - Transmission angle in radians.
    /// * `weight`                - Residual photon weight.
    /// * `path_length`           - Geometric path length.
    /// * `displaced_path_length` - Displaced path length, when available.
    pub fn new(
        position: Point3f,
        transmission_angle: Float,
        weight: Float,
        path_length: Float,
        displaced_path_length: Option<Float>,
    ) -> Self {
        Self {
            position,
            transmission_angle,
            weight,
            path_length,
            displaced_path_length,
        }
    }
}

/// Final absorbed-weight tally for one absorber.
#[derive(Clone, Debug)]
pub struct AbsorberTally {
    /// Absorber id, the enumeration order in the medium.
    pub absorber_id: usize,

    /// Absorber type name.
    pub absorber_type: &'static str,

    /// Total weight absorbed over the run.
    pub absorbed_weight: Float,
}

/// Sink for detected exit events. Appends from different workers must be
/// atomic per record.
pub trait ExitRecorder {
    /// Returns the recorder type name.
    fn get_type(&self) -> &'static str;

    /// Append one exit record.
    ///
    /// * `record` - The record.
    fn record_exit(&self, record: &ExitRecord);
}

/// Atomic reference counted `ExitRecorder`.
pub type ArcExitRecorder = Arc<dyn ExitRecorder + Send + Sync>;

/// Sink for absorber tallies, written once after a run.
pub trait TallyRecorder {
    /// Returns the recorder type name.
    fn get_type(&self) -> &'static str;

    /// Append one absorber tally.
    ///
    /// * `tally` - The tally.
    fn record_tally(&self, tally: &AbsorberTally);
}

/// Atomic reference counted `TallyRecorder`.
pub type ArcTallyRecorder = Arc<dyn TallyRecorder + Send + Sync>;
