//! Acoustic fields

use crate::geometry::*;
use crate::mc::*;
use std::sync::Arc;

/// Scalar acoustic pressure samples addressed by position and timestep. The
/// data is computed externally; the simulator only looks it up.
pub trait PressureField {
    /// Returns the field type. Usually these are behind ArcPressureField and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns the pressure at a position for a timestep.
    ///
    /// * `p`        - The position.
    /// * `timestep` - The acoustic timestep.
    fn pressure_at(&self, p: &Point3f, timestep: usize) -> Float;
}

/// Vector displacement samples addressed by position and timestep.
pub trait DisplacementField {
    /// Returns the field type. Usually these are behind ArcDisplacementField
    /// and harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns the scatterer displacement at a position for a timestep.
    ///
    /// * `p`        - The position.
    /// * `timestep` - The acoustic timestep.
    fn displacement_at(&self, p: &Point3f, timestep: usize) -> Vector3f;
}

/// Atomic reference counted `PressureField`.
pub type ArcPressureField = Arc<dyn PressureField + Send + Sync>;

/// Atomic reference counted `DisplacementField`.
pub type ArcDisplacementField = Arc<dyn DisplacementField + Send + Sync>;

/// The acoustic data attached to a medium when acousto-optic coupling is
/// enabled. Either component may be absent.
#[derive(Clone, Default)]
pub struct FieldSet {
    /// Pressure lookup.
    pressure: Option<ArcPressureField>,

    /// Displacement lookup.
    displacement: Option<ArcDisplacementField>,
}

impl FieldSet {
    /// Create a new `FieldSet`.
    ///
    /// * `pressure`     - Optional pressure lookup.
    /// * `displacement` - Optional displacement lookup.
    pub fn new(
        pressure: Option<ArcPressureField>,
        displacement: Option<ArcDisplacementField>,
    ) -> Self {
        Self {
            pressure,
            displacement,
        }
    }

    /// Pressure lookup, when attached.
    pub fn pressure(&self) -> Option<&ArcPressureField> {
        self.pressure.as_ref()
    }

    /// Displacement lookup, when attached.
    pub fn displacement(&self) -> Option<&ArcDisplacementField> {
        self.displacement.as_ref()
    }
}
