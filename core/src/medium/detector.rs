//! Detectors

use crate::geometry::*;
use std::sync::Arc;

/// A planar aperture on the medium surface that registers exiting photons.
pub trait Detector {
    /// Returns the detector type. Usually these are behind ArcDetector and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns true when the segment from `p0` to `p1` pierces the detector
    /// plane within the aperture. Endpoints on the plane count as crossings.
    ///
    /// * `p0` - Segment start.
    /// * `p1` - Segment end.
    fn crossed(&self, p0: &Point3f, p1: &Point3f) -> bool;
}

/// Atomic reference counted `Detector`.
pub type ArcDetector = Arc<dyn Detector + Send + Sync>;
