//! Circular detectors

use core::geometry::*;
use core::mc::*;
use core::medium::Detector;

/// Orientation of a planar detector aperture.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DetectorPlane {
    /// Aperture in an x-y plane, normal along z.
    XY,

    /// Aperture in an x-z plane, normal along y.
    XZ,

    /// Aperture in a y-z plane, normal along x.
    YZ,
}

impl DetectorPlane {
    /// The plane's unit normal.
    pub fn normal(&self) -> Vector3f {
        match self {
            DetectorPlane::XY => Vector3f::new(0.0, 0.0, 1.0),
            DetectorPlane::XZ => Vector3f::new(0.0, 1.0, 0.0),
            DetectorPlane::YZ => Vector3f::new(1.0, 0.0, 0.0),
        }
    }
}

/// A circular aperture on an axis-aligned plane, usually placed on a medium
/// wall to capture transmitted photons.
pub struct CircularDetector {
    /// Center of the aperture; also fixes the plane position.
    center: Point3f,

    /// Radius of the aperture.
    radius: Float,

    /// Orientation of the aperture plane.
    plane: DetectorPlane,
}

impl CircularDetector {
    /// Create a new `CircularDetector`.
    ///
    /// * `center` - Center of the aperture; also fixes the plane position.
    /// * `radius` - Radius of the aperture.
    /// * `plane`  - Orientation of the aperture plane.
    pub fn new(center: Point3f, radius: Float, plane: DetectorPlane) -> Self {
        Self {
            center,
            radius,
            plane,
        }
    }
}

impl Detector for CircularDetector {
    /// Returns the detector type. Usually these are behind ArcDetector and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "circular"
    }

    /// Returns true when the segment from `p0` to `p1` pierces the detector
    /// plane within the aperture. Endpoints on the plane count as crossings.
    ///
    /// * `p0` - Segment start.
    /// * `p1` - Segment end.
    fn crossed(&self, p0: &Point3f, p1: &Point3f) -> bool {
        match segment_plane_intersection(p0, p1, &self.center, &self.plane.normal()) {
            Some(hit) => hit.distance_squared(&self.center) <= self.radius * self.radius,
            None => false,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straddling_segment_inside_the_aperture_crosses() {
        let detector = CircularDetector::new(Point3f::new(0.5, 0.5, 1.0), 1.0, DetectorPlane::XY);
        let p0 = Point3f::new(0.4, 0.4, 0.99);
        let p1 = Point3f::new(0.4, 0.4, 1.01);
        assert!(detector.crossed(&p0, &p1));
    }

    #[test]
    fn crossing_outside_the_aperture_misses() {
        let detector = CircularDetector::new(Point3f::new(0.5, 0.5, 1.0), 1.0, DetectorPlane::XY);
        let p0 = Point3f::new(0.4, 0.4, 0.99);
        let p1 = Point3f::new(5.0, 5.0, 1.01);
        assert!(!detector.crossed(&p0, &p1));
    }

    #[test]
    fn segment_ending_on_the_plane_crosses() {
        let detector = CircularDetector::new(Point3f::new(1.0, 1.0, 2.0), 1.0, DetectorPlane::XY);
        let p0 = Point3f::new(1.0, 1.0, 1.9);
        let p1 = Point3f::new(1.0, 1.0, 2.0);
        assert!(detector.crossed(&p0, &p1));
    }

    #[test]
    fn segment_short_of_the_plane_misses() {
        let detector = CircularDetector::new(Point3f::new(1.0, 1.0, 2.0), 1.0, DetectorPlane::XY);
        let p0 = Point3f::new(1.0, 1.0, 1.5);
        let p1 = Point3f::new(1.0, 1.0, 1.9);
        assert!(!detector.crossed(&p0, &p1));
    }

    #[test]
    fn aperture_boundary_is_inclusive() {
        let detector = CircularDetector::new(Point3f::new(1.0, 1.0, 2.0), 0.5, DetectorPlane::XY);
        let p0 = Point3f::new(1.5, 1.0, 1.9);
        let p1 = Point3f::new(1.5, 1.0, 2.1);
        assert!(detector.crossed(&p0, &p1));
    }

    #[test]
    fn orientation_picks_the_plane() {
        let detector = CircularDetector::new(Point3f::new(2.0, 1.0, 1.0), 0.5, DetectorPlane::YZ);
        let p0 = Point3f::new(1.9, 1.0, 1.0);
        let p1 = Point3f::new(2.1, 1.0, 1.0);
        assert!(detector.crossed(&p0, &p1));

        // The same segment never pierces an x-z aperture.
        let detector = CircularDetector::new(Point3f::new(2.0, 1.0, 1.0), 0.5, DetectorPlane::XZ);
        assert!(!detector.crossed(&p0, &p1));
    }
}
