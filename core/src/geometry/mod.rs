//! Geometry

mod point3;
mod vector3;

// Re-export
pub use point3::*;
pub use vector3::*;

use crate::mc::*;

/// Tolerance on the upper end of the segment parameter so a hop that
/// terminates exactly on a plane still registers as a crossing.
pub const SEGMENT_EPSILON: Float = 1e-13;

/// Returns the point where a segment pierces a plane, or `None` when the
/// segment misses it. The parametric coordinate is accepted in
/// [0, 1 + SEGMENT_EPSILON].
///
/// * `p0`          - Segment start.
/// * `p1`          - Segment end.
/// * `plane_point` - A point on the plane.
/// * `normal`      - The plane normal.
pub fn segment_plane_intersection(
    p0: &Point3f,
    p1: &Point3f,
    plane_point: &Point3f,
    normal: &Vector3f,
) -> Option<Point3f> {
    let d = *p1 - *p0;
    let denom = normal.dot(&d);
    if denom == 0.0 {
        return None;
    }

    let u = normal.dot(&(*plane_point - *p0)) / denom;
    if !(0.0..=1.0 + SEGMENT_EPSILON).contains(&u) {
        return None;
    }

    Some(*p0 + d * u)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn segment_straddling_plane_intersects() {
        let p0 = Point3f::new(0.4, 0.4, 0.99);
        let p1 = Point3f::new(0.4, 0.4, 1.01);
        let plane = Point3f::new(0.5, 0.5, 1.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);

        let hit = segment_plane_intersection(&p0, &p1, &plane, &n);
        assert!(hit.is_some());
        let hit = hit.unwrap();
        assert!(approx_eq!(Float, hit.z, 1.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, hit.x, 0.4, epsilon = 1e-12));
    }

    #[test]
    fn segment_short_of_plane_misses() {
        let p0 = Point3f::new(0.0, 0.0, 0.0);
        let p1 = Point3f::new(0.0, 0.0, 0.5);
        let plane = Point3f::new(0.0, 0.0, 1.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert!(segment_plane_intersection(&p0, &p1, &plane, &n).is_none());
    }

    #[test]
    fn segment_parallel_to_plane_misses() {
        let p0 = Point3f::new(0.0, 0.0, 0.5);
        let p1 = Point3f::new(1.0, 1.0, 0.5);
        let plane = Point3f::new(0.0, 0.0, 1.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert!(segment_plane_intersection(&p0, &p1, &plane, &n).is_none());
    }

    #[test]
    fn segment_ending_on_plane_intersects() {
        let p0 = Point3f::new(0.2, 0.2, 0.8);
        let p1 = Point3f::new(0.2, 0.2, 1.0);
        let plane = Point3f::new(0.5, 0.5, 1.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert!(segment_plane_intersection(&p0, &p1, &plane, &n).is_some());
    }
}
