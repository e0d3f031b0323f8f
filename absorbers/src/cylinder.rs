//! Cylinder absorbers

use core::geometry::*;
use core::mc::*;
use core::medium::Absorber;
use core::parallel::AtomicFloat;
use std::sync::atomic::Ordering;

/// An absorbing cylinder with its axis parallel to z, truncated to a depth
/// interval.
pub struct CylinderAbsorber {
    /// x-coordinate of the axis.
    x: Float,

    /// y-coordinate of the axis.
    y: Float,

    /// Radius of the cylinder.
    radius: Float,

    /// Top of the cylinder along z.
    z_min: Float,

    /// Bottom of the cylinder along z.
    z_max: Float,

    /// Absorption coefficient inside the region.
    mu_a: Float,

    /// Scattering coefficient inside the region.
    mu_s: Float,

    /// Weight absorbed inside the region.
    absorbed: AtomicFloat,
}

impl CylinderAbsorber {
    /// Create a new `CylinderAbsorber`.
    ///
    /// * `x`      - x-coordinate of the axis.
    /// * `y`      - y-coordinate of the axis.
    /// * `radius` - Radius of the cylinder.
    /// * `z_min`  - One end of the depth interval.
    /// * `z_max`  - The other end of the depth interval.
    /// * `mu_a`   - Absorption coefficient inside the region.
    /// * `mu_s`   - Scattering coefficient inside the region.
    pub fn new(
        x: Float,
        y: Float,
        radius: Float,
        z_min: Float,
        z_max: Float,
        mu_a: Float,
        mu_s: Float,
    ) -> Self {
        Self {
            x,
            y,
            radius,
            z_min: min(z_min, z_max),
            z_max: max(z_min, z_max),
            mu_a,
            mu_s,
            absorbed: AtomicFloat::default(),
        }
    }
}

impl Absorber for CylinderAbsorber {
    /// Returns the absorber type. Usually these are behind ArcAbsorber and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "cylinder"
    }

    /// Returns true when the point lies inside the region (boundary
    /// inclusive).
    ///
    /// * `p` - The point.
    fn contains(&self, p: &Point3f) -> bool {
        if p.z < self.z_min || p.z > self.z_max {
            return false;
        }
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Returns the absorption coefficient inside the region.
    fn mu_a(&self) -> Float {
        self.mu_a
    }

    /// Returns the scattering coefficient inside the region.
    fn mu_s(&self) -> Float {
        self.mu_s
    }

    /// Returns the z-extent of the region.
    fn depth_range(&self) -> (Float, Float) {
        (self.z_min, self.z_max)
    }

    /// Credit absorbed photon weight to the region's tally.
    ///
    /// * `amount` - The absorbed weight.
    fn accumulate_weight(&self, amount: Float) {
        self.absorbed.add(amount);
    }

    /// Returns the total absorbed weight accumulated so far.
    fn absorbed_weight(&self) -> Float {
        self.absorbed.load(Ordering::SeqCst)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_tests_radius_and_depth() {
        let absorber = CylinderAbsorber::new(1.0, 1.0, 0.25, 0.5, 1.5, 2.0, 7.3);

        assert!(absorber.contains(&Point3f::new(1.0, 1.0, 1.0)));
        assert!(absorber.contains(&Point3f::new(1.25, 1.0, 0.5)));
        // Inside the radius but past the depth interval.
        assert!(!absorber.contains(&Point3f::new(1.0, 1.0, 1.51)));
        // Within the depth interval but outside the radius.
        assert!(!absorber.contains(&Point3f::new(1.3, 1.0, 1.0)));
    }

    #[test]
    fn depth_interval_is_normalized() {
        let absorber = CylinderAbsorber::new(1.0, 1.0, 0.25, 1.5, 0.5, 2.0, 7.3);
        assert_eq!(absorber.depth_range(), (0.5, 1.5));
    }

    #[test]
    fn tally_accumulates_absorbed_weight() {
        let absorber = CylinderAbsorber::new(1.0, 1.0, 0.25, 0.5, 1.5, 2.0, 7.3);
        absorber.accumulate_weight(0.125);
        absorber.accumulate_weight(0.125);
        assert_eq!(absorber.absorbed_weight(), 0.25);
    }
}
