//! Sphere absorbers

use core::geometry::*;
use core::mc::*;
use core::medium::Absorber;
use core::parallel::AtomicFloat;
use std::sync::atomic::Ordering;

/// A spherical absorbing region embedded in a layer.
pub struct SphereAbsorber {
    /// Center of the sphere.
    center: Point3f,

    /// Radius of the sphere.
    radius: Float,

    /// Absorption coefficient inside the region.
    mu_a: Float,

    /// Scattering coefficient inside the region.
    mu_s: Float,

    /// Weight absorbed inside the region.
    absorbed: AtomicFloat,
}

impl SphereAbsorber {
    /// Create a new `SphereAbsorber`.
    ///
    /// * `center` - Center of the sphere.
    /// * `radius` - Radius of the sphere.
    /// * `mu_a`   - Absorption coefficient inside the region.
    /// * `mu_s`   - Scattering coefficient inside the region.
    pub fn new(center: Point3f, radius: Float, mu_a: Float, mu_s: Float) -> Self {
        Self {
            center,
            radius,
            mu_a,
            mu_s,
            absorbed: AtomicFloat::default(),
        }
    }
}

impl Absorber for SphereAbsorber {
    /// Returns the absorber type. Usually these are behind ArcAbsorber and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    /// Returns true when the point lies inside the region (boundary
    /// inclusive).
    ///
    /// * `p` - The point.
    fn contains(&self, p: &Point3f) -> bool {
        p.distance_squared(&self.center) <= self.radius * self.radius
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
        (self.center.z - self.radius, self.center.z + self.radius)
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
    use float_cmp::*;

    #[test]
    fn membership_includes_the_boundary() {
        let absorber = SphereAbsorber::new(Point3f::new(1.0, 1.0, 1.0), 0.5, 2.0, 7.3);

        assert!(absorber.contains(&Point3f::new(1.0, 1.0, 1.0)));
        assert!(absorber.contains(&Point3f::new(1.5, 1.0, 1.0)));
        assert!(!absorber.contains(&Point3f::new(1.51, 1.0, 1.0)));
        assert!(!absorber.contains(&Point3f::new(1.4, 1.4, 1.4)));
    }

    #[test]
    fn depth_range_spans_the_diameter() {
        let absorber = SphereAbsorber::new(Point3f::new(1.0, 1.0, 1.0), 0.5, 2.0, 7.3);
        let (top, bottom) = absorber.depth_range();
        assert!(approx_eq!(Float, top, 0.5, epsilon = 1e-12));
        assert!(approx_eq!(Float, bottom, 1.5, epsilon = 1e-12));
    }

    #[test]
    fn tally_accumulates_absorbed_weight() {
        let absorber = SphereAbsorber::new(Point3f::new(1.0, 1.0, 1.0), 0.6, 2.0, 7.3);
        assert_eq!(absorber.absorbed_weight(), 0.0);

        absorber.accumulate_weight(0.25);
        absorber.accumulate_weight(0.5);
        assert!(approx_eq!(Float, absorber.absorbed_weight(), 0.75, epsilon = 1e-12));
    }

    #[test]
    fn attenuation_sums_the_coefficients() {
        let absorber = SphereAbsorber::new(Point3f::new(1.0, 1.0, 1.0), 0.6, 2.0, 7.3);
        assert!(approx_eq!(Float, absorber.mu_t(), 9.3, epsilon = 1e-12));
    }
}
