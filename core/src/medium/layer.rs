//! Layers

use super::absorber::*;
use crate::geometry::*;
use crate::mc::*;

/// One horizontal slab of the medium: background optical coefficients, a
/// refractive index, a Henyey-Greenstein anisotropy factor, a depth interval
/// along z, and any absorbers embedded in it.
///
/// Depth intervals are half-open `[depth_start, depth_end)`; the deepest
/// layer closes its interval so the bottom wall belongs to it.
#[derive(Clone)]
pub struct Layer {
    /// Background absorption coefficient (1/cm).
    mu_a: Float,

    /// Background scattering coefficient (1/cm).
    mu_s: Float,

    /// Refractive index.
    refractive_index: Float,

    /// Henyey-Greenstein anisotropy factor in [-1, 1].
    anisotropy: Float,

    /// Top of the layer along z.
    depth_start: Float,

    /// Bottom of the layer along z.
    depth_end: Float,

    /// Absorbers embedded in this layer.
    absorbers: Vec<ArcAbsorber>,
}

impl Layer {
    /// Create a new `Layer` with no absorbers.
    ///
    /// * `mu_a`             - Background absorption coefficient.
    /// * `mu_s`             - Background scattering coefficient.
    /// * `refractive_index` - Refractive index.
    /// * `anisotropy`       - Henyey-Greenstein anisotropy factor.
    /// * `depth_start`      - Top of the layer along z.
    /// * `depth_end`        - Bottom of the layer along z.
    pub fn new(
        mu_a: Float,
        mu_s: Float,
        refractive_index: Float,
        anisotropy: Float,
        depth_start: Float,
        depth_end: Float,
    ) -> Self {
        Self {
            mu_a,
            mu_s,
            refractive_index,
            anisotropy,
            depth_start,
            depth_end,
            absorbers: Vec::new(),
        }
    }

    /// Embed an absorber. Scene assembly only; the medium is immutable once a
    /// run starts.
    ///
    /// * `absorber` - The absorber.
    pub fn add_absorber(&mut self, absorber: ArcAbsorber) {
        self.absorbers.push(absorber);
    }

    /// Returns true when the depth lies in this layer's interval. The
    /// interval is half-open unless `deepest` marks this as the bottom layer.
    ///
    /// * `z`       - The depth.
    /// * `deepest` - Whether this is the deepest layer of the stack.
    pub fn contains_depth(&self, z: Float, deepest: bool) -> bool {
        if deepest {
            z >= self.depth_start && z <= self.depth_end
        } else {
            z >= self.depth_start && z < self.depth_end
        }
    }

    /// Returns the absorber containing the point, if any. The first match in
    /// insertion order wins.
    ///
    /// * `p` - The point.
    pub fn absorber_at(&self, p: &Point3f) -> Option<&ArcAbsorber> {
        self.absorbers.iter().find(|a| a.contains(p))
    }

    /// Absorption coefficient at a point, honoring absorber override.
    ///
    /// * `p` - The point.
    pub fn mu_a_at(&self, p: &Point3f) -> Float {
        match self.absorber_at(p) {
            Some(absorber) => absorber.mu_a(),
            None => self.mu_a,
        }
    }

    /// Scattering coefficient at a point, honoring absorber override.
    ///
    /// * `p` - The point.
    pub fn mu_s_at(&self, p: &Point3f) -> Float {
        match self.absorber_at(p) {
            Some(absorber) => absorber.mu_s(),
            None => self.mu_s,
        }
    }

    /// Total attenuation coefficient at a point, honoring absorber override.
    ///
    /// * `p` - The point.
    pub fn mu_t_at(&self, p: &Point3f) -> Float {
        match self.absorber_at(p) {
            Some(absorber) => absorber.mu_t(),
            None => self.mu_a + self.mu_s,
        }
    }

    /// Background absorption coefficient.
    pub fn mu_a(&self) -> Float {
        self.mu_a
    }

    /// Background scattering coefficient.
    pub fn mu_s(&self) -> Float {
        self.mu_s
    }

    /// Refractive index.
    pub fn refractive_index(&self) -> Float {
        self.refractive_index
    }

    /// Henyey-Greenstein anisotropy factor.
    pub fn anisotropy(&self) -> Float {
        self.anisotropy
    }

    /// Top of the layer along z.
    pub fn depth_start(&self) -> Float {
        self.depth_start
    }

    /// Bottom of the layer along z.
    pub fn depth_end(&self) -> Float {
        self.depth_end
    }

    /// Absorbers embedded in this layer.
    pub fn absorbers(&self) -> &[ArcAbsorber] {
        &self.absorbers
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::testing::BallAbsorber;
    use super::*;
    use std::sync::Arc;

    fn tissue() -> Layer {
        Layer::new(0.1, 7.3, 1.33, 0.9, 0.1, 2.0)
    }

    #[test]
    fn depth_interval_is_half_open() {
        let layer = tissue();
        assert!(layer.contains_depth(0.1, false));
        assert!(layer.contains_depth(1.0, false));
        assert!(!layer.contains_depth(2.0, false));
        assert!(!layer.contains_depth(0.05, false));
    }

    #[test]
    fn deepest_layer_closes_its_interval() {
        let layer = tissue();
        assert!(layer.contains_depth(2.0, true));
        assert!(!layer.contains_depth(2.0 + 1e-9, true));
    }

    #[test]
    fn coefficients_fall_back_to_background() {
        let layer = tissue();
        let p = Point3f::new(0.2, 0.2, 0.5);
        assert_eq!(layer.mu_a_at(&p), 0.1);
        assert_eq!(layer.mu_s_at(&p), 7.3);
        assert_eq!(layer.mu_t_at(&p), 0.1 + 7.3);
    }

    #[test]
    fn absorber_overrides_coefficients_inside_its_region() {
        let mut layer = tissue();
        layer.add_absorber(Arc::new(BallAbsorber::new(
            Point3f::new(1.0, 1.0, 1.0),
            0.5,
            2.0,
            7.3,
        )));

        let inside = Point3f::new(1.0, 1.0, 1.2);
        let outside = Point3f::new(1.0, 1.0, 1.9);

        assert!(layer.absorber_at(&inside).is_some());
        assert!(layer.absorber_at(&outside).is_none());
        assert_eq!(layer.mu_a_at(&inside), 2.0);
        assert_eq!(layer.mu_t_at(&inside), 9.3);
        assert_eq!(layer.mu_a_at(&outside), 0.1);
    }
}
