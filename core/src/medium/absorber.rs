//! Absorbers

use crate::geometry::*;
use crate::mc::*;
use std::sync::Arc;

/// A closed geometric region embedded in a layer with its own interaction
/// coefficients. Photons interacting inside the region use these coefficients
/// instead of the layer background, credit the region's absorbed-weight tally,
/// and become tagged.
pub trait Absorber {
    /// Returns the absorber type. Usually these are behind ArcAbsorber and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns true when the point lies inside the region (boundary
    /// inclusive).
    ///
    /// * `p` - The point.
    fn contains(&self, p: &Point3f) -> bool;

    /// Returns the absorption coefficient inside the region.
    fn mu_a(&self) -> Float;

    /// Returns the scattering coefficient inside the region.
    fn mu_s(&self) -> Float;

    /// Returns the total attenuation coefficient inside the region.
    fn mu_t(&self) -> Float {
        self.mu_a() + self.mu_s()
    }

    /// Returns the z-extent of the region, used to validate that it lies
    /// within its owning layer's depth interval.
    fn depth_range(&self) -> (Float, Float);

    /// Credit absorbed photon weight to the region's tally. Called from worker
    /// threads; implementations must accumulate atomically.
    ///
    /// * `amount` - The absorbed weight.
    fn accumulate_weight(&self, amount: Float);

    /// Returns the total absorbed weight accumulated so far.
    fn absorbed_weight(&self) -> Float;
}

/// Atomic reference counted `Absorber`.
pub type ArcAbsorber = Arc<dyn Absorber + Send + Sync>;
