//! Medium

mod absorber;
mod boundary;
mod detector;
mod grid;
mod layer;

#[cfg(test)]
pub(crate) mod testing;

// Re-export
pub use absorber::*;
pub use boundary::*;
pub use detector::*;
pub use grid::*;
pub use layer::*;

use crate::fields::FieldSet;
use crate::geometry::*;
use crate::mc::*;
use float_cmp::approx_eq;

/// Tolerance for layer stack contiguity and coverage checks.
const STACK_EPSILON: Float = 1e-9;

/// The simulation volume: a rectangular box `[0, x] × [0, y] × [0, z]` filled
/// by a contiguous stack of layers along z, with registered detectors, the
/// shared accumulation grid, and optional acoustic fields. Immutable once
/// built; construction validates the whole configuration.
pub struct Medium {
    /// Upper corner of the volume; walls sit at 0 and `extent` on each axis.
    extent: Vector3f,

    /// Layer stack ordered by depth.
    layers: Vec<Layer>,

    /// Registered detectors.
    detectors: Vec<ArcDetector>,

    /// Shared accumulation grid.
    grid: DetectionGrid,

    /// Acoustic fields, when acousto-optic coupling is enabled.
    fields: Option<FieldSet>,
}

impl Medium {
    /// Create a new `Medium`, validating the full configuration.
    ///
    /// * `extent`    - Upper corner of the volume.
    /// * `layers`    - Layer stack ordered by depth, covering `[0, extent.z]`.
    /// * `detectors` - Registered detectors.
    /// * `grid`      - The accumulation grid.
    /// * `fields`    - Optional acoustic fields.
    pub fn new(
        extent: Vector3f,
        layers: Vec<Layer>,
        detectors: Vec<ArcDetector>,
        grid: DetectionGrid,
        fields: Option<FieldSet>,
    ) -> Result<Self, String> {
        if extent.x <= 0.0 || extent.y <= 0.0 || extent.z <= 0.0 {
            return Err(format!(
                "medium extent must be positive on every axis, got ({}, {}, {})",
                extent.x, extent.y, extent.z
            ));
        }
        if layers.is_empty() {
            return Err("medium needs at least one layer".to_string());
        }

        for (i, layer) in layers.iter().enumerate() {
            validate_layer(i, layer)?;
        }

        if !approx_eq!(Float, layers[0].depth_start(), 0.0, epsilon = STACK_EPSILON) {
            return Err(format!(
                "layer stack must start at depth 0, got {}",
                layers[0].depth_start()
            ));
        }
        for i in 1..layers.len() {
            if !approx_eq!(
                Float,
                layers[i - 1].depth_end(),
                layers[i].depth_start(),
                epsilon = STACK_EPSILON
            ) {
                return Err(format!(
                    "layer stack has a gap or overlap between depths {} and {}",
                    layers[i - 1].depth_end(),
                    layers[i].depth_start()
                ));
            }
        }
        let deepest_end = layers[layers.len() - 1].depth_end();
        if !approx_eq!(Float, deepest_end, extent.z, epsilon = STACK_EPSILON) {
            return Err(format!(
                "layer stack must cover the volume depth {}, ends at {}",
                extent.z, deepest_end
            ));
        }

        Ok(Self {
            extent,
            layers,
            detectors,
            grid,
            fields,
        })
    }

    /// Position of the outer wall on an axis; the opposite wall is at 0.
    ///
    /// * `axis` - The axis.
    pub fn bound(&self, axis: Axis) -> Float {
        self.extent[axis]
    }

    /// Number of layers in the stack.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// The layer at a stack index.
    ///
    /// * `i` - The stack index.
    pub fn layer(&self, i: usize) -> &Layer {
        &self.layers[i]
    }

    /// The layer stack ordered by depth.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Resolve the stack index of the layer covering a depth. The depth must
    /// lie inside the volume and a layer must cover it; violations indicate a
    /// transport bug and abort the worker.
    ///
    /// * `z` - The depth.
    pub fn layer_index_at_depth(&self, z: Float) -> usize {
        assert!(
            z >= 0.0 && z <= self.extent.z,
            "photon depth {} outside medium [0, {}]",
            z,
            self.extent.z
        );
        let deepest = self.layers.len() - 1;
        self.layers
            .iter()
            .enumerate()
            .find(|(i, layer)| layer.contains_depth(z, *i == deepest))
            .map(|(i, _)| i)
            .unwrap_or_else(|| panic!("no layer covers depth {}", z))
    }

    /// The neighbor above a stack index, or `None` at the top of the stack.
    ///
    /// * `i` - The stack index.
    pub fn layer_above(&self, i: usize) -> Option<(usize, &Layer)> {
        if i > 0 {
            Some((i - 1, &self.layers[i - 1]))
        } else {
            None
        }
    }

    /// The neighbor below a stack index, or `None` at the bottom of the
    /// stack.
    ///
    /// * `i` - The stack index.
    pub fn layer_below(&self, i: usize) -> Option<(usize, &Layer)> {
        if i + 1 < self.layers.len() {
            Some((i + 1, &self.layers[i + 1]))
        } else {
            None
        }
    }

    /// Count of registered detectors crossed by a segment.
    ///
    /// * `p0` - Segment start.
    /// * `p1` - Segment end.
    pub fn detectors_crossed(&self, p0: &Point3f, p1: &Point3f) -> usize {
        self.detectors.iter().filter(|d| d.crossed(p0, p1)).count()
    }

    /// The shared accumulation grid.
    pub fn grid(&self) -> &DetectionGrid {
        &self.grid
    }

    /// Merge a worker's private tile into the shared grid.
    ///
    /// * `tile` - The tile to merge.
    pub fn merge_tile(&self, tile: &GridTile) {
        self.grid.merge_tile(tile);
    }

    /// Acoustic fields, when attached.
    pub fn fields(&self) -> Option<&FieldSet> {
        self.fields.as_ref()
    }

    /// All absorbers in the medium, in layer order then insertion order. The
    /// enumeration index is the absorber id used in tallies.
    pub fn absorbers(&self) -> impl Iterator<Item = &ArcAbsorber> {
        self.layers.iter().flat_map(|layer| layer.absorbers().iter())
    }
}

/// Per-layer configuration checks.
fn validate_layer(i: usize, layer: &Layer) -> Result<(), String> {
    if layer.mu_a() < 0.0 {
        return Err(format!(
            "layer {}: absorption coefficient must be non-negative, got {}",
            i,
            layer.mu_a()
        ));
    }
    if layer.mu_s() <= 0.0 {
        return Err(format!(
            "layer {}: scattering coefficient must be positive, got {}",
            i,
            layer.mu_s()
        ));
    }
    if layer.refractive_index() <= 0.0 {
        return Err(format!(
            "layer {}: refractive index must be positive, got {}",
            i,
            layer.refractive_index()
        ));
    }
    if !(-1.0..=1.0).contains(&layer.anisotropy()) {
        return Err(format!(
            "layer {}: anisotropy must lie in [-1, 1], got {}",
            i,
            layer.anisotropy()
        ));
    }
    if layer.depth_start() >= layer.depth_end() {
        return Err(format!(
            "layer {}: depth interval [{}, {}) is empty",
            i,
            layer.depth_start(),
            layer.depth_end()
        ));
    }

    for absorber in layer.absorbers() {
        let (d0, d1) = absorber.depth_range();
        if d0 < layer.depth_start() - STACK_EPSILON || d1 > layer.depth_end() + STACK_EPSILON {
            return Err(format!(
                "layer {}: {} absorber depth range [{}, {}] spills outside layer [{}, {}]",
                i,
                absorber.get_type(),
                d0,
                d1,
                layer.depth_start(),
                layer.depth_end()
            ));
        }
    }

    Ok(())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::sync::Arc;

    fn two_layer_medium() -> Medium {
        let layers = vec![
            Layer::new(0.0, 0.001, 1.0, 1.0, 0.0, 0.1),
            Layer::new(0.1, 7.3, 1.33, 0.9, 0.1, 2.0),
        ];
        Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            layers,
            vec![],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn depth_lookup_respects_half_open_intervals() {
        let medium = two_layer_medium();
        assert_eq!(medium.layer_index_at_depth(0.0), 0);
        assert_eq!(medium.layer_index_at_depth(0.05), 0);
        assert_eq!(medium.layer_index_at_depth(0.1), 1);
        assert_eq!(medium.layer_index_at_depth(1.5), 1);
        assert_eq!(medium.layer_index_at_depth(2.0), 1);
    }

    #[test]
    #[should_panic(expected = "outside medium")]
    fn depth_lookup_rejects_out_of_volume_depths() {
        let medium = two_layer_medium();
        let _ = medium.layer_index_at_depth(2.5);
    }

    #[test]
    fn neighbor_lookup_returns_none_at_stack_edges() {
        let medium = two_layer_medium();
        assert!(medium.layer_above(0).is_none());
        assert_eq!(medium.layer_above(1).unwrap().0, 0);
        assert_eq!(medium.layer_below(0).unwrap().0, 1);
        assert!(medium.layer_below(1).is_none());
    }

    #[test]
    fn gap_in_layer_stack_is_rejected() {
        let layers = vec![
            Layer::new(0.0, 0.001, 1.0, 1.0, 0.0, 0.1),
            Layer::new(0.1, 7.3, 1.33, 0.9, 0.2, 2.0),
        ];
        let result = Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            layers,
            vec![],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn stack_must_cover_the_full_depth() {
        let layers = vec![Layer::new(0.1, 7.3, 1.33, 0.9, 0.0, 1.5)];
        let result = Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            layers,
            vec![],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_scattering_is_rejected() {
        let layers = vec![Layer::new(0.1, 0.0, 1.33, 0.9, 0.0, 2.0)];
        let result = Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            layers,
            vec![],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn absorber_spilling_outside_its_layer_is_rejected() {
        let mut layer = Layer::new(0.1, 7.3, 1.33, 0.9, 0.0, 2.0);
        layer.add_absorber(Arc::new(BallAbsorber::new(
            Point3f::new(1.0, 1.0, 1.9),
            0.5,
            2.0,
            7.3,
        )));
        let result = Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            vec![layer],
            vec![],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn detectors_crossed_counts_every_crossing() {
        let layers = vec![Layer::new(0.1, 7.3, 1.33, 0.9, 0.0, 2.0)];
        let medium = Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            layers,
            vec![
                Arc::new(PlaneCrossDetector { z: 1.0 }),
                Arc::new(PlaneCrossDetector { z: 1.5 }),
            ],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        )
        .unwrap();

        let p0 = Point3f::new(1.0, 1.0, 0.5);
        assert_eq!(medium.detectors_crossed(&p0, &Point3f::new(1.0, 1.0, 1.2)), 1);
        assert_eq!(medium.detectors_crossed(&p0, &Point3f::new(1.0, 1.0, 1.8)), 2);
        assert_eq!(medium.detectors_crossed(&p0, &Point3f::new(1.0, 1.0, 0.8)), 0);
    }

    #[test]
    fn absorber_ids_enumerate_in_layer_order() {
        let mut top = Layer::new(0.1, 7.3, 1.33, 0.9, 0.0, 1.0);
        top.add_absorber(Arc::new(BallAbsorber::new(
            Point3f::new(1.0, 1.0, 0.5),
            0.3,
            2.0,
            7.3,
        )));
        let mut bottom = Layer::new(0.1, 7.3, 1.33, 0.9, 1.0, 2.0);
        bottom.add_absorber(Arc::new(BallAbsorber::new(
            Point3f::new(1.0, 1.0, 1.5),
            0.3,
            3.0,
            7.3,
        )));

        let medium = Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            vec![top, bottom],
            vec![],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        )
        .unwrap();

        let mu_as: Vec<Float> = medium.absorbers().map(|a| a.mu_a()).collect();
        assert_eq!(mu_as, vec![2.0, 3.0]);
    }
}
