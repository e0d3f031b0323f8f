//! Boundary classification

use crate::mc::*;

/// The kind of bounding surface a step terminates on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BoundaryKind {
    /// The interface between the current layer and an adjacent one.
    LayerInterface,

    /// An outer wall of the simulation volume on the given axis.
    MediumWall(Axis),
}

impl BoundaryKind {
    /// Returns the axis perpendicular to the surface. Layer interfaces are
    /// always z-planes.
    pub fn axis(&self) -> Axis {
        match self {
            BoundaryKind::LayerInterface => Axis::Z,
            BoundaryKind::MediumWall(axis) => *axis,
        }
    }
}

/// A bounding surface the current step would cross, and the distance to it
/// along the direction of travel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundaryHit {
    /// The kind of surface.
    pub kind: BoundaryKind,

    /// Distance from the photon's position to the surface.
    pub distance: Float,
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
