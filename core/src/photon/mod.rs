//! Photon transport

mod engine;
mod fresnel;

// Re-export
pub use engine::*;
pub use fresnel::*;

use crate::geometry::*;
use crate::mc::*;

/// Life cycle of a photon history.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// Still propagating.
    Alive,

    /// Terminated by roulette or by leaving the medium.
    Dead,
}

/// Mutable per-history photon state. One instance lives inside each worker's
/// engine, is reused across that worker's histories and is never shared.
#[derive(Clone, Debug)]
pub struct Photon {
    /// Current position.
    pub position: Point3f,

    /// Current unit direction cosines.
    pub direction: Vector3f,

    /// Position before the last hop.
    pub prev_position: Point3f,

    /// Direction before the last hop.
    pub prev_direction: Vector3f,

    /// Statistical weight, in (0, 1] while alive.
    pub weight: Float,

    /// Life cycle status.
    pub status: Status,

    /// Stack index of the layer the photon is propagating through.
    pub layer_index: usize,

    /// Sampled step length for the pending hop.
    pub step: Float,

    /// Dimensionless unspent step carried over a boundary.
    pub step_remainder: Float,

    /// Whether the photon has interacted with an absorber.
    pub tagged: bool,

    /// Geometric path length accumulated this history.
    pub path_length: Float,

    /// Path length through acoustically displaced scattering sites.
    pub displaced_path_length: Float,

    /// Displaced position of the previous scattering site.
    pub displaced_site: Point3f,
}

impl Photon {
    /// Create a new `Photon`. The state is meaningless until the first
    /// `reset` of a history.
    pub fn new() -> Self {
        Self {
            position: Point3f::origin(),
            direction: Vector3f::zero(),
            prev_position: Point3f::origin(),
            prev_direction: Vector3f::zero(),
            weight: 0.0,
            status: Status::Dead,
            layer_index: 0,
            step: 0.0,
            step_remainder: 0.0,
            tagged: false,
            path_length: 0.0,
            displaced_path_length: 0.0,
            displaced_site: Point3f::origin(),
        }
    }

    /// Reset all per-history state for a fresh launch.
    ///
    /// * `injection`   - Injection point.
    /// * `direction`   - Sampled initial unit direction.
    /// * `layer_index` - Stack index of the layer at the injection depth.
    pub fn reset(&mut self, injection: Point3f, direction: Vector3f, layer_index: usize) {
        self.position = injection;
        self.direction = direction;
        self.prev_position = injection;
        self.prev_direction = direction;
        self.weight = 1.0;
        self.status = Status::Alive;
        self.layer_index = layer_index;
        self.step = 0.0;
        self.step_remainder = 0.0;
        self.tagged = false;
        self.path_length = 0.0;
        self.displaced_path_length = 0.0;
        self.displaced_site = injection;
    }

    /// Returns `true` while the current history is running.
    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }
}

impl Default for Photon {
    fn default() -> Self {
        Self::new()
    }
}
