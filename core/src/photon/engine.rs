//! Photon propagation engine

use super::*;
use crate::geometry::*;
use crate::mc::*;
use crate::medium::*;
use crate::recorder::*;
use crate::rng::RandomStream;
use crate::sampling::*;
use crate::stats::RunStats;
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};

/// Weight threshold below which Russian roulette runs.
pub const ROULETTE_THRESHOLD: Float = 0.01;

/// Roulette survival chance; survivors are boosted by its inverse.
pub const ROULETTE_CHANCE: Float = 0.1;

/// Drives photon histories through a shared medium. One engine per worker
/// thread; it owns the worker's random stream, photon state, grid tile and
/// counters, and only the medium and recorder are shared.
pub struct PhotonEngine<'a> {
    /// The shared, read-mostly medium.
    medium: &'a Medium,

    /// Sink for detected exit events.
    exit_recorder: ArcExitRecorder,

    /// Worker-private random stream.
    rng: RandomStream,

    /// Worker-private accumulation buffer, merged into the shared grid once
    /// per batch.
    tile: GridTile,

    /// Injection point for every history.
    injection: Point3f,

    /// Timestep index for acoustic field lookups.
    timestep: usize,

    /// The photon state, reused across histories.
    photon: Photon,

    /// Worker-local counters.
    stats: RunStats,
}

impl<'a> PhotonEngine<'a> {
    /// Create a new `PhotonEngine`.
    ///
    /// * `medium`        - The shared medium.
    /// * `exit_recorder` - Sink for detected exit events.
    /// * `seed`          - Four seed words for the worker's random stream,
    ///                     each >= 128 and distinct across workers.
    /// * `injection`     - Injection point inside the medium.
    /// * `timestep`      - Timestep index for acoustic field lookups.
    pub fn new(
        medium: &'a Medium,
        exit_recorder: ArcExitRecorder,
        seed: [u32; 4],
        injection: Point3f,
        timestep: usize,
    ) -> Self {
        Self {
            medium,
            exit_recorder,
            rng: RandomStream::new(seed),
            tile: medium.grid().tile(),
            injection,
            timestep,
            photon: Photon::new(),
            stats: RunStats::default(),
        }
    }

    /// Run a batch of independent photon histories to completion, polling the
    /// stop flag between histories. Merges the private tile into the shared
    /// grid and returns the worker's counters.
    ///
    /// * `histories` - Number of histories in the batch.
    /// * `stop`      - Cooperative early-termination flag.
    /// * `progress`  - Progress bar to advance per history, when reporting.
    pub fn run(
        mut self,
        histories: u64,
        stop: &AtomicBool,
        progress: Option<&ProgressBar>,
    ) -> RunStats {
        debug!("starting batch of {} photon histories", histories);

        for _ in 0..histories {
            if stop.load(Ordering::Relaxed) {
                debug!("stop flag raised, abandoning batch");
                break;
            }

            self.launch();
            while self.photon.is_alive() {
                self.set_step_size();
                match self.next_boundary() {
                    Some(hit) => {
                        self.hop_to_boundary(hit.distance);
                        self.transmit_or_reflect(hit.kind);
                    }
                    None => {
                        self.hop();
                        self.drop_weight();
                        self.spin();
                        self.roulette();
                    }
                }
            }

            if let Some(bar) = progress {
                bar.inc(1);
            }
        }

        self.medium.merge_tile(&self.tile);
        self.stats
    }

    /// Begin a new history: sample an isotropic initial direction, place the
    /// photon at the injection point and resolve its starting layer.
    fn launch(&mut self) {
        let u1 = self.rng.uniform_float();
        let u2 = self.rng.uniform_float();
        let direction = uniform_sample_sphere(u1, u2);
        let layer_index = self.medium.layer_index_at_depth(self.injection.z);
        self.photon.reset(self.injection, direction, layer_index);
        self.stats.photons += 1;
    }

    /// Sample the next step length from the attenuation at the current site,
    /// or respend a carried-over remainder at the new site's attenuation.
    fn set_step_size(&mut self) {
        let layer = self.medium.layer(self.photon.layer_index);
        let mu_t = layer.mu_t_at(&self.photon.position);

        if self.photon.step_remainder == 0.0 {
            let u = self.rng.uniform_float();
            self.photon.step = -u.ln() / mu_t;
        } else {
            self.photon.step = self.photon.step_remainder / mu_t;
            self.photon.step_remainder = 0.0;
        }
    }

    /// The nearest bounding surface the pending step would cross, if any.
    /// Wall distances are compared in X, Y, Z order with the first smallest
    /// winning; the current layer's depth interface is chosen only when
    /// strictly closer than every wall.
    fn next_boundary(&self) -> Option<BoundaryHit> {
        let step = self.photon.step;
        let pos = &self.photon.position;
        let dir = &self.photon.direction;

        let mut wall: Option<BoundaryHit> = None;
        for axis in Axis::all() {
            let d = dir[axis];
            if d == 0.0 {
                continue;
            }
            let step_end = pos[axis] + step * d;
            if step_end >= self.medium.bound(axis) || step_end <= 0.0 {
                let distance = if d > 0.0 {
                    (self.medium.bound(axis) - pos[axis]) / d
                } else {
                    abs(pos[axis] / d)
                };
                if wall.map_or(true, |hit| distance < hit.distance) {
                    wall = Some(BoundaryHit {
                        kind: BoundaryKind::MediumWall(axis),
                        distance,
                    });
                }
            }
        }

        let layer = self.medium.layer(self.photon.layer_index);
        let interface_distance = if dir.z > 0.0 {
            Some((layer.depth_end() - pos.z) / dir.z)
        } else if dir.z < 0.0 {
            Some((layer.depth_start() - pos.z) / dir.z)
        } else {
            None
        };
        if let Some(distance) = interface_distance {
            if step > distance && wall.map_or(true, |hit| distance < hit.distance) {
                return Some(BoundaryHit {
                    kind: BoundaryKind::LayerInterface,
                    distance,
                });
            }
        }

        wall
    }

    /// Store the unspent step as a dimensionless remainder at the current
    /// site's attenuation, clamp the step to the boundary distance and move
    /// onto the surface.
    ///
    /// * `distance` - Distance to the boundary surface.
    fn hop_to_boundary(&mut self, distance: Float) {
        let layer = self.medium.layer(self.photon.layer_index);
        let mu_t = layer.mu_t_at(&self.photon.position);
        self.photon.step_remainder = (self.photon.step - distance) * mu_t;
        self.photon.step = distance;
        self.hop();
    }

    /// Advance the photon by the pending step, saving the previous state and
    /// extending the path lengths.
    fn hop(&mut self) {
        let p = &mut self.photon;
        p.prev_position = p.position;
        p.prev_direction = p.direction;
        p.position += p.direction * p.step;
        p.path_length += p.step;
        self.stats.steps += 1;

        if let Some(displacement) = self.medium.fields().and_then(|f| f.displacement()) {
            let site = self.photon.position;
            let displaced = site + displacement.displacement_at(&site, self.timestep);
            self.photon.displaced_path_length += displaced.distance(&self.photon.displaced_site);
            self.photon.displaced_site = displaced;
        }
    }

    /// Deposit the absorbed fraction of the photon's weight at the current
    /// interaction site, crediting an overriding absorber and tagging the
    /// photon when the site lies inside one.
    fn drop_weight(&mut self) {
        let layer = self.medium.layer(self.photon.layer_index);
        let absorber = layer.absorber_at(&self.photon.position);
        let (mu_a, mu_s) = match absorber {
            Some(a) => (a.mu_a(), a.mu_s()),
            None => (layer.mu_a(), layer.mu_s()),
        };

        let albedo = mu_s / (mu_a + mu_s);
        let absorbed = self.photon.weight * (1.0 - albedo);
        self.photon.weight -= absorbed;
        self.tile.deposit(self.photon.position.z, absorbed);
        self.stats.weight_deposited += absorbed;

        if let Some(a) = absorber {
            a.accumulate_weight(absorbed);
            self.photon.tagged = true;
        }
    }

    /// Sample a new scattering direction from the current layer's
    /// Henyey-Greenstein phase function.
    fn spin(&mut self) {
        let g = self.medium.layer(self.photon.layer_index).anisotropy();
        let cos_theta = henyey_greenstein_cos_theta(g, self.rng.uniform_float());
        let psi = TWO_PI * self.rng.uniform_float();
        self.photon.direction = spin_direction(&self.photon.direction, cos_theta, psi);
    }

    /// Russian roulette for low-weight photons: survivors are boosted by the
    /// inverse survival chance, the rest die with their residual weight
    /// counted as roulette loss.
    fn roulette(&mut self) {
        if self.photon.weight < ROULETTE_THRESHOLD {
            if self.rng.uniform_float() <= ROULETTE_CHANCE {
                self.photon.weight /= ROULETTE_CHANCE;
                self.stats.roulette_survivals += 1;
            } else {
                self.stats.weight_roulette_loss += self.photon.weight;
                self.stats.roulette_deaths += 1;
                self.photon.status = Status::Dead;
            }
        }
    }

    /// Resolve a boundary contact: evaluate the refractive index step and
    /// either internally reflect or transmit.
    ///
    /// * `kind` - The kind of surface the photon sits on.
    fn transmit_or_reflect(&mut self, kind: BoundaryKind) {
        match kind {
            BoundaryKind::LayerInterface => self.stats.layer_events += 1,
            BoundaryKind::MediumWall(_) => self.stats.wall_events += 1,
        }

        let axis = kind.axis();
        let cos_incident = abs(self.photon.direction[axis]);
        let n1 = self.medium.layer(self.photon.layer_index).refractive_index();

        // The far side: the adjacent layer at an interface, free space at a
        // wall or beyond the edge of the stack.
        let (n2, neighbor) = match kind {
            BoundaryKind::LayerInterface => {
                let neighbor = if self.photon.direction.z > 0.0 {
                    self.medium.layer_below(self.photon.layer_index)
                } else {
                    self.medium.layer_above(self.photon.layer_index)
                };
                match neighbor {
                    Some((i, layer)) => (layer.refractive_index(), Some(i)),
                    None => (1.0, None),
                }
            }
            BoundaryKind::MediumWall(_) => (1.0, None),
        };

        match evaluate_boundary(cos_incident, n1, n2) {
            SurfaceEvent::TotalInternal => self.reflect(axis),
            SurfaceEvent::SpecularTransmit {
                loss_fraction,
                transmission_angle,
            } => {
                let shed = loss_fraction * self.photon.weight;
                self.photon.weight -= shed;
                self.stats.weight_specular_loss += shed;
                self.transmit(kind, neighbor, transmission_angle);
            }
            SurfaceEvent::Partial {
                reflectance,
                transmission_angle,
            } => {
                if self.rng.uniform_float() < reflectance {
                    self.reflect(axis);
                } else {
                    self.transmit(kind, neighbor, transmission_angle);
                }
            }
        }
    }

    /// Internally reflect on the hit axis, then drop and roulette at the
    /// boundary site. Reflection fixes the new direction, so no scattering
    /// direction is sampled and the photon stays in its current layer.
    ///
    /// * `axis` - Axis perpendicular to the hit surface.
    fn reflect(&mut self, axis: Axis) {
        self.photon.direction[axis] = -self.photon.direction[axis];
        self.drop_weight();
        self.roulette();
    }

    /// Transmit through the surface: across a layer interface the layer index
    /// advances and the z cosine takes the transmission angle; through a
    /// medium wall the photon exits.
    ///
    /// * `kind`               - The kind of surface.
    /// * `neighbor`           - Stack index of the layer on the far side.
    /// * `transmission_angle` - Transmission angle in radians.
    fn transmit(&mut self, kind: BoundaryKind, neighbor: Option<usize>, transmission_angle: Float) {
        match kind {
            BoundaryKind::LayerInterface => {
                // Refractive bending is simplified to setting the z cosine;
                // the direction of travel is preserved.
                self.photon.direction.z =
                    cos(transmission_angle).copysign(self.photon.direction.z);
                match neighbor {
                    Some(i) => self.photon.layer_index = i,
                    // The interface coincides with a medium wall; resolve
                    // against the wall instead.
                    None => self.transmit_or_reflect(BoundaryKind::MediumWall(Axis::Z)),
                }
            }
            BoundaryKind::MediumWall(_) => self.exit(transmission_angle),
        }
    }

    /// The photon leaves the medium: record the exit when the segment crossed
    /// a detector and the photon is tagged, then end the history.
    ///
    /// * `transmission_angle` - Transmission angle in radians.
    fn exit(&mut self, transmission_angle: Float) {
        let crossed = self
            .medium
            .detectors_crossed(&self.photon.prev_position, &self.photon.position);
        if crossed > 0 && self.photon.tagged {
            let displaced = self
                .medium
                .fields()
                .and_then(|f| f.displacement())
                .map(|_| self.photon.displaced_path_length);
            self.exit_recorder.record_exit(&ExitRecord::new(
                self.photon.position,
                transmission_angle,
                self.photon.weight,
                self.photon.path_length,
                displaced,
            ));
            self.stats.detected_exits += 1;
        }

        self.stats.weight_escaped += self.photon.weight;
        self.photon.status = Status::Dead;
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
