//! Test fixtures for the medium model.

use super::absorber::Absorber;
use super::detector::Detector;
use crate::geometry::*;
use crate::mc::*;
use crate::parallel::AtomicFloat;
use std::sync::atomic::Ordering;

/// Spherical test absorber.
pub struct BallAbsorber {
    center: Point3f,
    radius: Float,
    mu_a: Float,
    mu_s: Float,
    absorbed: AtomicFloat,
}

impl BallAbsorber {
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

impl Absorber for BallAbsorber {
    fn get_type(&self) -> &'static str {
        "ball"
    }

    fn contains(&self, p: &Point3f) -> bool {
        p.distance(&self.center) <= self.radius
    }

    fn mu_a(&self) -> Float {
        self.mu_a
    }

    fn mu_s(&self) -> Float {
        self.mu_s
    }

    fn depth_range(&self) -> (Float, Float) {
        (self.center.z - self.radius, self.center.z + self.radius)
    }

    fn accumulate_weight(&self, amount: Float) {
        self.absorbed.add(amount);
    }

    fn absorbed_weight(&self) -> Float {
        self.absorbed.load(Ordering::SeqCst)
    }
}

/// Detector covering an entire z-plane; registers any segment straddling it.
pub struct PlaneCrossDetector {
    pub z: Float,
}

impl Detector for PlaneCrossDetector {
    fn get_type(&self) -> &'static str {
        "plane"
    }

    fn crossed(&self, p0: &Point3f, p1: &Point3f) -> bool {
        (p0.z <= self.z && p1.z >= self.z) || (p1.z <= self.z && p0.z >= self.z)
    }
}
