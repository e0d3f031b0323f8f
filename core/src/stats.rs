//! Run statistics

use crate::mc::Float;
use std::fmt;

/// Aggregate counters for one run. Each worker accumulates its own copy and
/// the pool merges them in join order.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    /// Photon histories launched.
    pub photons: u64,

    /// Hops taken across all histories.
    pub steps: u64,

    /// Layer interface events.
    pub layer_events: u64,

    /// Medium wall events.
    pub wall_events: u64,

    /// Roulette draws survived.
    pub roulette_survivals: u64,

    /// Roulette draws lost.
    pub roulette_deaths: u64,

    /// Exits that crossed a detector while tagged.
    pub detected_exits: u64,

    /// Weight deposited into the accumulation grid.
    pub weight_deposited: Float,

    /// Weight carried out of the medium by escaping photons.
    pub weight_escaped: Float,

    /// Weight shed as the specular fraction at rarer-to-denser interfaces.
    pub weight_specular_loss: Float,

    /// Weight lost to roulette deaths.
    pub weight_roulette_loss: Float,
}

impl RunStats {
    /// Fold another accumulator into this one.
    ///
    /// * `other` - The accumulator to fold in.
    pub fn merge(&mut self, other: &RunStats) {
        self.photons += other.photons;
        self.steps += other.steps;
        self.layer_events += other.layer_events;
        self.wall_events += other.wall_events;
        self.roulette_survivals += other.roulette_survivals;
        self.roulette_deaths += other.roulette_deaths;
        self.detected_exits += other.detected_exits;
        self.weight_deposited += other.weight_deposited;
        self.weight_escaped += other.weight_escaped;
        self.weight_specular_loss += other.weight_specular_loss;
        self.weight_roulette_loss += other.weight_roulette_loss;
    }

    /// Total weight accounted for across all termination channels. Over many
    /// histories this approaches the launched photon count.
    pub fn weight_accounted(&self) -> Float {
        self.weight_deposited
            + self.weight_escaped
            + self.weight_specular_loss
            + self.weight_roulette_loss
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "photons launched        {:>14}", self.photons)?;
        writeln!(f, "steps taken             {:>14}", self.steps)?;
        writeln!(f, "layer interface events  {:>14}", self.layer_events)?;
        writeln!(f, "medium wall events      {:>14}", self.wall_events)?;
        writeln!(f, "roulette survivals      {:>14}", self.roulette_survivals)?;
        writeln!(f, "roulette deaths         {:>14}", self.roulette_deaths)?;
        writeln!(f, "detected exits          {:>14}", self.detected_exits)?;
        writeln!(f, "weight deposited        {:>14.5}", self.weight_deposited)?;
        writeln!(f, "weight escaped          {:>14.5}", self.weight_escaped)?;
        writeln!(
            f,
            "weight specular loss    {:>14.5}",
            self.weight_specular_loss
        )?;
        write!(
            f,
            "weight roulette loss    {:>14.5}",
            self.weight_roulette_loss
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
