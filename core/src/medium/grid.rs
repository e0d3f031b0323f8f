//! Detection grid

use crate::mc::*;
use std::sync::Mutex;

/// Shared accumulation grid for absorbed weight, binned over one coordinate
/// (planar depth bins here). The bin array sits behind a single mutex;
/// workers accumulate into private `GridTile` buffers and merge once per
/// batch.
///
/// The layout follows the historical convention: `num_bins` slots where the
/// last slot is the overflow bin, so the bin width is
/// `extent / (num_bins - 1)`.
pub struct DetectionGrid {
    /// Physical reach of the binned coordinate (cm).
    extent: Float,

    /// Number of bin slots including the overflow bin.
    num_bins: usize,

    /// Width of one bin (cm).
    bin_size: Float,

    /// Accumulated absorbed weight per bin.
    bins: Mutex<Vec<Float>>,
}

impl DetectionGrid {
    /// Create a new `DetectionGrid`.
    ///
    /// * `extent`   - Physical reach of the binned coordinate; must be > 0.
    /// * `num_bins` - Number of bin slots including overflow; must be ≥ 2.
    pub fn new(extent: Float, num_bins: usize) -> Result<Self, String> {
        if extent <= 0.0 {
            return Err(format!("grid extent must be positive, got {}", extent));
        }
        if num_bins < 2 {
            return Err(format!("grid needs at least 2 bins, got {}", num_bins));
        }
        Ok(Self {
            extent,
            num_bins,
            bin_size: extent / (num_bins - 1) as Float,
            bins: Mutex::new(vec![0.0; num_bins]),
        })
    }

    /// Physical reach of the binned coordinate.
    pub fn extent(&self) -> Float {
        self.extent
    }

    /// Number of bin slots including the overflow bin.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Width of one bin.
    pub fn bin_size(&self) -> Float {
        self.bin_size
    }

    /// Returns the bin index for a coordinate, clamped into range so overflow
    /// deposits land in the last bin.
    ///
    /// * `coordinate` - The binned coordinate.
    pub fn bin_index(&self, coordinate: Float) -> usize {
        bin_index_for(coordinate, self.bin_size, self.num_bins)
    }

    /// Add absorbed weight to a single bin.
    ///
    /// * `index`  - The bin index.
    /// * `amount` - The absorbed weight.
    pub fn deposit(&self, index: usize, amount: Float) {
        debug_assert!(index < self.num_bins);
        let mut bins = self.bins.lock().unwrap();
        bins[index] += amount;
    }

    /// Merge a private tile into the shared bins under one lock acquisition.
    ///
    /// * `tile` - The tile to merge.
    pub fn merge_tile(&self, tile: &GridTile) {
        assert_eq!(
            tile.bins.len(),
            self.num_bins,
            "grid tile does not match grid layout"
        );
        let mut bins = self.bins.lock().unwrap();
        for (bin, tile_bin) in bins.iter_mut().zip(tile.bins.iter()) {
            *bin += *tile_bin;
        }
    }

    /// Create a private accumulation buffer matching this grid's layout.
    pub fn tile(&self) -> GridTile {
        GridTile {
            bin_size: self.bin_size,
            num_bins: self.num_bins,
            bins: vec![0.0; self.num_bins],
        }
    }

    /// Snapshot of the accumulated bins.
    pub fn totals(&self) -> Vec<Float> {
        self.bins.lock().unwrap().clone()
    }

    /// Total absorbed weight across all bins.
    pub fn total_deposited(&self) -> Float {
        self.bins.lock().unwrap().iter().sum()
    }

    /// Post-run fluence table: one `(bin_center, fluence)` pair per bin with
    /// `fluence = deposited / num_photons / bin_size / mu_a`.
    ///
    /// * `num_photons` - Photons launched in the run.
    /// * `mu_a`        - Absorption coefficient used for normalization.
    pub fn fluence(&self, num_photons: usize, mu_a: Float) -> Result<Vec<(Float, Float)>, String> {
        if num_photons == 0 {
            return Err("fluence normalization needs at least one photon".to_string());
        }
        if mu_a <= 0.0 {
            return Err(format!(
                "fluence normalization needs a positive absorption coefficient, got {}",
                mu_a
            ));
        }

        let bins = self.bins.lock().unwrap();
        let norm = 1.0 / (num_photons as Float * self.bin_size * mu_a);
        Ok(bins
            .iter()
            .enumerate()
            .map(|(i, deposited)| ((i as Float + 0.5) * self.bin_size, deposited * norm))
            .collect())
    }
}

/// Private per-worker accumulation buffer. Deposits are lock-free; the buffer
/// merges into the shared grid once per batch.
pub struct GridTile {
    /// Width of one bin (cm).
    bin_size: Float,

    /// Number of bin slots including the overflow bin.
    num_bins: usize,

    /// Accumulated absorbed weight per bin.
    bins: Vec<Float>,
}

impl GridTile {
    /// Add absorbed weight at a coordinate.
    ///
    /// * `coordinate` - The binned coordinate.
    /// * `amount`     - The absorbed weight.
    pub fn deposit(&mut self, coordinate: Float, amount: Float) {
        let index = bin_index_for(coordinate, self.bin_size, self.num_bins);
        self.bins[index] += amount;
    }

    /// Accumulated bins.
    pub fn bins(&self) -> &[Float] {
        &self.bins
    }

    /// Total absorbed weight in this tile.
    pub fn total(&self) -> Float {
        self.bins.iter().sum()
    }
}

/// Clamped bin index: `min(floor(|c| / bin_size), num_bins - 1)`.
fn bin_index_for(coordinate: Float, bin_size: Float, num_bins: usize) -> usize {
    min((abs(coordinate) / bin_size) as usize, num_bins - 1)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
