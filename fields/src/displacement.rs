//! Grid-backed displacement field

use crate::voxel::{read_f64_samples, VoxelLayout};
use core::fields::DisplacementField;
use core::geometry::*;
use core::mc::*;

/// Scatterer displacement vectors on a regular voxel grid, one frame per
/// acoustic timestep. Timesteps beyond the last frame wrap around.
pub struct GridDisplacementField {
    /// Voxel layout of each frame.
    layout: VoxelLayout,

    /// Displacement vectors per frame, x varying fastest.
    frames: Vec<Vec<Vector3f>>,
}

impl GridDisplacementField {
    /// Create a new `GridDisplacementField` from sample frames.
    ///
    /// * `dims`       - Number of voxels along each axis.
    /// * `voxel_size` - Edge length of a voxel.
    /// * `frames`     - Displacement vectors per frame, x varying fastest.
    pub fn new(
        dims: (usize, usize, usize),
        voxel_size: Float,
        frames: Vec<Vec<Vector3f>>,
    ) -> Result<Self, String> {
        let layout = VoxelLayout::new(dims, voxel_size)?;
        if frames.is_empty() {
            return Err(String::from("displacement field needs at least one frame"));
        }
        for (i, frame) in frames.iter().enumerate() {
            if frame.len() != layout.frame_len() {
                return Err(format!(
                    "displacement frame {} has {} samples, layout needs {}",
                    i,
                    frame.len(),
                    layout.frame_len()
                ));
            }
        }
        Ok(Self { layout, frames })
    }

    /// Load a `GridDisplacementField` from a file of little-endian f64
    /// samples, 3 components per voxel, frames concatenated in timestep order.
    ///
    /// * `path`       - The file path.
    /// * `dims`       - Number of voxels along each axis.
    /// * `voxel_size` - Edge length of a voxel.
    pub fn from_raw(
        path: &str,
        dims: (usize, usize, usize),
        voxel_size: Float,
    ) -> Result<Self, String> {
        let layout = VoxelLayout::new(dims, voxel_size)?;
        let samples = read_f64_samples(path)?;
        if samples.is_empty() || samples.len() % (3 * layout.frame_len()) != 0 {
            return Err(format!(
                "{} holds {} samples, not a whole number of {}-vector frames",
                path,
                samples.len(),
                layout.frame_len()
            ));
        }

        let frames = samples
            .chunks(3 * layout.frame_len())
            .map(|chunk| {
                chunk
                    .chunks(3)
                    .map(|v| Vector3f::new(v[0], v[1], v[2]))
                    .collect()
            })
            .collect();
        Ok(Self { layout, frames })
    }

    /// Number of frames in the acoustic period.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }
}

impl DisplacementField for GridDisplacementField {
    /// Returns the field type. Usually these are behind ArcDisplacementField
    /// and harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "grid"
    }

    /// Returns the scatterer displacement at a position for a timestep.
    ///
    /// * `p`        - The position.
    /// * `timestep` - The acoustic timestep.
    fn displacement_at(&self, p: &Point3f, timestep: usize) -> Vector3f {
        let frame = &self.frames[timestep % self.frames.len()];
        frame[self.layout.voxel_index(p)]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
