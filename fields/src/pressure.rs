//! Grid-backed pressure field

use crate::voxel::{read_f64_samples, VoxelLayout};
use core::fields::PressureField;
use core::geometry::*;
use core::mc::*;

/// Pressure samples on a regular voxel grid, one frame per acoustic timestep.
/// Timesteps beyond the last frame wrap around, so a single acoustic period is
/// enough to drive arbitrarily long simulations.
pub struct GridPressureField {
    /// Voxel layout of each frame.
    layout: VoxelLayout,

    /// Pressure samples per frame, x varying fastest.
    frames: Vec<Vec<Float>>,
}

impl GridPressureField {
    /// Create a new `GridPressureField` from sample frames.
    ///
    /// * `dims`       - Number of voxels along each axis.
    /// * `voxel_size` - Edge length of a voxel.
    /// * `frames`     - Pressure samples per frame, x varying fastest.
    pub fn new(
        dims: (usize, usize, usize),
        voxel_size: Float,
        frames: Vec<Vec<Float>>,
    ) -> Result<Self, String> {
        let layout = VoxelLayout::new(dims, voxel_size)?;
        if frames.is_empty() {
            return Err(String::from("pressure field needs at least one frame"));
        }
        for (i, frame) in frames.iter().enumerate() {
            if frame.len() != layout.frame_len() {
                return Err(format!(
                    "pressure frame {} has {} samples, layout needs {}",
                    i,
                    frame.len(),
                    layout.frame_len()
                ));
            }
        }
        Ok(Self { layout, frames })
    }

    /// Load a `GridPressureField` from a file of little-endian f64 samples,
    /// frames concatenated in timestep order.
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
        if samples.is_empty() || samples.len() % layout.frame_len() != 0 {
            return Err(format!(
                "{} holds {} samples, not a whole number of {}-sample frames",
                path,
                samples.len(),
                layout.frame_len()
            ));
        }

        let frames = samples
            .chunks(layout.frame_len())
            .map(|chunk| chunk.to_vec())
            .collect();
        Ok(Self { layout, frames })
    }

    /// Number of frames in the acoustic period.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }
}

impl PressureField for GridPressureField {
    /// Returns the field type. Usually these are behind ArcPressureField and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "grid"
    }

    /// Returns the pressure at a position for a timestep.
    ///
    /// * `p`        - The position.
    /// * `timestep` - The acoustic timestep.
    fn pressure_at(&self, p: &Point3f, timestep: usize) -> Float {
        let frame = &self.frames[timestep % self.frames.len()];
        frame[self.layout.voxel_index(p)]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ramp_frames(len: usize, count: usize) -> Vec<Vec<Float>> {
        (0..count)
            .map(|frame| (0..len).map(|i| (frame * len + i) as Float).collect())
            .collect()
    }

    #[test]
    fn lookups_address_the_containing_voxel() {
        let field = GridPressureField::new((2, 2, 2), 0.5, ramp_frames(8, 1)).unwrap();

        assert_eq!(field.pressure_at(&Point3f::new(0.25, 0.25, 0.25), 0), 0.0);
        assert_eq!(field.pressure_at(&Point3f::new(0.75, 0.25, 0.25), 0), 1.0);
        assert_eq!(field.pressure_at(&Point3f::new(0.75, 0.75, 0.75), 0), 7.0);
        // Out-of-grid positions clamp to the nearest voxel.
        assert_eq!(field.pressure_at(&Point3f::new(-1.0, -1.0, -1.0), 0), 0.0);
        assert_eq!(field.pressure_at(&Point3f::new(9.0, 9.0, 9.0), 0), 7.0);
    }

    #[test]
    fn timesteps_cycle_over_the_frames() {
        let field = GridPressureField::new((2, 2, 2), 0.5, ramp_frames(8, 3)).unwrap();
        let p = Point3f::new(0.25, 0.25, 0.25);

        assert_eq!(field.num_frames(), 3);
        assert_eq!(field.pressure_at(&p, 0), 0.0);
        assert_eq!(field.pressure_at(&p, 1), 8.0);
        assert_eq!(field.pressure_at(&p, 2), 16.0);
        assert_eq!(field.pressure_at(&p, 3), 0.0);
        assert_eq!(field.pressure_at(&p, 7), 8.0);
    }

    #[test]
    fn mismatched_frames_are_rejected() {
        assert!(GridPressureField::new((2, 2, 2), 0.5, vec![]).is_err());
        assert!(GridPressureField::new((2, 2, 2), 0.5, vec![vec![0.0; 7]]).is_err());
    }

    #[test]
    fn raw_files_round_trip() {
        let path = std::env::temp_dir().join(format!("pressure_{}.raw", std::process::id()));
        let path = path.to_str().unwrap().to_string();

        let mut bytes = Vec::new();
        for i in 0..16 {
            bytes.extend_from_slice(&(i as f64).to_le_bytes());
        }
        fs::write(&path, &bytes).unwrap();

        let field = GridPressureField::from_raw(&path, (2, 2, 2), 0.5).unwrap();
        assert_eq!(field.num_frames(), 2);
        assert_eq!(field.pressure_at(&Point3f::new(0.75, 0.75, 0.75), 0), 7.0);
        assert_eq!(field.pressure_at(&Point3f::new(0.25, 0.25, 0.25), 1), 8.0);

        // A truncated file is not a whole number of frames.
        fs::write(&path, &bytes[0..104]).unwrap();
        assert!(GridPressureField::from_raw(&path, (2, 2, 2), 0.5).is_err());

        fs::remove_file(&path).unwrap();
    }
}
