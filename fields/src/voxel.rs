//! Voxel layout

use byteorder::{LittleEndian, ReadBytesExt};
use core::geometry::*;
use core::mc::*;
use std::fs::File;

/// Voxel layout shared by the grid-backed fields. The grid is anchored at the
/// medium origin, samples are stored with x varying fastest.
#[derive(Clone, Copy, Debug)]
pub struct VoxelLayout {
    /// Number of voxels along x.
    nx: usize,

    /// Number of voxels along y.
    ny: usize,

    /// Number of voxels along z.
    nz: usize,

    /// Edge length of a voxel.
    voxel_size: Float,
}

impl VoxelLayout {
    /// Create a new `VoxelLayout`.
    ///
    /// * `dims`       - Number of voxels along each axis.
    /// * `voxel_size` - Edge length of a voxel.
    pub fn new(dims: (usize, usize, usize), voxel_size: Float) -> Result<Self, String> {
        let (nx, ny, nz) = dims;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(format!(
                "field dimensions must be positive, got ({}, {}, {})",
                nx, ny, nz
            ));
        }
        if voxel_size <= 0.0 {
            return Err(format!(
                "field voxel size must be positive, got {}",
                voxel_size
            ));
        }
        Ok(Self {
            nx,
            ny,
            nz,
            voxel_size,
        })
    }

    /// Number of samples in one frame.
    pub fn frame_len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Index of the voxel containing a position, clamped to the grid edges.
    ///
    /// * `p` - The position.
    pub fn voxel_index(&self, p: &Point3f) -> usize {
        let ix = self.axis_index(p.x, self.nx);
        let iy = self.axis_index(p.y, self.ny);
        let iz = self.axis_index(p.z, self.nz);
        (iz * self.ny + iy) * self.nx + ix
    }

    fn axis_index(&self, coordinate: Float, n: usize) -> usize {
        let i = (coordinate / self.voxel_size).floor();
        if i < 0.0 {
            0
        } else {
            (i as usize).min(n - 1)
        }
    }
}

/// Reads a whole file of little-endian f64 samples, the common export format
/// of acoustic solvers.
///
/// * `path` - The file path.
pub fn read_f64_samples(path: &str) -> Result<Vec<Float>, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) => return Err(format!("Could not open {}. {}", path, err)),
    };
    let len = match file.metadata() {
        Ok(metadata) => metadata.len() as usize,
        Err(err) => return Err(format!("Could not stat {}. {}", path, err)),
    };
    if len % 8 != 0 {
        return Err(format!(
            "{} is {} bytes, not a whole number of f64 samples",
            path, len
        ));
    }

    let mut samples = vec![0.0; len / 8];
    match file.read_f64_into::<LittleEndian>(&mut samples) {
        Ok(_) => Ok(samples),
        Err(err) => Err(format!("Error reading {} f64. {:}.", samples.len(), err)),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
