//! Application related stuff

use crate::mc::Float;
use crate::rng::DEFAULT_SEED;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// Returns the global application options.
pub fn options() -> &'static Options {
    &OPTIONS
}

/// System wide options.
#[derive(Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for propagation.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for propagation."
    )]
    n_threads: usize,

    /// Number of photon histories to launch.
    #[clap(
        long = "photons",
        short = 'n',
        value_name = "NUM",
        default_value_t = 100_000,
        help = "Launch the specified number of photon histories."
    )]
    pub photons: u64,

    /// Seed words s1, s2, s3, s4 for the master random stream.
    #[clap(
        long = "seed",
        short = 's',
        value_name = "NUM",
        num_args = 4,
        help = "Seed the master random stream (s1 s2 s3 s4, each >= 128)."
    )]
    seed: Vec<u32>,

    /// Number of depth bins in the detection grid.
    #[clap(
        long = "bins",
        value_name = "NUM",
        default_value_t = 101,
        help = "Number of depth bins in the detection grid."
    )]
    pub bins: usize,

    /// Depth extent covered by the detection grid.
    #[clap(
        long = "gridextent",
        value_name = "FLOAT",
        default_value_t = 3.0,
        help = "Depth extent covered by the detection grid in cm."
    )]
    pub grid_extent: Float,

    /// Timestep index for acoustic field lookups.
    #[clap(
        long = "timestep",
        value_name = "NUM",
        default_value_t = 0,
        help = "Timestep index for acoustic field lookups."
    )]
    pub timestep: usize,

    /// Path to the detected exit photon file.
    #[clap(
        long = "exitfile",
        short = 'o',
        value_name = "FILE",
        default_value = "exits.txt",
        help = "Write detected exit photons to the given filename."
    )]
    pub exit_file: String,

    /// Path to the depth fluence profile file.
    #[clap(
        long = "fluencefile",
        value_name = "FILE",
        default_value = "fluence.txt",
        help = "Write the depth fluence profile to the given filename."
    )]
    pub fluence_file: String,

    /// Path to the absorber tally file.
    #[clap(
        long = "tallyfile",
        value_name = "FILE",
        default_value = "tallies.txt",
        help = "Write per absorber tallies to the given filename."
    )]
    pub tally_file: String,

    /// Path to the raw pressure field frames.
    #[clap(
        long = "pressure",
        value_name = "FILE",
        help = "Read raw pressure field frames from the given filename."
    )]
    pub pressure_file: Option<String>,

    /// Path to the raw displacement field frames.
    #[clap(
        long = "displacement",
        value_name = "FILE",
        help = "Read raw displacement field frames from the given filename."
    )]
    pub displacement_file: Option<String>,

    /// The field grid dimensions nx, ny, nz.
    #[clap(
        long = "fielddims",
        value_name = "NUM",
        num_args = 3,
        help = "Specify the acoustic field grid dimensions (nx ny nz)."
    )]
    pub field_dims: Vec<usize>,

    /// Edge length of a field voxel.
    #[clap(
        long = "voxelsize",
        value_name = "FLOAT",
        default_value_t = 0.1,
        help = "Edge length of an acoustic field voxel in cm."
    )]
    pub voxel_size: Float,

    /// Suppress all text output other than error messages.
    #[clap(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the master seed words, falling back to the default seed when
    /// none were given.
    pub fn seed(&self) -> [u32; 4] {
        match <[u32; 4]>::try_from(self.seed.clone()) {
            Ok(seed) => seed,
            Err(_) => DEFAULT_SEED,
        }
    }
}

/// Create a progress bar for `len` units of work.
///
/// * `len` - Total number of work units.
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    let style =
        ProgressStyle::with_template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress
}
