#[macro_use]
extern crate log;

use absorbers::*;
use core::app::*;
use core::fields::*;
use core::geometry::*;
use core::mc::*;
use core::medium::*;
use core::pool::{self, RunConfig};
use core::recorder::*;
use detectors::*;
use fields::*;
use recorders::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Background absorption of the tissue layer, also used to normalize the
/// fluence profile.
const TISSUE_MU_A: Float = 0.1;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = simulate() {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Assemble the demonstration scenario, propagate, write the outputs.
fn simulate() -> Result<(), String> {
    let medium = build_medium()?;

    let exit_recorder = Arc::new(FileExitRecorder::create(&options().exit_file)?);
    let recorder: ArcExitRecorder = exit_recorder.clone();

    let config = RunConfig {
        photons: options().photons,
        workers: options().threads(),
        seed: options().seed(),
        // Centre of the top face, just inside the first layer.
        injection: Point3f::new(1.0, 1.0, 1e-5),
        timestep: options().timestep,
        progress: !options().quiet,
    };

    let stop = AtomicBool::new(false);
    let stats = pool::run(&medium, &recorder, &config, &stop)?;
    info!("run complete\n{stats}");

    exit_recorder.flush()?;
    info!("wrote detected exits to {}", options().exit_file);

    write_tallies(&medium)?;
    info!("wrote absorber tallies to {}", options().tally_file);

    let pairs = medium.grid().fluence(stats.photons as usize, TISSUE_MU_A)?;
    write_fluence(&options().fluence_file, &pairs)?;
    info!("wrote fluence profile to {}", options().fluence_file);

    Ok(())
}

/// Build the demonstration medium: a thin air gap over tissue with an
/// embedded spherical absorber and a circular detector on the transmission
/// face.
fn build_medium() -> Result<Medium, String> {
    let extent = Vector3f::new(2.0, 2.0, 2.0);

    let air = Layer::new(0.0, 0.001, 1.0, 1.0, 0.0, 0.1);

    let mut tissue = Layer::new(TISSUE_MU_A, 7.3, 1.33, 0.9, 0.1, 2.0);
    tissue.add_absorber(Arc::new(SphereAbsorber::new(
        Point3f::new(1.0, 1.0, 1.0),
        0.6,
        2.0,
        7.3,
    )));

    let detector: ArcDetector = Arc::new(CircularDetector::new(
        Point3f::new(1.0, 1.0, 2.0),
        1.0,
        DetectorPlane::XY,
    ));

    let grid = DetectionGrid::new(options().grid_extent, options().bins)?;

    Medium::new(extent, vec![air, tissue], vec![detector], grid, load_fields()?)
}

/// Load the acoustic fields named on the command line, when any.
fn load_fields() -> Result<Option<FieldSet>, String> {
    let opts = options();
    if opts.pressure_file.is_none() && opts.displacement_file.is_none() {
        return Ok(None);
    }

    let dims = match <[usize; 3]>::try_from(opts.field_dims.clone()) {
        Ok(d) => (d[0], d[1], d[2]),
        Err(_) => return Err("acoustic field files need --fielddims nx ny nz".to_string()),
    };

    let pressure: Option<ArcPressureField> = match &opts.pressure_file {
        Some(path) => {
            let field = GridPressureField::from_raw(path, dims, opts.voxel_size)?;
            info!("loaded {} pressure frames from {}", field.num_frames(), path);
            Some(Arc::new(field))
        }
        None => None,
    };

    let displacement: Option<ArcDisplacementField> = match &opts.displacement_file {
        Some(path) => {
            let field = GridDisplacementField::from_raw(path, dims, opts.voxel_size)?;
            info!(
                "loaded {} displacement frames from {}",
                field.num_frames(),
                path
            );
            Some(Arc::new(field))
        }
        None => None,
    };

    Ok(Some(FieldSet::new(pressure, displacement)))
}

/// Write the per absorber tallies.
///
/// * `medium` - The medium.
fn write_tallies(medium: &Medium) -> Result<(), String> {
    let recorder = FileTallyRecorder::create(&options().tally_file)?;
    for (absorber_id, absorber) in medium.absorbers().enumerate() {
        recorder.record_tally(&AbsorberTally {
            absorber_id,
            absorber_type: absorber.get_type(),
            absorbed_weight: absorber.absorbed_weight(),
        });
    }
    recorder.flush()
}
