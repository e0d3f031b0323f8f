//! Worker pool

use crate::app::create_progress_bar;
use crate::geometry::*;
use crate::mc::*;
use crate::medium::Medium;
use crate::photon::PhotonEngine;
use crate::recorder::ArcExitRecorder;
use crate::rng::{RandomStream, MIN_SEED};
use crate::stats::RunStats;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

/// Settings for one propagation run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of photon histories to launch.
    pub photons: u64,

    /// Number of worker threads.
    pub workers: usize,

    /// Seed words for the master random stream, each at least `MIN_SEED`.
    pub seed: [u32; 4],

    /// Injection point, strictly inside the medium.
    pub injection: Point3f,

    /// Timestep index for acoustic field lookups.
    pub timestep: usize,

    /// Whether to draw a progress bar.
    pub progress: bool,
}

/// Propagate a run of photon histories through the medium on a pool of worker
/// threads and return the merged counters.
///
/// Each worker owns a random stream seeded from the master stream, a private
/// grid tile and its own counters, so workers only contend on the shared grid
/// once per batch and on the exit recorder per detected exit.
///
/// * `medium`        - The medium.
/// * `exit_recorder` - Sink for detected exit events.
/// * `config`        - Run settings.
/// * `stop`          - Cooperative early-termination flag.
pub fn run(
    medium: &Medium,
    exit_recorder: &ArcExitRecorder,
    config: &RunConfig,
    stop: &AtomicBool,
) -> Result<RunStats, String> {
    if config.workers == 0 {
        return Err("a run needs at least one worker".to_string());
    }
    if config.seed.iter().any(|s| *s < MIN_SEED) {
        return Err(format!(
            "run seed words must be at least {}, got {:?}",
            MIN_SEED, config.seed
        ));
    }
    for axis in Axis::all() {
        let p = config.injection[axis];
        if p <= 0.0 || p >= medium.bound(axis) {
            return Err(format!(
                "injection point {:?} lies outside the medium",
                config.injection
            ));
        }
    }

    let mut master = RandomStream::new(config.seed);
    let batches = batch_sizes(config.photons, config.workers);
    let seeds = derive_seeds(&mut master, config.workers);

    let progress = if config.progress {
        let bar = create_progress_bar(config.photons);
        bar.set_message("Propagating photons");
        Some(bar)
    } else {
        None
    };

    info!(
        "propagating {} photons across {} workers",
        config.photons, config.workers
    );

    let mut worker_stats: Vec<RunStats> = vec![RunStats::default(); config.workers];
    thread::scope(|scope| {
        let (tx, rx) = crossbeam_channel::bounded::<(usize, RunStats)>(config.workers);

        // Spawn worker threads.
        for (index, (&histories, &seed)) in batches.iter().zip(seeds.iter()).enumerate() {
            let tx = tx.clone();
            let exit_recorder = Arc::clone(exit_recorder);
            let progress = progress.as_ref();
            scope.spawn(move || {
                debug!("worker {} starting {} histories", index, histories);
                let engine = PhotonEngine::new(
                    medium,
                    exit_recorder,
                    seed,
                    config.injection,
                    config.timestep,
                );
                let stats = engine.run(histories, stop, progress);
                debug!("worker {} finished", index);
                tx.send((index, stats)).unwrap();
            });
        }
        drop(tx); // Drop extra since we've cloned one for each worker.

        // Collect counters keyed by worker index so merged totals do not
        // depend on completion order.
        let slots: &mut [RunStats] = worker_stats.as_mut_slice();
        for (index, stats) in rx.iter() {
            slots[index] = stats;
        }
    });

    if let Some(bar) = &progress {
        bar.finish_with_message("Propagation complete");
    }

    let mut totals = RunStats::default();
    for stats in &worker_stats {
        totals.merge(stats);
    }
    Ok(totals)
}

/// Split a photon count into one batch per worker, with any remainder going
/// to the first workers one history apiece.
///
/// * `photons` - Number of photon histories.
/// * `workers` - Number of workers.
fn batch_sizes(photons: u64, workers: usize) -> Vec<u64> {
    let base = photons / workers as u64;
    let remainder = (photons % workers as u64) as usize;
    (0..workers)
        .map(|i| base + (i < remainder) as u64)
        .collect()
}

/// Draw one seed quadruple per worker from the master stream. Setting the
/// `MIN_SEED` bit keeps every word out of the degenerate range.
///
/// * `master`  - The master random stream.
/// * `workers` - Number of workers.
fn derive_seeds(master: &mut RandomStream, workers: usize) -> Vec<[u32; 4]> {
    (0..workers)
        .map(|_| {
            let mut words = [0_u32; 4];
            for word in words.iter_mut() {
                *word = master.uniform_u32() | MIN_SEED;
            }
            words
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::*;
    use crate::recorder::{ExitRecord, ExitRecorder};
    use float_cmp::*;
    use proptest::prelude::*;

    const SEED: [u32; 4] = [777_777, 888_888, 999_999, 101_010];

    /// Discards every record.
    struct NullRecorder;

    impl ExitRecorder for NullRecorder {
        fn get_type(&self) -> &'static str {
            "null"
        }

        fn record_exit(&self, _record: &ExitRecord) {}
    }

    fn tissue_medium() -> Medium {
        Medium::new(
            Vector3f::new(2.0, 2.0, 2.0),
            vec![Layer::new(0.1, 7.3, 1.33, 0.9, 0.0, 2.0)],
            vec![],
            DetectionGrid::new(3.0, 101).unwrap(),
            None,
        )
        .unwrap()
    }

    fn test_config(photons: u64, workers: usize) -> RunConfig {
        RunConfig {
            photons,
            workers,
            seed: SEED,
            injection: Point3f::new(1.0, 1.0, 1.0e-5),
            timestep: 0,
            progress: false,
        }
    }

    #[test]
    fn batches_split_photons_exactly() {
        assert_eq!(batch_sizes(10, 3), vec![4, 3, 3]);
        assert_eq!(batch_sizes(9, 3), vec![3, 3, 3]);
        assert_eq!(batch_sizes(2, 4), vec![1, 1, 0, 0]);
        assert_eq!(batch_sizes(0, 2), vec![0, 0]);
    }

    #[test]
    fn derived_seeds_are_valid_and_distinct() {
        let mut master = RandomStream::new(SEED);
        let seeds = derive_seeds(&mut master, 8);

        for seed in &seeds {
            assert!(seed.iter().all(|s| *s >= MIN_SEED));
        }
        for i in 0..seeds.len() {
            for j in i + 1..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let medium = tissue_medium();
        let recorder: ArcExitRecorder = Arc::new(NullRecorder);
        let stop = AtomicBool::new(false);

        let config = test_config(10, 0);
        let err = run(&medium, &recorder, &config, &stop).unwrap_err();
        assert!(err.contains("worker"), "{}", err);

        let mut config = test_config(10, 2);
        config.seed[2] = 7;
        let err = run(&medium, &recorder, &config, &stop).unwrap_err();
        assert!(err.contains("seed"), "{}", err);

        let mut config = test_config(10, 2);
        config.injection = Point3f::new(5.0, 1.0, 1.0);
        let err = run(&medium, &recorder, &config, &stop).unwrap_err();
        assert!(err.contains("injection"), "{}", err);
    }

    #[test]
    fn multi_worker_runs_conserve_energy() {
        let medium = tissue_medium();
        let recorder: ArcExitRecorder = Arc::new(NullRecorder);
        let stop = AtomicBool::new(false);
        let config = test_config(5_000, 4);

        let stats = run(&medium, &recorder, &config, &stop).unwrap();

        assert_eq!(stats.photons, 5_000);
        assert!(approx_eq!(
            Float,
            stats.weight_accounted() / 5_000.0,
            1.0,
            epsilon = 0.01
        ));
        assert!(approx_eq!(
            Float,
            medium.grid().total_deposited(),
            stats.weight_deposited,
            epsilon = 1e-6
        ));
    }

    #[test]
    fn identical_configs_reproduce_counters() {
        let config = test_config(2_000, 3);
        let stop = AtomicBool::new(false);

        let medium_a = tissue_medium();
        let recorder_a: ArcExitRecorder = Arc::new(NullRecorder);
        let stats_a = run(&medium_a, &recorder_a, &config, &stop).unwrap();

        let medium_b = tissue_medium();
        let recorder_b: ArcExitRecorder = Arc::new(NullRecorder);
        let stats_b = run(&medium_b, &recorder_b, &config, &stop).unwrap();

        assert_eq!(stats_a.photons, stats_b.photons);
        assert_eq!(stats_a.steps, stats_b.steps);
        assert_eq!(stats_a.detected_exits, stats_b.detected_exits);
        // Index-ordered merging makes the float totals stable too.
        assert_eq!(stats_a.weight_deposited, stats_b.weight_deposited);
        assert_eq!(stats_a.weight_escaped, stats_b.weight_escaped);

        // Grid merges follow completion order; bins agree to roundoff.
        let totals_a = medium_a.grid().totals();
        let totals_b = medium_b.grid().totals();
        for (a, b) in totals_a.iter().zip(totals_b.iter()) {
            assert!(approx_eq!(Float, *a, *b, epsilon = 1e-9));
        }
    }

    #[test]
    fn single_worker_runs_reproduce_the_grid_exactly() {
        let config = test_config(1_000, 1);
        let stop = AtomicBool::new(false);

        let medium_a = tissue_medium();
        let recorder_a: ArcExitRecorder = Arc::new(NullRecorder);
        run(&medium_a, &recorder_a, &config, &stop).unwrap();

        let medium_b = tissue_medium();
        let recorder_b: ArcExitRecorder = Arc::new(NullRecorder);
        run(&medium_b, &recorder_b, &config, &stop).unwrap();

        assert_eq!(medium_a.grid().totals(), medium_b.grid().totals());
    }

    #[test]
    fn raised_stop_flag_prevents_new_histories() {
        let medium = tissue_medium();
        let recorder: ArcExitRecorder = Arc::new(NullRecorder);
        let stop = AtomicBool::new(true);
        let config = test_config(500, 2);

        let stats = run(&medium, &recorder, &config, &stop).unwrap();
        assert_eq!(stats.photons, 0);
        assert_eq!(medium.grid().total_deposited(), 0.0);
    }

    proptest! {
        #[test]
        fn batches_always_cover_the_run(photons in 0_u64..100_000, workers in 1_usize..64) {
            let batches = batch_sizes(photons, workers);
            prop_assert_eq!(batches.len(), workers);
            prop_assert_eq!(batches.iter().sum::<u64>(), photons);
            let largest = batches.iter().max().unwrap();
            let smallest = batches.iter().min().unwrap();
            prop_assert!(largest - smallest <= 1);
        }
    }
}
