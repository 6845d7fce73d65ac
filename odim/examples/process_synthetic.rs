//! Builds a small synthetic volume, runs both processing stages against an
//! in-memory output, and prints what was produced.

use log::{info, LevelFilter};
use odim::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .filter_module("odim", LevelFilter::Debug)
        .init();

    let ray_count = 72;
    let gate_count = 40;
    let nyquist = 8.0;
    let azimuths = uniform_azimuths(ray_count);

    // Radial projection of a (5, 12) m/s wind, folded into the Nyquist
    // interval the way a radar would measure it.
    let mut velocities = Vec::with_capacity(ray_count * gate_count);
    for azimuth in &azimuths {
        for _ in 0..gate_count {
            let truth = 5.0 * azimuth.sin() + 12.0 * azimuth.cos();
            velocities.push(truth - 2.0 * nyquist * (truth / (2.0 * nyquist)).round());
        }
    }
    let vrad = Sweep::new(
        "dataset1",
        0.0,
        0.0,
        500.0,
        azimuths.clone(),
        SweepGrid::new(ray_count, gate_count, velocities),
    )
    .with_nyquist(nyquist);

    // A reflectivity blob in the first quadrant over a clear-sky background.
    let mut reflectivities = Vec::with_capacity(ray_count * gate_count);
    for ray in 0..ray_count {
        for gate in 0..gate_count {
            if ray < ray_count / 4 && (10..30).contains(&gate) {
                reflectivities.push(35.0);
            } else {
                reflectivities.push(-25.0);
            }
        }
    }
    let dbz = Sweep::new(
        "dataset2",
        0.0,
        0.0,
        500.0,
        azimuths,
        SweepGrid::new(ray_count, gate_count, reflectivities),
    )
    .with_quality(SweepGrid::filled(ray_count, gate_count, 1.0));

    let mut volume = PolarVolume::new(
        50.0,
        Moment::new(Quantity::Dbz, vec![dbz]),
        Moment::new(Quantity::Vrad, vec![vrad]),
    );

    let settings = Settings {
        min_good_points: 50,
        range_bin_factor: 4,
        ray_angle_factor: 3,
        max_arc_size: 4_000.0,
        min_quality: 0.5,
        dbz_clearsky: 0.0,
        ..Settings::default()
    };

    let mut output = MemoryOutput::new();
    process_volume(&mut volume, &settings, &mut output)?;

    let corrected = volume
        .dealiased()
        .map(|grids| grids[0].finite_count())
        .unwrap_or(0);
    info!("dealiased {corrected} velocity bins");

    if let Some(coarse) = volume.superobed_dbz() {
        let sweep = &coarse.sweeps()[0];
        info!(
            "coarse reflectivity: {} rays x {} gates, {} defined",
            sweep.ray_count(),
            sweep.gate_count(),
            sweep.values().finite_count()
        );
    }
    if let Some(coarse) = volume.superobed_vrad() {
        let sweep = &coarse.sweeps()[0];
        info!(
            "coarse velocity: {} rays x {} gates, {} defined",
            sweep.ray_count(),
            sweep.gate_count(),
            sweep.values().finite_count()
        );
    }
    info!(
        "captured {} attributes and {} byte planes",
        output.attribute_count(),
        output.dataset_count()
    );

    Ok(())
}
