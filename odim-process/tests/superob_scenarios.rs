//! End-to-end superobing scenarios over synthetic volumes.

use odim_model::data::{uniform_azimuths, Moment, PolarVolume, Quantity, Sweep, SweepGrid};
use odim_process::output::{AttributeValue, MemoryOutput, OutputFile};
use odim_process::report::StageReport;
use odim_process::result::Error;
use odim_process::settings::Settings;
use odim_process::superob::superob;
use std::f64::consts::TAU;

fn dbz_sweep(ray_count: usize, gate_count: usize, values: Vec<f64>, quality: Vec<f64>) -> Sweep {
    Sweep::new(
        "dataset1",
        0.01,
        0.0,
        500.0,
        uniform_azimuths(ray_count),
        SweepGrid::new(ray_count, gate_count, values),
    )
    .with_quality(SweepGrid::new(ray_count, gate_count, quality))
}

fn vrad_sweep(ray_count: usize, gate_count: usize, values: Vec<f64>) -> Sweep {
    Sweep::new(
        "dataset2",
        0.01,
        0.0,
        500.0,
        uniform_azimuths(ray_count),
        SweepGrid::new(ray_count, gate_count, values),
    )
    .with_nyquist(10.0)
}

fn dbz_volume(sweep: Sweep) -> PolarVolume {
    PolarVolume::new(
        100.0,
        Moment::new(Quantity::Dbz, vec![sweep]),
        Moment::empty(Quantity::Vrad),
    )
}

fn vrad_volume(sweep: Sweep) -> PolarVolume {
    PolarVolume::new(
        100.0,
        Moment::empty(Quantity::Dbz),
        Moment::new(Quantity::Vrad, vec![sweep]),
    )
}

#[test]
fn test_coarse_dimensions_and_coordinates() {
    let sweep = dbz_sweep(16, 20, vec![10.0; 320], vec![1.0; 320]);
    let mut volume = dbz_volume(sweep);
    let settings = Settings {
        range_bin_factor: 4,
        ray_angle_factor: 3,
        ..Settings::default()
    };
    let mut output = MemoryOutput::new();
    let mut report = StageReport::new("superob");

    superob(&mut volume, &settings, &mut output, &mut report).unwrap();

    let coarse = volume.superobed_dbz().unwrap();
    assert_eq!(coarse.sweep_count(), 1);
    let sweep = &coarse.sweeps()[0];
    assert_eq!(sweep.ray_count(), 16 / 3);
    assert_eq!(sweep.gate_count(), 20 / 4);
    assert_eq!(sweep.rscale_m(), 4.0 * 500.0);
    assert_eq!(sweep.rstart_m(), 0.0);
    for (ray, &azimuth) in sweep.azimuths_rad().iter().enumerate() {
        assert!((azimuth - ray as f64 * TAU / 5.0).abs() < 1e-12);
    }
    for (gate, &range) in sweep.ranges_m().iter().enumerate() {
        assert!((range - gate as f64 * 2_000.0).abs() < 1e-9);
    }
}

#[test]
fn test_wet_cell_emits_wet_average() {
    // One coarse cell of 12 source bins: 8 wet at 30 dBZ, 4 dry at -30.
    let mut values = vec![30.0; 8];
    values.extend_from_slice(&[-30.0; 4]);
    let sweep = dbz_sweep(4, 3, values, vec![1.0; 12]);
    let mut volume = dbz_volume(sweep);
    let settings = Settings {
        range_bin_factor: 3,
        ray_angle_factor: 4,
        max_arc_size: 1e9,
        dbz_percentage: 0.5,
        dbz_clearsky: 0.0,
        min_quality: 0.5,
        ..Settings::default()
    };
    let mut output = MemoryOutput::new();
    let mut report = StageReport::new("superob");

    superob(&mut volume, &settings, &mut output, &mut report).unwrap();

    let coarse = &volume.superobed_dbz().unwrap().sweeps()[0];
    assert_eq!(coarse.values().value(0, 0), 30.0);
    assert_eq!(coarse.quality().unwrap().value(0, 0), 1.0);
}

#[test]
fn test_velocity_std_gate_blanks_cell() {
    // One coarse cell of 9 bins: eight ones and a ten, std about 2.83.
    let mut values = vec![1.0; 9];
    values[8] = 10.0;
    let mut volume = vrad_volume(vrad_sweep(3, 3, values));
    let settings = Settings {
        range_bin_factor: 3,
        ray_angle_factor: 3,
        max_arc_size: 1e9,
        vrad_percentage: 0.5,
        vrad_max_std: 1.0,
        ..Settings::default()
    };
    let mut output = MemoryOutput::new();
    let mut report = StageReport::new("superob");

    superob(&mut volume, &settings, &mut output, &mut report).unwrap();

    let coarse = &volume.superobed_vrad().unwrap().sweeps()[0];
    assert!(coarse.values().value(0, 0).is_nan());
    assert_eq!(coarse.quality().unwrap().value(0, 0), 0.0);
}

#[test]
fn test_velocity_aggregation_prefers_dealiased() {
    let mut volume = vrad_volume(vrad_sweep(3, 3, vec![-5.0; 9]));
    volume
        .set_dealiased(vec![SweepGrid::filled(3, 3, 15.0)])
        .unwrap();
    let settings = Settings {
        range_bin_factor: 3,
        ray_angle_factor: 3,
        max_arc_size: 1e9,
        vrad_percentage: 0.5,
        vrad_max_std: 5.0,
        ..Settings::default()
    };
    let mut output = MemoryOutput::new();
    let mut report = StageReport::new("superob");

    superob(&mut volume, &settings, &mut output, &mut report).unwrap();

    let coarse = &volume.superobed_vrad().unwrap().sweeps()[0];
    assert_eq!(coarse.values().value(0, 0), 15.0);
}

#[test]
fn test_empty_volume_is_fatal() {
    let mut volume = PolarVolume::new(
        100.0,
        Moment::empty(Quantity::Dbz),
        Moment::empty(Quantity::Vrad),
    );
    let mut output = MemoryOutput::new();
    let mut report = StageReport::new("superob");

    let result = superob(&mut volume, &Settings::default(), &mut output, &mut report);

    assert!(matches!(result, Err(Error::EmptyVolume)));
    assert!(report.has_errors());
}

#[test]
fn test_all_missing_reflectivity_warns_but_completes() {
    let sweep = dbz_sweep(4, 4, vec![f64::NAN; 16], vec![1.0; 16]);
    let mut volume = dbz_volume(sweep);
    let settings = Settings {
        range_bin_factor: 2,
        ray_angle_factor: 2,
        ..Settings::default()
    };
    let mut output = MemoryOutput::new();
    let mut report = StageReport::new("superob");

    superob(&mut volume, &settings, &mut output, &mut report).unwrap();

    assert_eq!(report.warnings().len(), 1);
    assert!(!report.has_errors());
    let coarse = &volume.superobed_dbz().unwrap().sweeps()[0];
    assert!(coarse.values().all_missing());
}

#[test]
fn test_superobed_layout_is_written() {
    let sweep = dbz_sweep(16, 20, vec![25.0; 320], vec![1.0; 320])
        .with_linear(SweepGrid::filled(16, 20, 300.0));
    let mut volume = dbz_volume(sweep);
    let settings = Settings {
        range_bin_factor: 4,
        ray_angle_factor: 3,
        min_quality: 0.5,
        dbz_percentage: 0.5,
        dbz_clearsky: 0.0,
        ..Settings::default()
    };
    let mut output = MemoryOutput::new();
    let mut report = StageReport::new("superob");

    superob(&mut volume, &settings, &mut output, &mut report).unwrap();

    assert_eq!(output.read_attribute("dataset1/where", "nbins"), Some(5.0));
    assert_eq!(output.read_attribute("dataset1/where", "nrays"), Some(5.0));
    assert_eq!(
        output.read_attribute("dataset1/where", "rscale"),
        Some(2_000.0)
    );
    let data = output.dataset("dataset1/data1", "data").unwrap();
    assert_eq!(data.ray_count(), 5);
    assert_eq!(data.gate_count(), 5);
    assert!(output.dataset("dataset1/data2", "data").is_some());
    assert_eq!(
        output.attribute("dataset1/quality1/how", "task"),
        Some(&AttributeValue::Text("superobing".to_owned()))
    );
    assert_eq!(
        output.read_attribute("dataset1/quality1/what", "gain"),
        Some(1.0 / 255.0)
    );
}
