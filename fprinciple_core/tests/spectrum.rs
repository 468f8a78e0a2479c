use fprinciple_core::data::{generate, low_dim_data};
use fprinciple_core::{amplitude_spectrum, LowDimConfig, SpectralTracker};

fn fixture() -> (Vec<f64>, Vec<f64>) {
    let data = low_dim_data(100, 5.0).unwrap();
    (data.positions(), data.targets())
}

#[test]
fn square_wave_fixture_peaks_at_fundamental() {
    let (x, y) = fixture();
    let dx = x[1] - x[0];
    let spectrum = amplitude_spectrum(&y, dx).unwrap();

    assert_eq!(spectrum.len(), 51);
    let dominant = spectrum.dominant_bin().unwrap();
    assert_eq!(dominant, 4);
    assert!((spectrum.frequencies[dominant] - 0.2).abs() <= spectrum.resolution());

    let fundamental = spectrum.amplitudes[spectrum.bin_nearest(0.2).unwrap()];
    assert!(fundamental > spectrum.amplitudes[spectrum.bin_nearest(0.0).unwrap()]);
    for harmonic in [0.6, 1.0, 1.4, 1.8, 2.2] {
        let bin = spectrum.bin_nearest(harmonic).unwrap();
        assert!(
            fundamental > spectrum.amplitudes[bin],
            "harmonic {harmonic} at bin {bin} is not below the fundamental"
        );
    }
}

#[test]
fn odd_harmonics_stand_out_from_neighbours() {
    let (x, y) = fixture();
    let spectrum = amplitude_spectrum(&y, x[1] - x[0]).unwrap();
    let a = &spectrum.amplitudes;

    for bin in [12, 20] {
        assert!(a[bin] > a[bin - 1], "bin {bin} below left neighbour");
        assert!(a[bin] > a[bin + 1], "bin {bin} below right neighbour");
    }
    assert!(a[0].abs() < 1e-12);
}

#[test]
fn tracker_reuses_target_and_matches_direct_spectrum() {
    let (x, y) = fixture();
    let tracker = SpectralTracker::from_samples(&x, &y).unwrap();
    let direct = amplitude_spectrum(&y, x[1] - x[0]).unwrap();
    assert_eq!(tracker.target().as_ref(), &direct);

    let half: Vec<f64> = y.iter().map(|v| 0.5 * v).collect();
    let first = tracker.snapshot(0, &half).unwrap();
    let second = tracker.snapshot(15, &y).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first.target, &second.target));
    assert_eq!(first.frequencies(), direct.frequencies.as_slice());

    for (p, t) in first.predicted.amplitudes.iter().zip(&direct.amplitudes) {
        assert!((p - 0.5 * t).abs() < 1e-12);
    }
    assert_eq!(second.relative_error_at(4), Some(0.0));
}

#[test]
fn snapshot_cadence_and_frames() {
    let epochs: Vec<usize> = (0..50)
        .filter(|&epoch| SpectralTracker::should_snapshot(epoch, 15))
        .collect();
    assert_eq!(epochs, vec![0, 15, 30, 45]);
    let frames: Vec<usize> = epochs
        .iter()
        .map(|&epoch| SpectralTracker::frame_index(epoch, 15))
        .collect();
    assert_eq!(frames, vec![1, 2, 3, 4]);
}

#[test]
fn generator_follows_config() {
    let config = LowDimConfig {
        num_samples: 41,
        period: 2.0,
        domain_min: 0.0,
        domain_max: 4.0,
        cutoff: 0.0,
    };
    let data = generate(&config).unwrap();
    assert_eq!(data.len(), 41);
    assert_eq!(data.x[[40, 0]], 4.0);
    assert!((data.dx().unwrap() - 0.1).abs() < 1e-12);
    assert!(data.y.iter().all(|v| [-1.0, 0.0, 1.0].contains(v)));
    assert_eq!(data.y[[5, 0]], 1.0);
    assert_eq!(data.y[[15, 0]], -1.0);
}
