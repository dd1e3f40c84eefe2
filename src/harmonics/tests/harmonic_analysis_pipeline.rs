//! End-to-end tests for the harmonic analysis pipeline: synthetic series
//! generation, least-squares fitting, and reconstruction of the series from
//! the fitted constants.

use approx::assert_abs_diff_eq;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use tidalrs_harmonics::astro;
use tidalrs_harmonics::catalog;
use tidalrs_harmonics::compute_harmonic_constants;
use tidalrs_harmonics::predict_sea_levels;
use tidalrs_harmonics::HarmonicConstants;
use tidalrs_harmonics::HarmonicConstituent;

const M2_FREQUENCY: f64 = 28.9841042;
const S2_FREQUENCY: f64 = 30.0;

fn hourly_timestamps(start: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    (0..count)
        .map(|i| start + Duration::hours(i as i64))
        .collect()
}

/// Synthetic tide built directly from cosine/sine components so the fit's
/// conventions can be checked without any equilibrium-phase bookkeeping:
/// all-zero Doodson numbers pin the equilibrium phase angle at zero and the
/// default correction is the identity.
fn synthetic_series(
    timestamps: &[DateTime<Utc>],
    mean: f64,
    components: &[(f64, f64, f64)], // (frequency deg/h, amplitude, phase degrees)
) -> Vec<f64> {
    timestamps
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let t = i as f64; // hourly series, elapsed hours == index
            let mut level = mean;
            for &(frequency, amplitude, phase) in components {
                let x = astro::degrees_to_radians(frequency * t);
                let phase_radians = astro::degrees_to_radians(phase);
                level += amplitude * (phase_radians.cos() * x.cos() + phase_radians.sin() * x.sin());
            }
            level
        })
        .collect()
}

#[test]
fn m2_s2_scenario_recovers_known_constants() {
    // 30 days of hourly data from two constituents with identity nodal
    // corrections.
    let start = Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap();
    let timestamps = hourly_timestamps(start, 30 * 24);
    let components = [(M2_FREQUENCY, 1.2, 33.0), (S2_FREQUENCY, 0.45, 310.0)];
    let mean = 5.1;
    let levels = synthetic_series(&timestamps, mean, &components);

    let constituents = vec![
        HarmonicConstituent::new(M2_FREQUENCY, [0; 7]),
        HarmonicConstituent::new(S2_FREQUENCY, [0; 7]),
    ];
    let (fitted_mean, fitted) =
        compute_harmonic_constants(&levels, &timestamps, &constituents).unwrap();

    assert_abs_diff_eq!(fitted_mean, mean, epsilon = 1e-6);
    for (constituent, &(_, amplitude, phase)) in fitted.iter().zip(&components) {
        let constants = constituent.harmonic_constants();
        assert_abs_diff_eq!(constants.amplitude, amplitude, epsilon = 1e-6);
        assert_abs_diff_eq!(constants.phase, phase, epsilon = 1e-6);
    }
    // Copy-on-fit: the input list is untouched.
    for constituent in &constituents {
        assert_eq!(constituent.harmonic_constants(), HarmonicConstants::default());
    }
}

#[test]
fn zero_noise_round_trip_reproduces_the_series() {
    let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let timestamps = hourly_timestamps(start, 14 * 24);
    let components = [
        (M2_FREQUENCY, 0.9, 120.0),
        (S2_FREQUENCY, 0.3, 200.0),
        (15.0410686, 0.15, 75.0), // K1 speed, identity correction here
    ];
    let levels = synthetic_series(&timestamps, 2.0, &components);

    let constituents: Vec<HarmonicConstituent> = components
        .iter()
        .map(|&(frequency, _, _)| HarmonicConstituent::new(frequency, [0; 7]))
        .collect();
    let (mean, fitted) = compute_harmonic_constants(&levels, &timestamps, &constituents).unwrap();

    // Reconstruct with the fit's own convention: amplitude * cos(x - phase).
    for (i, observed) in levels.iter().enumerate() {
        let t = i as f64;
        let mut level = mean;
        for constituent in &fitted {
            let constants = constituent.harmonic_constants();
            let x = astro::degrees_to_radians(constituent.frequency() * t);
            level += constants.amplitude
                * (x - astro::degrees_to_radians(constants.phase)).cos();
        }
        assert_abs_diff_eq!(level, *observed, epsilon = 1e-6);
    }
}

#[test]
fn catalog_constituents_round_trip_through_the_full_nodal_path() {
    // Generate from the same model the engine fits: equilibrium phase from
    // the real Doodson numbers and nodal corrections from the real catalog
    // formulas, all at the series epoch.
    let start = Utc.with_ymd_and_hms(2022, 9, 15, 0, 0, 0).unwrap();
    let timestamps = hourly_timestamps(start, 20 * 24);
    let reference = start.date_naive();

    let moon = astro::calculate_moon_mean_longitude(reference, 0, 0);
    let sun = astro::calculate_sun_mean_longitude(reference, 0, 0);
    let perigee = astro::calculate_lunar_perigee(reference, 0, 0);
    let node = astro::calculate_lunar_ascending_node_longitude(reference, 0, 0);
    let perihelion = astro::calculate_perihelion_longitude(reference, 0, 0);

    let constituents = vec![catalog::get("M2").unwrap(), catalog::get("K1").unwrap()];
    let targets = [(0.85, 40.0), (0.25, 260.0)];

    let levels: Vec<f64> = (0..timestamps.len())
        .map(|i| {
            let t = i as f64;
            let mut level = 1.5;
            for (constituent, &(amplitude, phase)) in constituents.iter().zip(&targets) {
                let d = constituent.extended_doodson_numbers();
                let equilibrium = d[0] as f64 * (sun - moon)
                    + d[1] as f64 * moon
                    + d[2] as f64 * sun
                    + d[3] as f64 * perigee
                    + d[4] as f64 * node
                    + d[5] as f64 * perihelion
                    + d[6] as f64 * 90.0;
                let correction = constituent.nodal_corrections(perigee, node);
                let x = astro::degrees_to_radians(
                    constituent.frequency() * t + equilibrium - correction.angle,
                );
                level += correction.amplitude
                    * amplitude
                    * (x - astro::degrees_to_radians(phase)).cos();
            }
            level
        })
        .collect();

    let (mean, fitted) = compute_harmonic_constants(&levels, &timestamps, &constituents).unwrap();
    assert_abs_diff_eq!(mean, 1.5, epsilon = 1e-6);
    for (constituent, &(amplitude, phase)) in fitted.iter().zip(&targets) {
        let constants = constituent.harmonic_constants();
        assert_abs_diff_eq!(constants.amplitude, amplitude, epsilon = 1e-6);
        assert_abs_diff_eq!(constants.phase, phase, epsilon = 1e-6);
    }
}

#[test]
fn prediction_matches_the_documented_formula() {
    let constituents = vec![
        HarmonicConstituent::new(M2_FREQUENCY, [0; 7]).with_constants(HarmonicConstants {
            amplitude: 1.1,
            phase: 15.0,
        }),
        HarmonicConstituent::new(S2_FREQUENCY, [0; 7]).with_constants(HarmonicConstants {
            amplitude: 0.5,
            phase: 290.0,
        }),
    ];
    let start = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    let timestamps = hourly_timestamps(start, 48);
    let levels = predict_sea_levels(3.0, &constituents, &timestamps).unwrap();
    assert_eq!(levels.len(), timestamps.len());

    for (i, level) in levels.iter().enumerate() {
        let t = i as f64;
        let mut expected = 3.0;
        for constituent in &constituents {
            let constants = constituent.harmonic_constants();
            expected += constants.amplitude
                * astro::degrees_to_radians(constituent.frequency() * t + constants.phase).cos();
        }
        assert_abs_diff_eq!(*level, expected, epsilon = 1e-12);
    }
}
