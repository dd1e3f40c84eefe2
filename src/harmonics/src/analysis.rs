//! Harmonic analysis engine.
//!
//! Fits a mean sea level plus per-constituent amplitude and phase to an
//! observed series via generalized least squares, and reconstructs a series
//! from known constants. The design matrix carries the time-varying nodal
//! corrections evaluated at the series' reference epoch, so a fit and a
//! later prediction each re-derive their own corrections.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Timelike;
use chrono::Utc;
use log::debug;
use nalgebra::Cholesky;
use nalgebra::DMatrix;
use nalgebra::DVector;
use ndarray::Array1;
use ndarray::Array2;
use thiserror::Error;

use crate::astro;
use crate::constituent::HarmonicConstituent;
use crate::constituent::NodalCorrection;

#[derive(Error, Debug)]
pub enum HarmonicAnalysisError {
    #[error("the date time series is empty")]
    EmptyDateTimes,
    #[error("sea level series has {sea_levels} entries but the date time series has {date_times}")]
    LengthMismatch { sea_levels: usize, date_times: usize },
    #[error(
        "{observations} observations cannot over-determine {unknowns} unknowns; \
         supply more observations or fewer constituents"
    )]
    Underdetermined { observations: usize, unknowns: usize },
    #[error("normal equations are not positive definite; the constituent set is ill-conditioned")]
    NotPositiveDefinite,
}

/// The five mean longitudes needed by the equilibrium arguments, evaluated
/// once per reference epoch.
struct EpochLongitudes {
    moon: f64,
    sun: f64,
    perigee: f64,
    ascending_node: f64,
    perihelion: f64,
}

impl EpochLongitudes {
    /// Longitudes at 00:00 GMT of the given date.
    fn at_midnight(date: NaiveDate) -> Self {
        Self {
            moon: astro::calculate_moon_mean_longitude(date, 0, 0),
            sun: astro::calculate_sun_mean_longitude(date, 0, 0),
            perigee: astro::calculate_lunar_perigee(date, 0, 0),
            ascending_node: astro::calculate_lunar_ascending_node_longitude(date, 0, 0),
            perihelion: astro::calculate_perihelion_longitude(date, 0, 0),
        }
    }
}

/// Fractional hours of each timestamp relative to 00:00 GMT of
/// `reference_date`.
fn elapsed_time_in_hours(date_times_gmt: &[DateTime<Utc>], reference_date: NaiveDate) -> Vec<f64> {
    date_times_gmt
        .iter()
        .map(|date_time| {
            let elapsed_days = date_time
                .date_naive()
                .signed_duration_since(reference_date)
                .num_days() as f64;
            elapsed_days * 24.0 + date_time.hour() as f64 + date_time.minute() as f64 / 60.0
        })
        .collect()
}

/// Per-constituent equilibrium phase angles (with the nodal angle correction
/// already subtracted) and nodal corrections, at the given epoch.
fn equilibrium_phase_angles(
    constituents: &[HarmonicConstituent],
    longitudes: &EpochLongitudes,
) -> (Vec<f64>, Vec<NodalCorrection>) {
    let mut phase_angles = Vec::with_capacity(constituents.len());
    let mut corrections = Vec::with_capacity(constituents.len());
    for constituent in constituents {
        let doodson = constituent.extended_doodson_numbers();
        let mut angle = doodson[0] as f64 * (longitudes.sun - longitudes.moon);
        angle += doodson[1] as f64 * longitudes.moon;
        angle += doodson[2] as f64 * longitudes.sun;
        angle += doodson[3] as f64 * longitudes.perigee;
        angle += doodson[4] as f64 * longitudes.ascending_node;
        angle += doodson[5] as f64 * longitudes.perihelion;
        angle += doodson[6] as f64 * 90.0;

        let correction =
            constituent.nodal_corrections(longitudes.perigee, longitudes.ascending_node);
        phase_angles.push(angle - correction.angle);
        corrections.push(correction);
    }
    (phase_angles, corrections)
}

/// Normal equations `AᵀA` and `Aᵀy` for the least-squares system.
///
/// Column 0 of the design matrix is the constant mean-level term; columns
/// `1..=n` hold the nodal-scaled cosine terms and columns `n+1..=2n` the
/// matching sine terms, in input constituent order.
fn least_squares_matrices(
    sea_levels: &[f64],
    elapsed_hours: &[f64],
    constituents: &[HarmonicConstituent],
    phase_angles: &[f64],
    corrections: &[NodalCorrection],
) -> (Array2<f64>, Array1<f64>) {
    let rows = elapsed_hours.len();
    let n = constituents.len();
    let cols = 2 * n + 1;

    let mut design = Array2::<f64>::zeros((rows, cols));
    for i in 0..rows {
        design[[i, 0]] = 1.0;
    }
    for (j, constituent) in constituents.iter().enumerate() {
        for i in 0..rows {
            let x = astro::degrees_to_radians(
                constituent.frequency() * elapsed_hours[i] + phase_angles[j],
            );
            design[[i, j + 1]] = corrections[j].amplitude * x.cos();
            design[[i, j + 1 + n]] = corrections[j].amplitude * x.sin();
        }
    }

    let y = Array1::from_iter(sea_levels.iter().copied());
    let normal = design.t().dot(&design);
    let rhs = design.t().dot(&y);
    (normal, rhs)
}

/// Solves the symmetric positive-definite normal equations via Cholesky.
fn solve_normal_equations(
    normal: &Array2<f64>,
    rhs: &Array1<f64>,
) -> Result<DVector<f64>, HarmonicAnalysisError> {
    let size = normal.nrows();
    let mut lhs = DMatrix::<f64>::zeros(size, size);
    for i in 0..size {
        for j in 0..size {
            lhs[(i, j)] = normal[[i, j]];
        }
    }
    let rhs = DVector::from_iterator(size, rhs.iter().copied());
    let decomposition =
        Cholesky::new(lhs).ok_or(HarmonicAnalysisError::NotPositiveDefinite)?;
    Ok(decomposition.solve(&rhs))
}

fn validate_fit_inputs(
    sea_levels: &[f64],
    date_times_gmt: &[DateTime<Utc>],
    constituents: &[HarmonicConstituent],
) -> Result<(), HarmonicAnalysisError> {
    if date_times_gmt.is_empty() {
        return Err(HarmonicAnalysisError::EmptyDateTimes);
    }
    if sea_levels.len() != date_times_gmt.len() {
        return Err(HarmonicAnalysisError::LengthMismatch {
            sea_levels: sea_levels.len(),
            date_times: date_times_gmt.len(),
        });
    }
    // Two unknowns per constituent plus the mean sea level.
    let unknowns = 2 * constituents.len() + 1;
    if sea_levels.len() <= unknowns {
        return Err(HarmonicAnalysisError::Underdetermined {
            observations: sea_levels.len(),
            unknowns,
        });
    }
    Ok(())
}

/// Fits mean sea level and harmonic constants to an observed series.
///
/// `date_times_gmt` must be non-empty, match `sea_levels` in length, and be
/// strictly longer than `2 * constituents.len() + 1` so the system is
/// over-determined. Returns the mean sea level together with a new
/// constituent list that preserves each input's frequency, Doodson numbers
/// and nodal-correction binding, with the fitted amplitude and phase filled
/// in. The phase is recovered with the quadrant-aware two-argument
/// arctangent and reported in `[0, 360)` degrees.
pub fn compute_harmonic_constants(
    sea_levels: &[f64],
    date_times_gmt: &[DateTime<Utc>],
    constituents: &[HarmonicConstituent],
) -> Result<(f64, Vec<HarmonicConstituent>), HarmonicAnalysisError> {
    validate_fit_inputs(sea_levels, date_times_gmt, constituents)?;

    // Reference epoch is the first date in the series at 00:00 GMT.
    let reference_date = date_times_gmt[0].date_naive();
    let elapsed_hours = elapsed_time_in_hours(date_times_gmt, reference_date);
    let longitudes = EpochLongitudes::at_midnight(reference_date);
    let (phase_angles, corrections) = equilibrium_phase_angles(constituents, &longitudes);

    debug!(
        "fitting {} constituents against {} observations (epoch {})",
        constituents.len(),
        sea_levels.len(),
        reference_date
    );

    let (normal, rhs) = least_squares_matrices(
        sea_levels,
        &elapsed_hours,
        constituents,
        &phase_angles,
        &corrections,
    );
    let solution = solve_normal_equations(&normal, &rhs)?;

    let mean_sea_level = solution[0];
    let n = constituents.len();
    let mut fitted = Vec::with_capacity(n);
    for (i, constituent) in constituents.iter().enumerate() {
        let cos_comp = solution[i + 1];
        let sin_comp = solution[i + 1 + n];
        let amplitude = cos_comp.hypot(sin_comp);
        let phase = astro::radians_to_degrees(sin_comp.atan2(cos_comp));
        fitted.push(constituent.fitted(amplitude, astro::normalize_degrees(phase)));
    }

    Ok((mean_sea_level, fitted))
}

/// Reconstructs a sea-level series from known constants.
///
/// The reference epoch is the first prediction timestamp's date at 00:00
/// GMT, independent of any prior fit; nodal corrections are re-evaluated
/// there because they drift with the lunar node. Returns one level per
/// timestamp, in order.
pub fn predict_sea_levels(
    mean_sea_level: f64,
    constituents: &[HarmonicConstituent],
    date_times_gmt: &[DateTime<Utc>],
) -> Result<Vec<f64>, HarmonicAnalysisError> {
    let first = date_times_gmt
        .first()
        .ok_or(HarmonicAnalysisError::EmptyDateTimes)?;
    let reference_date = first.date_naive();
    let elapsed_hours = elapsed_time_in_hours(date_times_gmt, reference_date);
    let longitudes = EpochLongitudes::at_midnight(reference_date);

    let corrections: Vec<NodalCorrection> = constituents
        .iter()
        .map(|constituent| {
            constituent.nodal_corrections(longitudes.perigee, longitudes.ascending_node)
        })
        .collect();

    debug!(
        "predicting {} levels from {} constituents (epoch {})",
        date_times_gmt.len(),
        constituents.len(),
        reference_date
    );

    let levels = elapsed_hours
        .iter()
        .map(|&t| {
            let mut level = mean_sea_level;
            for (constituent, correction) in constituents.iter().zip(&corrections) {
                let constants = constituent.harmonic_constants();
                let argument = astro::degrees_to_radians(
                    constituent.frequency() * t + constants.phase - correction.angle,
                );
                level += constants.amplitude * correction.amplitude * argument.cos();
            }
            level
        })
        .collect();

    Ok(levels)
}
