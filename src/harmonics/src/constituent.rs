//! Tidal constituent description.

use crate::astro::degrees_to_radians;
use crate::nodal;

/// Amplitude factor and angle correction (degrees) applied to a constituent
/// for a given lunar ascending-node longitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodalCorrection {
    pub amplitude: f64,
    pub angle: f64,
}

/// Fitted amplitude and phase lag of a constituent.
///
/// Amplitude is in the units of the analyzed sea level; phase is in degrees
/// relative to the equilibrium tide. Both stay zero until an analysis run
/// produces them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HarmonicConstants {
    pub amplitude: f64,
    pub phase: f64,
}

/// Which nodal-correction formula a constituent is bound to.
///
/// The classical catalog only needs a handful of shapes, so the binding is a
/// tag dispatched at evaluation time rather than a boxed closure. `Custom`
/// accepts a caller-supplied function of the lunar perigee and ascending-node
/// longitudes (both in degrees).
#[derive(Clone, Copy, Debug)]
pub enum NodalCorrectionFormula {
    /// No correction: `(1.0, 0.0)`.
    Identity,
    /// First-order diurnal shape shared by Q1 and O1.
    EqualFirstOrder,
    /// Second-order semidiurnal shape shared by 2N2, Mu2, N2, Nu2 and M2.
    EqualSecondOrder,
    /// Monthly component Mm.
    Mm,
    /// Semi-monthly component Mf.
    Mf,
    /// Luni-solar diurnal component K1.
    K1,
    /// Luni-solar declinational component K2.
    K2,
    Custom(fn(perigee_longitude: f64, ascending_node_longitude: f64) -> NodalCorrection),
}

impl Default for NodalCorrectionFormula {
    fn default() -> Self {
        NodalCorrectionFormula::Identity
    }
}

/// Tag-only equality: two `Custom` bindings never compare equal, since
/// function-pointer comparison is not meaningful.
impl PartialEq for NodalCorrectionFormula {
    fn eq(&self, other: &Self) -> bool {
        use NodalCorrectionFormula::*;
        matches!(
            (self, other),
            (Identity, Identity)
                | (EqualFirstOrder, EqualFirstOrder)
                | (EqualSecondOrder, EqualSecondOrder)
                | (Mm, Mm)
                | (Mf, Mf)
                | (K1, K1)
                | (K2, K2)
        )
    }
}

impl NodalCorrectionFormula {
    /// Evaluates the bound formula for the given lunar perigee and
    /// ascending-node longitudes (degrees).
    pub fn evaluate(&self, perigee_longitude: f64, ascending_node_longitude: f64) -> NodalCorrection {
        let node = degrees_to_radians(ascending_node_longitude);
        let (sin_node, cos_node) = node.sin_cos();
        match self {
            NodalCorrectionFormula::Identity => NodalCorrection {
                amplitude: 1.0,
                angle: 0.0,
            },
            NodalCorrectionFormula::EqualFirstOrder => {
                nodal::equal_first_order_factors(cos_node, sin_node)
            }
            NodalCorrectionFormula::EqualSecondOrder => {
                nodal::equal_second_order_factors(cos_node, sin_node)
            }
            NodalCorrectionFormula::Mm => nodal::monthly_component_factors(cos_node, sin_node),
            NodalCorrectionFormula::Mf => nodal::semi_monthly_component_factors(cos_node, sin_node),
            NodalCorrectionFormula::K1 => nodal::luni_solar_diurnal_factors(cos_node, sin_node),
            NodalCorrectionFormula::K2 => nodal::declinational_factors(cos_node, sin_node),
            NodalCorrectionFormula::Custom(func) => {
                func(perigee_longitude, ascending_node_longitude)
            }
        }
    }
}

/// One sinusoidal component of the tide.
///
/// Frequency and Doodson numbers are fixed at construction. The harmonic
/// constants are only ever filled in by the analysis engine, which returns a
/// new constituent value rather than mutating the input (copy-on-fit).
#[derive(Clone, Debug)]
pub struct HarmonicConstituent {
    frequency: f64,
    harmonic_constants: HarmonicConstants,
    extended_doodson_numbers: [i32; 7],
    nodal_correction: NodalCorrectionFormula,
}

impl HarmonicConstituent {
    /// New unfitted constituent with the identity nodal correction.
    ///
    /// `frequency` is the angular speed in degrees per hour. The seven
    /// extended Doodson numbers multiply, in order: mean lunar time, Moon
    /// longitude, Sun longitude, lunar perigee, ascending node, perihelion
    /// and a 90-degree phase shift.
    pub fn new(frequency: f64, extended_doodson_numbers: [i32; 7]) -> Self {
        Self {
            frequency,
            harmonic_constants: HarmonicConstants::default(),
            extended_doodson_numbers,
            nodal_correction: NodalCorrectionFormula::default(),
        }
    }

    /// Binds a nodal-correction formula, replacing the identity default.
    pub fn with_nodal_correction(mut self, formula: NodalCorrectionFormula) -> Self {
        self.nodal_correction = formula;
        self
    }

    /// Sets known harmonic constants, e.g. for prediction-only use.
    pub fn with_constants(mut self, constants: HarmonicConstants) -> Self {
        self.harmonic_constants = constants;
        self
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn extended_doodson_numbers(&self) -> &[i32; 7] {
        &self.extended_doodson_numbers
    }

    pub fn harmonic_constants(&self) -> HarmonicConstants {
        self.harmonic_constants
    }

    pub fn nodal_correction_formula(&self) -> NodalCorrectionFormula {
        self.nodal_correction
    }

    /// Evaluates this constituent's nodal correction for the given lunar
    /// perigee and ascending-node longitudes (degrees).
    pub fn nodal_corrections(
        &self,
        perigee_longitude: f64,
        ascending_node_longitude: f64,
    ) -> NodalCorrection {
        self.nodal_correction
            .evaluate(perigee_longitude, ascending_node_longitude)
    }

    /// Copy-on-fit: same constituent with freshly fitted constants.
    pub(crate) fn fitted(&self, amplitude: f64, phase: f64) -> Self {
        Self {
            frequency: self.frequency,
            harmonic_constants: HarmonicConstants { amplitude, phase },
            extended_doodson_numbers: self.extended_doodson_numbers,
            nodal_correction: self.nodal_correction,
        }
    }
}
