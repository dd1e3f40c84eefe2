//! Nodal factor formulas.
//!
//! The ~18.6-year precession of the lunar ascending node modulates each
//! constituent's amplitude and phase. The classical corrections are small
//! trigonometric functions of the node longitude `N`; every formula here
//! takes `cos N` and `sin N` precomputed once per longitude and returns the
//! amplitude factor together with the angle correction in degrees.

use crate::constituent::NodalCorrection;

/// Shared by the first-order diurnal components (Q1, O1).
pub fn equal_first_order_factors(cos_node: f64, sin_node: f64) -> NodalCorrection {
    NodalCorrection {
        amplitude: 1.009 + 0.187 * cos_node,
        angle: 10.8 * sin_node,
    }
}

/// Shared by the second-order semidiurnal components (2N2, Mu2, N2, Nu2, M2).
pub fn equal_second_order_factors(cos_node: f64, sin_node: f64) -> NodalCorrection {
    NodalCorrection {
        amplitude: 1.0 - 0.037 * cos_node,
        angle: -2.1 * sin_node,
    }
}

/// Monthly component Mm.
pub fn monthly_component_factors(cos_node: f64, _sin_node: f64) -> NodalCorrection {
    NodalCorrection {
        amplitude: 1.0 - 0.130 * cos_node,
        angle: 0.0,
    }
}

/// Semi-monthly component Mf.
pub fn semi_monthly_component_factors(cos_node: f64, sin_node: f64) -> NodalCorrection {
    NodalCorrection {
        amplitude: 1.043 + 0.414 * cos_node,
        angle: -23.6 * sin_node,
    }
}

/// Luni-solar diurnal component K1.
pub fn luni_solar_diurnal_factors(cos_node: f64, sin_node: f64) -> NodalCorrection {
    NodalCorrection {
        amplitude: 1.006 + 0.115 * cos_node,
        angle: -8.9 * sin_node,
    }
}

/// Luni-solar declinational component K2.
pub fn declinational_factors(cos_node: f64, sin_node: f64) -> NodalCorrection {
    NodalCorrection {
        amplitude: 1.024 + 0.286 * cos_node,
        angle: -17.7 * sin_node,
    }
}
