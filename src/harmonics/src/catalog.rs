//! Default catalog of classical tidal constituents.
//!
//! Angular speeds are in degrees per hour; the seven extended Doodson
//! numbers multiply mean lunar time, Moon longitude, Sun longitude, lunar
//! perigee, ascending node, perihelion and a 90-degree phase shift. Each
//! entry is pre-bound to its classical nodal-correction formula and carries
//! no harmonic constants until fitted.

use crate::constituent::HarmonicConstituent;
use crate::constituent::NodalCorrectionFormula;
use lazy_static::lazy_static;
use linked_hash_map::LinkedHashMap;

lazy_static! {
    static ref CONSTITUENT_CATALOG: LinkedHashMap<&'static str, HarmonicConstituent> =
        LinkedHashMap::from_iter([
            // Diurnal
            (
                "Q1",
                HarmonicConstituent::new(13.3986609, [1, -2, 0, 1, 0, 0, -1])
                    .with_nodal_correction(NodalCorrectionFormula::EqualFirstOrder),
            ),
            (
                "O1",
                HarmonicConstituent::new(13.9430356, [1, -1, 0, 0, 0, 0, -1])
                    .with_nodal_correction(NodalCorrectionFormula::EqualFirstOrder),
            ),
            ("P1", HarmonicConstituent::new(14.9589314, [1, 1, -2, 0, 0, 0, -1])),
            (
                "K1",
                HarmonicConstituent::new(15.0410686, [1, 1, 0, 0, 0, 0, 1])
                    .with_nodal_correction(NodalCorrectionFormula::K1),
            ),
            // Semidiurnal
            (
                "2N2",
                HarmonicConstituent::new(27.8953548, [2, -2, 0, 2, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::EqualSecondOrder),
            ),
            (
                "Mu2",
                HarmonicConstituent::new(27.9682084, [2, -2, 2, 0, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::EqualSecondOrder),
            ),
            (
                "N2",
                HarmonicConstituent::new(28.4397295, [2, -1, 0, 1, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::EqualSecondOrder),
            ),
            (
                "Nu2",
                HarmonicConstituent::new(28.5125831, [2, -1, 2, -1, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::EqualSecondOrder),
            ),
            (
                "M2",
                HarmonicConstituent::new(28.9841042, [2, 0, 0, 0, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::EqualSecondOrder),
            ),
            ("S2", HarmonicConstituent::new(30.0, [2, 2, -2, 0, 0, 0, 0])),
            (
                "K2",
                HarmonicConstituent::new(30.0821373, [2, 2, 0, 0, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::K2),
            ),
            // Long period
            (
                "Mm",
                HarmonicConstituent::new(0.5443747, [0, 1, 0, -1, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::Mm),
            ),
            (
                "Mf",
                HarmonicConstituent::new(1.0980331, [0, 2, 0, 0, 0, 0, 0])
                    .with_nodal_correction(NodalCorrectionFormula::Mf),
            ),
        ]);
}

/// Looks up an unfitted constituent by its classical name, e.g. `"M2"`.
pub fn get(name: &str) -> Option<HarmonicConstituent> {
    CONSTITUENT_CATALOG.get(name).cloned()
}

/// Catalog names in fixed order: diurnal, semidiurnal, long period.
pub fn names() -> Vec<&'static str> {
    CONSTITUENT_CATALOG.keys().copied().collect()
}
