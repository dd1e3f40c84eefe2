pub mod analysis;
pub mod astro;
pub mod catalog;
pub mod constituent;
pub mod nodal;

pub use analysis::compute_harmonic_constants;
pub use analysis::predict_sea_levels;
pub use analysis::HarmonicAnalysisError;
pub use constituent::HarmonicConstants;
pub use constituent::HarmonicConstituent;
pub use constituent::NodalCorrection;
pub use constituent::NodalCorrectionFormula;
