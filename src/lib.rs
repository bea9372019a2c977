// Export main modules
pub mod analysis;
mod clock;
pub mod effects;
mod export;
pub mod logging;
mod mesh;
mod model;
pub mod risk;
mod surface;
pub mod wave;

// Re-export everything for public use
pub use analysis::{EnergySpectrum, WaveAnalysis};
pub use clock::SimulationClock;
pub use effects::{Effect, EffectToggles};
pub use export::{save_with, write_profile_csv, write_snapshot_json, ExportFormat, Snapshot};
pub use mesh::{Face, Mesh, Vertex};
pub use model::{SpatialGrid, WaveFrame, WaveProfileCalculator};
pub use risk::{assess_risk, RiskAssessment, RiskLevel};
pub use surface::WaveSurface;
pub use wave::WaveParameters;

pub mod prelude {
    pub use crate::analysis::{EnergySpectrum, WaveAnalysis};
    pub use crate::clock::SimulationClock;
    pub use crate::effects::{Effect, EffectToggles};
    pub use crate::export::{save_with, write_profile_csv, write_snapshot_json, ExportFormat, Snapshot};
    pub use crate::mesh::{Face, Mesh, Vertex};
    pub use crate::model::{SpatialGrid, WaveFrame, WaveProfileCalculator};
    pub use crate::risk::{assess_risk, RiskAssessment, RiskLevel};
    pub use crate::surface::WaveSurface;
    pub use crate::wave::WaveParameters;
}
