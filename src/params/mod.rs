//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Physical units (meters, seconds, Hz, etc.)
//! - Documented ranges and meanings
//! - `validate()` where a bad value would break an invariant

mod audio;
mod camera;
mod city;
mod render;
mod spectrum;
mod terrain;

// Re-export all types
pub use audio::{audio_constants, AnalyzerConfig, SPECTRUM_BINS};
pub use camera::{FlightPath, SmoothingMode, SineTerm};
pub use city::{BuildingLayout, PoolBounds, StreakLayout};
pub use render::{ClockConfig, RenderConfig};
pub use spectrum::SpectrumRing;
pub use terrain::TerrainShape;

/// Accent color A (hot pink, linear RGB)
pub const ACCENT_PINK: [f32; 3] = [1.0, 0.08, 0.58];

/// Accent color B (electric cyan, linear RGB)
pub const ACCENT_CYAN: [f32; 3] = [0.0, 0.9, 1.0];
