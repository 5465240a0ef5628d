//! Per-frame simulation state: camera, prop pools, terrain and spectrum ring.
//!
//! Everything here is CPU-only and deterministic for a given seed and
//! sequence of frame times, so the whole loop runs headless in tests.

use crate::audio::{AudioFrame, FrequencyAnalyzer};
use crate::camera::{CameraPose, FlightSynthesizer};
use crate::city::{BuildingGenerator, PropPool, StreakGenerator};
use crate::clock::FrameTime;
use crate::error::ConfigError;
use crate::params::{BuildingLayout, FlightPath, SpectrumRing, StreakLayout, TerrainShape};
use crate::spectrum::SpectrumMapper;
use crate::terrain::TerrainPatch;

/// Everything needed to build a [`Simulation`]
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub flight: FlightPath,
    pub buildings: BuildingLayout,
    pub streaks: StreakLayout,
    pub terrain: TerrainShape,
    pub ring: SpectrumRing,

    /// Seed for prop placement (streaks use a derived seed)
    pub seed: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.flight.validate()?;
        self.buildings.validate()?;
        self.streaks.validate()?;
        self.terrain.validate()?;
        self.ring.validate()
    }
}

/// Counters from one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    pub buildings_respawned: usize,
    pub streaks_respawned: usize,
}

/// The five per-frame components, advanced in a fixed order
pub struct Simulation {
    camera: FlightSynthesizer,
    buildings: PropPool<BuildingGenerator>,
    streaks: PropPool<StreakGenerator>,
    terrain: TerrainPatch,
    analyzer: FrequencyAnalyzer,
    spectrum: SpectrumMapper,

    /// Frame the spectrum ring was last built from
    audio_frame: AudioFrame,

    time: FrameTime,
}

impl Simulation {
    pub fn new(config: SimulationConfig, analyzer: FrequencyAnalyzer) -> Result<Self, ConfigError> {
        config.validate()?;

        let building_count = config.buildings.count;
        let streak_count = config.streaks.count;
        let buildings = PropPool::new(
            BuildingGenerator::new(config.buildings),
            building_count,
            config.seed,
        );
        let streaks = PropPool::new(
            StreakGenerator::new(config.streaks),
            streak_count,
            config.seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        );

        log::debug!(
            "Simulation: {} buildings, {} streaks, seed {}",
            building_count,
            streak_count,
            config.seed
        );

        Ok(Self {
            camera: FlightSynthesizer::new(config.flight),
            buildings,
            streaks,
            terrain: TerrainPatch::new(config.terrain),
            analyzer,
            spectrum: SpectrumMapper::new(config.ring),
            audio_frame: AudioFrame::default(),
            time: FrameTime::default(),
        })
    }

    /// Advance every component by one rendered frame
    ///
    /// Order: camera, pools, terrain, analyzer, spectrum ring.
    pub fn tick(&mut self, time: FrameTime) -> TickStats {
        self.time = time;

        self.camera.update(time);

        let stats = TickStats {
            buildings_respawned: self.buildings.tick(time.delta_s),
            streaks_respawned: self.streaks.tick(time.delta_s),
        };
        if stats != TickStats::default() {
            log::trace!(
                "Respawned {} buildings, {} streaks",
                stats.buildings_respawned,
                stats.streaks_respawned
            );
        }

        self.terrain.update(time.elapsed_s);

        self.audio_frame = self.analyzer.current_frame();
        self.spectrum.update(&self.audio_frame);

        stats
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn camera(&self) -> &FlightSynthesizer {
        &self.camera
    }

    pub fn buildings(&self) -> &PropPool<BuildingGenerator> {
        &self.buildings
    }

    pub fn streaks(&self) -> &PropPool<StreakGenerator> {
        &self.streaks
    }

    pub fn terrain(&self) -> &TerrainPatch {
        &self.terrain
    }

    pub fn spectrum(&self) -> &SpectrumMapper {
        &self.spectrum
    }

    pub fn audio_frame(&self) -> AudioFrame {
        self.audio_frame
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SPECTRUM_BINS;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_pool_sizes_match_config() {
        let config = SimulationConfig::default();
        let sim = Simulation::new(config.clone(), FrequencyAnalyzer::unavailable()).unwrap();
        assert_eq!(sim.buildings().len(), config.buildings.count);
        assert_eq!(sim.streaks().len(), config.streaks.count);
        assert_eq!(sim.spectrum().bars().len(), SPECTRUM_BINS);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.buildings.bounds.respawn_z = 50.0;
        assert!(Simulation::new(config, FrequencyAnalyzer::unavailable()).is_err());
    }

    #[test]
    fn test_negative_ring_depth_is_rejected() {
        let mut config = SimulationConfig::default();
        config.ring.depth_m = -1.0;
        assert!(matches!(
            Simulation::new(config, FrequencyAnalyzer::unavailable()),
            Err(ConfigError::NotPositive("depth_m"))
        ));
    }

    #[test]
    fn test_tick_reads_latest_audio() {
        let shared = Arc::new(Mutex::new(AudioFrame::default()));
        let mut sim = Simulation::new(
            SimulationConfig::default(),
            FrequencyAnalyzer::new(Arc::clone(&shared)),
        )
        .unwrap();

        let idle_length = sim.spectrum().bars()[0].scale.y;
        *shared.lock().unwrap() = AudioFrame::new([255; SPECTRUM_BINS]);
        sim.tick(FrameTime::fixed_rate(1, 60.0));

        assert_eq!(sim.audio_frame().bins()[0], 255);
        assert!(sim.spectrum().bars()[0].scale.y > idle_length);
    }

    #[test]
    fn test_terrain_follows_elapsed_time() {
        let mut sim =
            Simulation::new(SimulationConfig::default(), FrequencyAnalyzer::unavailable()).unwrap();
        let before = sim.terrain().vertices.clone();
        sim.tick(FrameTime::new(2.0, 0.016, 0.1));
        assert_ne!(before, sim.terrain().vertices);
        assert_eq!(sim.time().elapsed_s, 2.0);
    }
}
