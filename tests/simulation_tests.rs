// End-to-end checks of the headless simulation loop: no GPU or audio device.

use std::sync::{Arc, Mutex};

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use synthflight::audio::{AudioFrame, FrequencyAnalyzer};
use synthflight::city::{maybe_respawn, BuildingGenerator, PropGenerator};
use synthflight::clock::FrameTime;
use synthflight::params::{BuildingLayout, SPECTRUM_BINS};
use synthflight::simulation::{Simulation, SimulationConfig};

fn simulation(seed: u64) -> Simulation {
    let config = SimulationConfig {
        seed,
        ..SimulationConfig::default()
    };
    Simulation::new(config, FrequencyAnalyzer::unavailable()).unwrap()
}

fn assert_props_in_bounds(sim: &Simulation) {
    let bounds = sim.buildings().generator().bounds();
    for prop in sim.buildings().props() {
        assert!(bounds.contains(prop.position.z), "building at {}", prop.position.z);
    }
    let bounds = sim.streaks().generator().bounds();
    for prop in sim.streaks().props() {
        assert!(bounds.contains(prop.position.z), "streak at {}", prop.position.z);
    }
}

#[test]
fn prop_just_past_despawn_lands_exactly_on_respawn() {
    let layout = BuildingLayout::default();
    let generator = BuildingGenerator::new(layout.clone());
    let mut rng = StdRng::seed_from_u64(3);

    let mut prop = generator.spawn(&mut rng, layout.bounds.despawn_z + 0.001);
    let respawned = maybe_respawn(
        &mut prop,
        layout.bounds.despawn_z,
        layout.bounds.respawn_z,
        |p| generator.redraw(&mut rng, p),
    );

    assert!(respawned);
    assert_eq!(prop.position.z, layout.bounds.respawn_z);
    // Respawned outside the road
    let near_edge = prop.position.x.abs() - prop.extents.x / 2.0;
    assert!(near_edge >= layout.road_half_width_m - 1e-4);
}

#[test]
fn first_tick_holds_initial_pose() {
    let config = SimulationConfig::default();
    let mut sim = Simulation::new(config.clone(), FrequencyAnalyzer::unavailable()).unwrap();
    sim.tick(FrameTime::default());

    let pose = sim.pose();
    assert_eq!(pose.position, Vec3::from_array(config.flight.initial_position));
    assert_eq!(pose.roll_rad, 0.0);
}

#[test]
fn silent_audio_gives_idle_ring() {
    let config = SimulationConfig::default();
    let mut sim = Simulation::new(config.clone(), FrequencyAnalyzer::unavailable()).unwrap();
    for frame in 0..10 {
        sim.tick(FrameTime::fixed_rate(frame, 60.0));
    }

    let bars = sim.spectrum().bars();
    assert_eq!(bars.len(), SPECTRUM_BINS);
    for bar in bars {
        assert_eq!(bar.scale.y, config.ring.min_length_m);
        assert_eq!(bar.color, Vec3::from_array(config.ring.accent_low));
    }
}

#[test]
fn same_seed_same_world() {
    let mut a = simulation(1234);
    let mut b = simulation(1234);
    for frame in 0..600 {
        let time = FrameTime::fixed_rate(frame, 60.0);
        a.tick(time);
        b.tick(time);
    }

    assert_eq!(a.pose(), b.pose());
    assert_eq!(a.buildings().props(), b.buildings().props());
    assert_eq!(a.streaks().props(), b.streaks().props());
    assert_eq!(a.terrain().vertices, b.terrain().vertices);
}

#[test]
fn props_stay_in_bounds_through_stalls() {
    let mut sim = simulation(99);
    let mut elapsed = 0.0;
    for frame in 0..2000u32 {
        // Every 97th frame stalls for far longer than the clock would allow
        let delta = if frame % 97 == 0 { 12.0 } else { 1.0 / 60.0 };
        elapsed += delta;
        sim.tick(FrameTime::new(elapsed, delta, f32::MAX));
        assert_props_in_bounds(&sim);
    }
}

#[test]
fn pools_keep_their_size() {
    let config = SimulationConfig::default();
    let mut sim = Simulation::new(config.clone(), FrequencyAnalyzer::unavailable()).unwrap();
    let mut respawns = 0;
    for frame in 0..3600 {
        respawns += sim.tick(FrameTime::fixed_rate(frame, 60.0)).buildings_respawned;
    }
    assert!(respawns > 0, "a minute of travel recycles buildings");
    assert_eq!(sim.buildings().len(), config.buildings.count);
    assert_eq!(sim.streaks().len(), config.streaks.count);
}

#[test]
fn ring_follows_published_frames() {
    let shared = Arc::new(Mutex::new(AudioFrame::default()));
    let mut sim = Simulation::new(
        SimulationConfig::default(),
        FrequencyAnalyzer::new(Arc::clone(&shared)),
    )
    .unwrap();

    let mut bins = [0u8; SPECTRUM_BINS];
    bins[2] = 255;
    *shared.lock().unwrap() = AudioFrame::new(bins);
    sim.tick(FrameTime::fixed_rate(1, 60.0));

    let bars = sim.spectrum().bars();
    assert!(bars[2].scale.y > bars[3].scale.y);

    // Audio stops: the ring returns to idle on the next frame
    *shared.lock().unwrap() = AudioFrame::default();
    sim.tick(FrameTime::fixed_rate(2, 60.0));
    let bars = sim.spectrum().bars();
    assert_eq!(bars[2].scale.y, bars[3].scale.y);
}
