//! Fixed-capacity prop pool with per-frame advance and respawn.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Prop, PropGenerator};

/// Move a prop toward the camera along the travel axis
pub fn advance(prop: &mut Prop, delta_s: f32, speed_m_per_s: f32) {
    prop.position.z += speed_m_per_s * delta_s;
}

/// Send a prop that has passed the camera back to the horizon
///
/// Past `despawn_z` the travel-axis coordinate is reset to exactly
/// `respawn_z` (not wrapped, so any overshoot is discarded) and `redraw`
/// re-randomizes the rest. Below the threshold this is a no-op.
///
/// # Returns
/// Whether the prop respawned
pub fn maybe_respawn<F>(prop: &mut Prop, despawn_z: f32, respawn_z: f32, redraw: F) -> bool
where
    F: FnOnce(&mut Prop),
{
    if prop.position.z <= despawn_z {
        return false;
    }
    prop.position.z = respawn_z;
    redraw(prop);
    true
}

/// Fixed-size pool of props recycled through the generator's bounds
pub struct PropPool<G: PropGenerator> {
    props: Vec<Prop>,
    generator: G,
    rng: StdRng,
}

impl<G: PropGenerator> PropPool<G> {
    /// Create `count` props spread uniformly over the pool's travel window
    pub fn new(generator: G, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = generator.bounds();
        let props = (0..count)
            .map(|_| {
                let z = rng.gen_range(bounds.respawn_z..=bounds.despawn_z);
                generator.spawn(&mut rng, z)
            })
            .collect();

        Self {
            props,
            generator,
            rng,
        }
    }

    /// Advance every prop by one frame and respawn those that left the view
    ///
    /// # Returns
    /// Number of props respawned this frame
    pub fn tick(&mut self, delta_s: f32) -> usize {
        let bounds = self.generator.bounds();
        let generator = &self.generator;

        let mut respawned = 0;
        for prop in &mut self.props {
            advance(prop, delta_s, bounds.speed_m_per_s);
            if maybe_respawn(prop, bounds.despawn_z, bounds.respawn_z, |p| {
                generator.redraw(&mut self.rng, p)
            }) {
                respawned += 1;
            }
        }
        respawned
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
