//! Seeded random draws for building and streak placement.
//!
//! Buildings redraw their lateral position and footprint on every respawn;
//! height, accent and fade band are fixed when the building is created.
//! Streaks redraw only their lateral position.

use glam::Vec3;
use rand::Rng;

use super::{Accent, FadeBand, Prop};
use crate::params::{BuildingLayout, PoolBounds, StreakLayout};

/// Lateral coordinate left or right of the road, uniformly at random
///
/// The prop's near edge lands between `road_half_width` and
/// `road_half_width + spread` from the centerline.
pub fn lateral_offset<R: Rng>(
    rng: &mut R,
    road_half_width: f32,
    half_extent: f32,
    spread: f32,
) -> f32 {
    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    side * (road_half_width + half_extent + rng.gen_range(0.0..=spread.max(0.0)))
}

fn random_accent<R: Rng>(rng: &mut R) -> Accent {
    if rng.gen_bool(0.5) {
        Accent::Pink
    } else {
        Accent::Cyan
    }
}

fn draw_span<R: Rng>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    rng.gen_range(min..=max)
}

/// Creates props for one pool and redraws them on respawn
pub trait PropGenerator {
    /// Travel-axis window of this pool
    fn bounds(&self) -> PoolBounds;

    /// Create a fresh prop at travel-axis coordinate `z`
    fn spawn<R: Rng>(&self, rng: &mut R, z: f32) -> Prop;

    /// Redraw the per-respawn attributes (never touches `position.z`)
    fn redraw<R: Rng>(&self, rng: &mut R, prop: &mut Prop);
}

/// Buildings lining both sides of the road
#[derive(Debug, Clone)]
pub struct BuildingGenerator {
    layout: BuildingLayout,
}

impl BuildingGenerator {
    pub fn new(layout: BuildingLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &BuildingLayout {
        &self.layout
    }

    fn fade_band(&self) -> FadeBand {
        let fade_z = self.layout.bounds.respawn_z + self.layout.fade_margin_m;
        FadeBand {
            fade_z,
            visible_z: fade_z + self.layout.fade_length_m,
        }
    }
}

impl PropGenerator for BuildingGenerator {
    fn bounds(&self) -> PoolBounds {
        self.layout.bounds
    }

    fn spawn<R: Rng>(&self, rng: &mut R, z: f32) -> Prop {
        let height = draw_span(rng, self.layout.height_range_m);
        let mut prop = Prop {
            position: Vec3::new(0.0, height / 2.0, z),
            extents: Vec3::new(0.0, height, 0.0),
            accent: random_accent(rng),
            fade: Some(self.fade_band()),
        };
        self.redraw(rng, &mut prop);
        prop
    }

    fn redraw<R: Rng>(&self, rng: &mut R, prop: &mut Prop) {
        let width = draw_span(rng, self.layout.width_range_m);
        let depth = draw_span(rng, self.layout.depth_range_m);
        prop.extents.x = width;
        prop.extents.z = depth;
        prop.position.x = lateral_offset(
            rng,
            self.layout.road_half_width_m,
            width / 2.0,
            self.layout.lateral_spread_m,
        );
    }
}

/// Thin light trails rushing past the camera
#[derive(Debug, Clone)]
pub struct StreakGenerator {
    layout: StreakLayout,
}

impl StreakGenerator {
    pub fn new(layout: StreakLayout) -> Self {
        Self { layout }
    }
}

impl PropGenerator for StreakGenerator {
    fn bounds(&self) -> PoolBounds {
        self.layout.bounds
    }

    fn spawn<R: Rng>(&self, rng: &mut R, z: f32) -> Prop {
        let thickness = self.layout.thickness_m;
        let mut prop = Prop {
            position: Vec3::new(0.0, draw_span(rng, self.layout.height_range_m), z),
            extents: Vec3::new(thickness, thickness, self.layout.length_m),
            accent: random_accent(rng),
            fade: None,
        };
        self.redraw(rng, &mut prop);
        prop
    }

    fn redraw<R: Rng>(&self, rng: &mut R, prop: &mut Prop) {
        prop.position.x = lateral_offset(
            rng,
            self.layout.road_half_width_m,
            0.0,
            self.layout.lateral_spread_m,
        );
    }
}
