//! Procedural city: fixed pools of buildings and speed-streaks recycled
//! toward the horizon to fake infinite forward travel.

mod fade;
mod generator;
mod pool;

// Re-export public types
pub use fade::{smoothstep, FadeBand};
pub use generator::{lateral_offset, BuildingGenerator, PropGenerator, StreakGenerator};
pub use pool::{advance, maybe_respawn, PropPool};

use glam::Vec3;

use crate::params::{ACCENT_CYAN, ACCENT_PINK};

/// One of the two synthwave accent colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Pink,
    Cyan,
}

impl Accent {
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Self::Pink => ACCENT_PINK,
            Self::Cyan => ACCENT_CYAN,
        }
    }
}

/// A recyclable world-space prop (building or speed-streak)
#[derive(Clone, Debug, PartialEq)]
pub struct Prop {
    /// Box center (meters); `z` is the travel-axis coordinate
    pub position: Vec3,

    /// Full box size: width (x), height (y), depth or streak length (z)
    pub extents: Vec3,

    pub accent: Accent,

    /// Horizon fade band; `None` for props that never fade (streaks)
    pub fade: Option<FadeBand>,
}

impl Prop {
    /// Rendered opacity at the current travel-axis coordinate
    pub fn opacity(&self) -> f32 {
        self.fade.map_or(1.0, |band| band.opacity(self.position.z))
    }
}
