//! Horizon fade: hides pop-in of props respawning at the far edge.

/// Hermite smoothstep, clamped to [0, 1]
///
/// When `edge1 <= edge0` the curve degenerates to a hard step at `edge1`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Travel-axis band a building fades in over
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeBand {
    /// Fully transparent at or beyond (further than) this coordinate
    pub fade_z: f32,

    /// Fully opaque at or nearer than this coordinate
    pub visible_z: f32,
}

impl FadeBand {
    pub fn opacity(&self, z: f32) -> f32 {
        smoothstep(self.fade_z, self.visible_z, z)
    }
}
