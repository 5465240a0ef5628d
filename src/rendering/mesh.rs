//! GPU-side data layouts: the shared unit box and per-instance transforms.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::city::Prop;
use crate::simulation::Simulation;
use crate::spectrum::BarInstance;
use crate::terrain::Vertex;

/// Per-instance data for the box pipeline (model matrix columns + RGBA)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Building or streak: axis-aligned box, alpha = horizon fade
    pub fn from_prop(prop: &Prop) -> Self {
        let model = Mat4::from_translation(prop.position) * Mat4::from_scale(prop.extents);
        let [r, g, b] = prop.accent.rgb();
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, prop.opacity()],
        }
    }

    pub fn from_bar(bar: &BarInstance) -> Self {
        Self {
            model: bar.model_matrix().to_cols_array_2d(),
            color: bar.color.extend(1.0).to_array(),
        }
    }
}

/// Instances for one frame, grouped by kind
#[derive(Debug, Default)]
pub struct SceneInstances {
    pub raw: Vec<InstanceRaw>,
    pub buildings: Range<u32>,
    pub streaks: Range<u32>,
    pub bars: Range<u32>,
}

impl SceneInstances {
    /// Pack every prop and spectrum bar into one contiguous instance list
    pub fn collect(sim: &Simulation) -> Self {
        let mut raw = Vec::with_capacity(
            sim.buildings().len() + sim.streaks().len() + sim.spectrum().bars().len(),
        );

        let buildings = append(
            &mut raw,
            sim.buildings().props().iter().map(InstanceRaw::from_prop),
        );
        let streaks = append(&mut raw, sim.streaks().props().iter().map(InstanceRaw::from_prop));
        let bars = append(&mut raw, sim.spectrum().bars().iter().map(InstanceRaw::from_bar));

        Self {
            raw,
            buildings,
            streaks,
            bars,
        }
    }
}

impl SceneInstances {
    /// Per-kind draw ranges, cut off at `limit` uploaded instances
    ///
    /// Opaque streaks and bars come first; buildings fading in at the
    /// horizon blend over them last.
    pub fn draw_ranges(&self, limit: u32) -> [Range<u32>; 3] {
        let clip = |range: &Range<u32>| range.start.min(limit)..range.end.min(limit);
        [clip(&self.streaks), clip(&self.bars), clip(&self.buildings)]
    }
}

fn append(
    raw: &mut Vec<InstanceRaw>,
    instances: impl IntoIterator<Item = InstanceRaw>,
) -> Range<u32> {
    let start = raw.len() as u32;
    raw.extend(instances);
    start..raw.len() as u32
}

/// Unit cube centered on the origin: 4 vertices per face, UVs per face
///
/// Faces wind counter-clockwise seen from outside.
pub fn unit_box() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, u axis, v axis) with u × v = normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u_axis, v_axis) in faces {
        let base = vertices.len() as u16;
        for (su, sv) in corners {
            let position = 0.5 * (normal + u_axis * su + v_axis * sv);
            vertices.push(Vertex {
                position: position.to_array(),
                uv: [(su + 1.0) * 0.5, (sv + 1.0) * 0.5],
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}
