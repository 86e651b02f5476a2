//! CPU-side layouts of everything uploaded to the GPU.
//!
//! Every struct here is `Pod` and made only of `vec4`-sized fields so the
//! Rust and WGSL layouts agree without implicit padding.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use showroom_kernel::lights::{FieldInstance, MAX_POINT_LIGHTS, PointLight};
use showroom_render::{DrawItem, Frame};

fn v4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, unused
    pub attenuation: [f32; 4],
}

impl From<&PointLight> for PointLightRaw {
    fn from(light: &PointLight) -> Self {
        Self {
            position: v4(light.position, 1.0),
            ambient: v4(light.ambient, 0.0),
            diffuse: v4(light.diffuse, 0.0),
            specular: v4(light.specular, 0.0),
            attenuation: [light.constant, light.linear, light.quadratic, 0.0],
        }
    }
}

/// Per-frame uniforms shared by every pipeline. Mirrors `struct Scene` in
/// the WGSL sources.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub dir_direction: [f32; 4],
    pub dir_ambient: [f32; 4],
    pub dir_diffuse: [f32; 4],
    pub dir_specular: [f32; 4],
    pub points: [PointLightRaw; MAX_POINT_LIGHTS],
    pub spot_position: [f32; 4],
    pub spot_direction: [f32; 4],
    pub spot_diffuse: [f32; 4],
    pub spot_specular: [f32; 4],
    /// constant, linear, quadratic, enabled (0 or 1)
    pub spot_params: [f32; 4],
    /// cos inner, cos outer, unused, unused
    pub spot_cone: [f32; 4],
    pub sky_zenith: [f32; 4],
    pub sky_horizon: [f32; 4],
    /// time, amplitude, primary freq, secondary freq
    pub field_wave: [f32; 4],
    /// ripple freq, height exponent, footprint, unused
    pub field_shape: [f32; 4],
    pub field_color: [f32; 4],
}

impl SceneUniforms {
    pub fn from_frame(frame: &Frame, aspect: f32) -> Self {
        let view_proj = frame.view.view_projection(aspect);
        let lighting = &frame.lighting;
        let dir = &lighting.directional;
        let slots = lighting.point_slots();

        let mut out = Self::zeroed();
        out.view_proj = view_proj.to_cols_array_2d();
        out.inv_view_proj = view_proj.inverse().to_cols_array_2d();
        out.eye = v4(frame.view.eye, 1.0);
        out.dir_direction = v4(dir.direction, 0.0);
        out.dir_ambient = v4(dir.ambient, 0.0);
        out.dir_diffuse = v4(dir.diffuse, 0.0);
        out.dir_specular = v4(dir.specular, 0.0);
        out.points = std::array::from_fn(|i| PointLightRaw::from(&slots[i]));

        if let Some(spot) = &lighting.spot {
            out.spot_position = v4(spot.position, 1.0);
            out.spot_direction = v4(spot.direction, 0.0);
            out.spot_diffuse = v4(spot.diffuse, 0.0);
            out.spot_specular = v4(spot.specular, 0.0);
            out.spot_params = [spot.constant, spot.linear, spot.quadratic, 1.0];
            out.spot_cone = [spot.cut_off, spot.outer_cut_off, 0.0, 0.0];
        }

        if let Some(sky) = &frame.sky {
            out.sky_zenith = v4(sky.zenith, 1.0);
            out.sky_horizon = v4(sky.horizon, 1.0);
        }

        if let Some(field) = &frame.field {
            let w = &field.wave;
            out.field_wave = [field.time, w.amplitude, w.primary_freq, w.secondary_freq];
            out.field_shape = [
                w.ripple_freq,
                w.height_exponent,
                field.spacing * field.base_scale,
                0.0,
            ];
            out.field_color = v4(field.color, 1.0);
        }
        out
    }

    pub fn identity() -> Self {
        let mut out = Self::zeroed();
        out.view_proj = Mat4::IDENTITY.to_cols_array_2d();
        out.inv_view_proj = Mat4::IDENTITY.to_cols_array_2d();
        out
    }
}

/// Per-instance data for the lit cube pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeInstance {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    /// rgb, emissive flag in w
    pub color: [f32; 4],
}

impl From<&DrawItem> for CubeInstance {
    fn from(item: &DrawItem) -> Self {
        let cols = item.model.to_cols_array_2d();
        let emissive = if item.kind.is_emissive() { 1.0 } else { 0.0 };
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: v4(item.color, emissive),
        }
    }
}

/// Field instances packed as `vec4(x, z, phase, dist)`.
pub fn pack_field(instances: &[FieldInstance]) -> Vec<[f32; 4]> {
    instances.iter().map(FieldInstance::to_array).collect()
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Unit cube centred on the origin.
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

/// Line-list grid on the plane `y = height`, lines every `spacing` out to
/// `±extent`.
pub fn grid_mesh(height: f32, extent: f32, spacing: f32, color: Vec3) -> Vec<GridVertex> {
    let color = v4(color, 1.0);
    let lines = if spacing > 0.0 {
        (extent / spacing).floor() as i32
    } else {
        0
    };
    let reach = lines as f32 * spacing;
    let mut verts = Vec::with_capacity((2 * lines as usize + 1) * 4);
    for i in -lines..=lines {
        let offset = i as f32 * spacing;
        // Lines along X
        verts.push(GridVertex {
            position: [-reach, height, offset],
            color,
        });
        verts.push(GridVertex {
            position: [reach, height, offset],
            color,
        });
        // Lines along Z
        verts.push(GridVertex {
            position: [offset, height, -reach],
            color,
        });
        verts.push(GridVertex {
            position: [offset, height, reach],
            color,
        });
    }
    verts
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_kernel::{LightingSim, LightingTuning};
    use showroom_render::{DrawKind, RenderView, lighting_frame};

    #[test]
    fn scene_uniforms_are_vec4_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<PointLightRaw>(), 80);
    }

    #[test]
    fn lighting_frame_packs_lights_and_field() {
        let sim = LightingSim::new(LightingTuning::default());
        let frame = lighting_frame(&sim);
        let u = SceneUniforms::from_frame(&frame, 16.0 / 9.0);
        assert_eq!(u.spot_params[3], 1.0);
        assert_eq!(u.points[3].diffuse, [0.0; 4]);
        assert_eq!(u.points[0].attenuation, [1.0, 0.07, 0.017, 0.0]);
        assert!((u.field_shape[2] - 0.13 * 0.85).abs() < 1e-6);
        assert_eq!(u.field_wave[1], 1.6);
    }

    #[test]
    fn no_spot_means_disabled() {
        let frame = Frame::new(RenderView::default(), Vec3::ZERO);
        let u = SceneUniforms::from_frame(&frame, 1.0);
        assert_eq!(u.spot_params[3], 0.0);
    }

    #[test]
    fn projectiles_are_emissive() {
        let item = DrawItem::new(DrawKind::Projectile, Mat4::IDENTITY, Vec3::ONE);
        assert_eq!(CubeInstance::from(&item).color[3], 1.0);
        let item = DrawItem::new(DrawKind::Target, Mat4::IDENTITY, Vec3::ONE);
        assert_eq!(CubeInstance::from(&item).color[3], 0.0);
    }

    #[test]
    fn cube_mesh_counts() {
        let (verts, indices) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
    }

    #[test]
    fn grid_mesh_spans_extent() {
        let verts = grid_mesh(2.0, 500.0, 10.0, Vec3::ONE);
        assert_eq!(verts.len(), 101 * 4);
        assert!(verts.iter().all(|v| v.position[1] == 2.0));
        assert_eq!(verts[0].position[0], -500.0);
    }

    #[test]
    fn grid_mesh_tolerates_zero_spacing() {
        assert_eq!(grid_mesh(0.0, 10.0, 0.0, Vec3::ONE).len(), 4);
    }
}
