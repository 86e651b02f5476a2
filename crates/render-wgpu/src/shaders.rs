/// Shared declarations: the per-frame `Scene` uniform and Phong lighting.
/// Prepended to every shader that lights geometry.
pub const SCENE_WGSL: &str = r#"
struct PointLight {
    position: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    attenuation: vec4<f32>,
};

struct Scene {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    dir_direction: vec4<f32>,
    dir_ambient: vec4<f32>,
    dir_diffuse: vec4<f32>,
    dir_specular: vec4<f32>,
    points: array<PointLight, 4>,
    spot_position: vec4<f32>,
    spot_direction: vec4<f32>,
    spot_diffuse: vec4<f32>,
    spot_specular: vec4<f32>,
    spot_params: vec4<f32>,
    spot_cone: vec4<f32>,
    sky_zenith: vec4<f32>,
    sky_horizon: vec4<f32>,
    field_wave: vec4<f32>,
    field_shape: vec4<f32>,
    field_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: Scene;

const SHININESS: f32 = 32.0;

fn phong(light_dir: vec3<f32>, n: vec3<f32>, view_dir: vec3<f32>, base: vec3<f32>,
         ambient: vec3<f32>, diffuse: vec3<f32>, specular: vec3<f32>) -> vec3<f32> {
    let diff = max(dot(n, light_dir), 0.0);
    let reflect_dir = reflect(-light_dir, n);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), SHININESS);
    return ambient * base + diffuse * diff * base + specular * spec * 0.5;
}

fn attenuate(att: vec4<f32>, distance: f32) -> f32 {
    return 1.0 / (att.x + att.y * distance + att.z * distance * distance);
}

fn shade(base: vec3<f32>, normal: vec3<f32>, world_pos: vec3<f32>) -> vec3<f32> {
    let n = normalize(normal);
    let view_dir = normalize(scene.eye.xyz - world_pos);

    var color = phong(normalize(-scene.dir_direction.xyz), n, view_dir, base,
        scene.dir_ambient.rgb, scene.dir_diffuse.rgb, scene.dir_specular.rgb);

    for (var i = 0u; i < 4u; i = i + 1u) {
        let light = scene.points[i];
        let to_light = light.position.xyz - world_pos;
        let a = attenuate(light.attenuation, length(to_light));
        color += a * phong(normalize(to_light), n, view_dir, base,
            light.ambient.rgb, light.diffuse.rgb, light.specular.rgb);
    }

    if (scene.spot_params.w > 0.5) {
        let to_light = scene.spot_position.xyz - world_pos;
        let light_dir = normalize(to_light);
        let theta = dot(light_dir, normalize(-scene.spot_direction.xyz));
        let epsilon = scene.spot_cone.x - scene.spot_cone.y;
        let intensity = clamp((theta - scene.spot_cone.y) / epsilon, 0.0, 1.0);
        let a = attenuate(scene.spot_params, length(to_light));
        color += a * intensity * phong(light_dir, n, view_dir, base,
            vec3<f32>(0.0), scene.spot_diffuse.rgb, scene.spot_specular.rgb);
    }
    return color;
}
"#;

/// Lit unit cubes with a per-instance model matrix and colour.
pub const CUBE_WGSL: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = scene.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if (in.color.a > 0.5) {
        return vec4<f32>(in.color.rgb, 1.0);
    }
    return vec4<f32>(shade(in.color.rgb, in.world_normal, in.world_pos), 1.0);
}
"#;

/// Instanced wave field. `field_height` must stay in step with
/// `FieldWave::height` on the CPU.
pub const FIELD_WGSL: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

fn field_height(inst: vec4<f32>) -> f32 {
    let time = scene.field_wave.x;
    let primary = sin(inst.x * scene.field_wave.z + time + inst.z);
    let secondary = cos(inst.y * scene.field_wave.w - time * 1.3);
    let ripple = sin(inst.w * scene.field_shape.x * 4.0 - time * 2.0);
    let unit = clamp((primary + secondary + ripple) / 3.0 * 0.5 + 0.5, 0.0, 1.0);
    return scene.field_wave.y * pow(unit, scene.field_shape.y);
}

@vertex
fn vs_field(vertex: VertexInput, @location(2) inst: vec4<f32>) -> VertexOutput {
    let footprint = scene.field_shape.z;
    let height = footprint + field_height(inst);
    let world_pos = vec3<f32>(
        inst.x + vertex.position.x * footprint,
        (vertex.position.y + 0.5) * height,
        inst.y + vertex.position.z * footprint,
    );

    var out: VertexOutput;
    out.clip_position = scene.view_proj * vec4<f32>(world_pos, 1.0);
    out.world_pos = world_pos;
    out.world_normal = vertex.normal;
    return out;
}

@fragment
fn fs_field(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(shade(scene.field_color.rgb, in.world_normal, in.world_pos), 1.0);
}
"#;

/// Unlit line grid.
pub const GRID_WGSL: &str = r#"
struct GridVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct GridOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_grid(vertex: GridVertex) -> GridOutput {
    var out: GridOutput;
    out.clip_position = scene.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_grid(in: GridOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Full-screen gradient sky, drawn first with depth writes off.
pub const SKY_WGSL: &str = r#"
struct SkyOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_sky(@builtin(vertex_index) index: u32) -> SkyOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    let ndc = uv * 2.0 - 1.0;
    var out: SkyOutput;
    out.clip_position = vec4<f32>(ndc, 1.0, 1.0);
    out.ndc = ndc;
    return out;
}

@fragment
fn fs_sky(in: SkyOutput) -> @location(0) vec4<f32> {
    let far = scene.inv_view_proj * vec4<f32>(in.ndc, 1.0, 1.0);
    let dir = normalize(far.xyz / far.w - scene.eye.xyz);
    let t = clamp(dir.y * 1.5, 0.0, 1.0);
    let color = mix(scene.sky_horizon.rgb, scene.sky_zenith.rgb, t);
    return vec4<f32>(color, 1.0);
}
"#;

/// Full WGSL source for a pipeline: shared scene declarations plus `body`.
pub fn with_scene(body: &str) -> String {
    format!("{SCENE_WGSL}\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_body_uses_the_shared_scene() {
        for body in [CUBE_WGSL, FIELD_WGSL, GRID_WGSL, SKY_WGSL] {
            assert!(body.contains("scene."));
            assert!(!body.contains("struct Scene"));
            assert!(with_scene(body).contains("struct Scene"));
        }
    }

    #[test]
    fn scene_struct_lists_uniform_fields_in_order() {
        let fields = [
            "view_proj", "inv_view_proj", "eye", "dir_direction", "dir_ambient", "dir_diffuse",
            "dir_specular", "points", "spot_position", "spot_direction", "spot_diffuse",
            "spot_specular", "spot_params", "spot_cone", "sky_zenith", "sky_horizon",
            "field_wave", "field_shape", "field_color",
        ];
        let start = SCENE_WGSL.find("struct Scene").unwrap_or(0);
        let mut cursor = start;
        for field in fields {
            let needle = format!("{field}:");
            let found = SCENE_WGSL[cursor..].find(&needle);
            assert!(found.is_some(), "{field} missing or out of order");
            cursor += found.unwrap_or(0);
        }
    }
}
