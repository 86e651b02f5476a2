use glam::{Mat4, Vec3};
use serde::Serialize;
use showroom_kernel::FieldWave;
use showroom_kernel::lights::{DirectionalLight, MAX_POINT_LIGHTS, PointLight, SpotLight};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl RenderView {
    /// View from `eye` along `forward`.
    pub fn looking(eye: Vec3, forward: Vec3, fov_degrees: f32, far: f32) -> Self {
        Self {
            eye,
            target: eye + forward,
            fov_degrees,
            near: 0.1,
            far,
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }
}

/// What a cube draw represents. Renderers may style by kind; the debug
/// renderer counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawKind {
    Vehicle,
    Platform,
    Wall,
    Player,
    Projectile,
    Target,
    LightMarker,
}

impl DrawKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawKind::Vehicle => "vehicle",
            DrawKind::Platform => "platform",
            DrawKind::Wall => "wall",
            DrawKind::Player => "player",
            DrawKind::Projectile => "projectile",
            DrawKind::Target => "target",
            DrawKind::LightMarker => "light_marker",
        }
    }

    /// Unlit kinds are drawn with their flat colour.
    pub fn is_emissive(&self) -> bool {
        matches!(self, DrawKind::LightMarker | DrawKind::Projectile)
    }
}

/// One unit cube transformed by `model`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawItem {
    pub kind: DrawKind,
    pub model: Mat4,
    pub color: Vec3,
}

impl DrawItem {
    pub fn new(kind: DrawKind, model: Mat4, color: Vec3) -> Self {
        Self { kind, model, color }
    }

    pub fn position(&self) -> Vec3 {
        self.model.w_axis.truncate()
    }
}

/// Instanced cube field animated on the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDraw {
    pub grid: u32,
    pub spacing: f32,
    pub base_scale: f32,
    pub wave: FieldWave,
    /// Already scaled by `wave.speed`.
    pub time: f32,
    pub color: Vec3,
}

impl FieldDraw {
    pub fn instance_count(&self) -> u32 {
        self.grid * self.grid
    }
}

/// Flat line grid on a horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroundGrid {
    pub height: f32,
    pub extent: f32,
    pub spacing: f32,
    pub color: Vec3,
}

/// Procedural gradient sky.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sky {
    pub zenith: Vec3,
    pub horizon: Vec3,
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            zenith: Vec3::new(0.18, 0.36, 0.72),
            horizon: Vec3::new(0.75, 0.82, 0.9),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lighting {
    pub directional: DirectionalLight,
    /// At most [`MAX_POINT_LIGHTS`]; extra entries are ignored.
    pub points: Vec<PointLight>,
    pub spot: Option<SpotLight>,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            directional: DirectionalLight::default(),
            points: Vec::new(),
            spot: None,
        }
    }
}

impl Lighting {
    /// Point lights padded with disabled slots to exactly `MAX_POINT_LIGHTS`.
    pub fn point_slots(&self) -> [PointLight; MAX_POINT_LIGHTS] {
        std::array::from_fn(|i| self.points.get(i).copied().unwrap_or_else(PointLight::disabled))
    }
}

/// Everything a renderer needs for one frame. Built from simulation state,
/// never written back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub view: RenderView,
    pub clear_color: Vec3,
    pub sky: Option<Sky>,
    pub items: Vec<DrawItem>,
    pub field: Option<FieldDraw>,
    pub grid: Option<GroundGrid>,
    pub lighting: Lighting,
}

impl Frame {
    pub fn new(view: RenderView, clear_color: Vec3) -> Self {
        Self {
            view,
            clear_color,
            sky: None,
            items: Vec::new(),
            field: None,
            grid: None,
            lighting: Lighting::default(),
        }
    }

    pub fn push(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    pub fn count(&self, kind: DrawKind) -> usize {
        self.items.iter().filter(|i| i.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 45.0);
        assert_eq!(view.target, Vec3::ZERO);
    }

    #[test]
    fn looking_sets_target_along_forward() {
        let view = RenderView::looking(Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_Z, 30.0, 50.0);
        assert_eq!(view.target, Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(view.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn view_projection_puts_target_in_front() {
        let view = RenderView::looking(Vec3::ZERO, Vec3::NEG_Z, 45.0, 100.0);
        let clip = view.view_projection(16.0 / 9.0) * glam::Vec4::new(0.0, 0.0, -5.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn point_slots_pad_with_disabled_lights() {
        let lighting = Lighting::default();
        let slots = lighting.point_slots();
        assert!(slots.iter().all(|l| l.is_dark()));
    }

    #[test]
    fn draw_item_position_is_translation() {
        let item = DrawItem::new(
            DrawKind::Target,
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::X,
        );
        assert_eq!(item.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
