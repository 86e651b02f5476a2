//! Per-demo frame builders. Each reads simulation state and produces a
//! [`Frame`]; none of them mutate anything.

use crate::frame::{DrawItem, DrawKind, FieldDraw, Frame, GroundGrid, Lighting, RenderView, Sky};
use glam::{Mat4, Vec3};
use showroom_common::Transform;
use showroom_kernel::lights::DirectionalLight;
use showroom_kernel::{CombatSim, DrivingSim, LightingSim};

pub const VEHICLE_SIZE: Vec3 = Vec3::new(2.0, 1.2, 4.0);
pub const VEHICLE_COLOR: Vec3 = Vec3::new(0.8, 0.1, 0.1);
pub const PLAYER_SIZE: Vec3 = Vec3::new(0.4, 1.6, 0.4);
pub const PLAYER_COLOR: Vec3 = Vec3::new(0.2, 0.45, 0.8);
pub const PROJECTILE_SIZE: f32 = 0.06;
pub const PROJECTILE_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const TARGET_SIZE: Vec3 = Vec3::new(0.3, 1.5, 0.3);
pub const TARGET_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const LIGHT_MARKER_SIZE: f32 = 0.2;

const DRIVING_FAR: f32 = 1000.0;
const COMBAT_FAR: f32 = 100.0;
const LIGHTING_FAR: f32 = 120.0;

/// Bright overhead sun for the outdoor scenes.
pub fn daylight() -> DirectionalLight {
    DirectionalLight {
        direction: Vec3::new(-0.3, -1.0, -0.4),
        ambient: Vec3::splat(0.3),
        diffuse: Vec3::splat(0.7),
        specular: Vec3::splat(0.2),
    }
}

fn lit_by_day(frame: &mut Frame) {
    frame.lighting = Lighting {
        directional: daylight(),
        points: Vec::new(),
        spot: None,
    };
}

fn cube(kind: DrawKind, center: Vec3, size: Vec3, heading: f32, color: Vec3) -> DrawItem {
    let model = Transform::from_position(center)
        .with_heading(heading)
        .with_scale(size)
        .matrix();
    DrawItem::new(kind, model, color)
}

/// Vehicle on a ground grid under an open sky.
pub fn driving_frame(sim: &DrivingSim) -> Frame {
    let camera = sim.camera();
    let vehicle = sim.vehicle();
    let view = RenderView::looking(camera.position, camera.forward, sim.zoom().fov, DRIVING_FAR);

    let mut frame = Frame::new(view, Vec3::new(0.1, 0.1, 0.1));
    frame.sky = Some(Sky::default());
    lit_by_day(&mut frame);
    frame.grid = Some(GroundGrid {
        height: vehicle.position.y,
        extent: sim.tuning().bound,
        spacing: 10.0,
        color: Vec3::new(0.35, 0.4, 0.35),
    });
    let center = vehicle.position + Vec3::Y * (VEHICLE_SIZE.y / 2.0);
    frame.push(cube(
        DrawKind::Vehicle,
        center,
        VEHICLE_SIZE,
        vehicle.heading,
        VEHICLE_COLOR,
    ));
    frame
}

/// Arena platform and walls, the player, projectiles and targets.
pub fn combat_frame(sim: &CombatSim) -> Frame {
    let camera = sim.camera();
    let view = RenderView::looking(camera.position, camera.forward, sim.zoom().fov, COMBAT_FAR);
    let mut frame = Frame::new(view, Vec3::splat(0.05));
    lit_by_day(&mut frame);

    frame.push(DrawItem::new(
        DrawKind::Platform,
        Mat4::from_scale(Vec3::new(10.0, 0.2, 10.0)),
        Vec3::splat(0.4),
    ));
    let wall = Vec3::splat(0.2);
    let walls = [
        (Vec3::new(0.0, 1.0, -5.0), Vec3::new(10.0, 2.0, 0.2)),
        (Vec3::new(0.0, 1.0, 5.0), Vec3::new(10.0, 2.0, 0.2)),
        (Vec3::new(-5.0, 1.0, 0.0), Vec3::new(0.2, 2.0, 10.0)),
        (Vec3::new(5.0, 1.0, 0.0), Vec3::new(0.2, 2.0, 10.0)),
    ];
    for (center, size) in walls {
        frame.push(cube(DrawKind::Wall, center, size, 0.0, wall));
    }

    let player = sim.player();
    frame.push(cube(
        DrawKind::Player,
        player.position + Vec3::Y * (PLAYER_SIZE.y / 2.0),
        PLAYER_SIZE,
        player.yaw + 180.0,
        PLAYER_COLOR,
    ));

    let world = sim.world();
    for p in world.projectiles() {
        frame.push(cube(
            DrawKind::Projectile,
            p.position,
            Vec3::splat(PROJECTILE_SIZE),
            0.0,
            PROJECTILE_COLOR,
        ));
    }
    let lift = world.tuning().target_center_height;
    for t in world.targets() {
        frame.push(cube(
            DrawKind::Target,
            t.center(lift),
            TARGET_SIZE,
            0.0,
            TARGET_COLOR,
        ));
    }
    tracing::trace!(items = frame.items.len(), "combat frame built");
    frame
}

/// Instanced field lit by the orbiting lights and a camera spotlight.
pub fn lighting_frame(sim: &LightingSim) -> Frame {
    let camera = sim.camera();
    let view = RenderView::looking(camera.position, camera.forward(), sim.zoom().fov, LIGHTING_FAR);
    let mut frame = Frame::new(view, Vec3::new(0.02, 0.02, 0.03));

    let tuning = sim.tuning();
    frame.field = Some(FieldDraw {
        grid: tuning.grid,
        spacing: tuning.spacing,
        base_scale: tuning.base_scale,
        wave: tuning.wave,
        time: sim.wave_time(),
        color: Vec3::new(0.75, 0.75, 0.8),
    });

    let points: Vec<_> = sim
        .point_lights()
        .into_iter()
        .filter(|l| !l.is_dark())
        .collect();
    for light in &points {
        frame.push(cube(
            DrawKind::LightMarker,
            light.position,
            Vec3::splat(LIGHT_MARKER_SIZE),
            0.0,
            light.color(),
        ));
    }
    frame.lighting = Lighting {
        directional: sim.directional(),
        points,
        spot: Some(sim.spot()),
    };
    tracing::trace!(lights = frame.lighting.points.len(), "lighting frame built");
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_input::{Action, InputSnapshot};
    use showroom_kernel::{
        AnimationRegistry, ChaseTuning, CombatTuning, DrivingTuning, LightingTuning, OrbitTuning,
    };

    fn combat() -> CombatSim {
        CombatSim::new(
            CombatTuning::default(),
            OrbitTuning::default(),
            AnimationRegistry::default(),
            3,
        )
    }

    #[test]
    fn driving_frame_has_car_grid_and_sky() {
        let sim = DrivingSim::new(DrivingTuning::default(), ChaseTuning::default());
        let frame = driving_frame(&sim);
        assert_eq!(frame.count(DrawKind::Vehicle), 1);
        assert!(frame.sky.is_some());
        assert_eq!(frame.grid.map(|g| g.extent), Some(500.0));
        assert_eq!(frame.view.eye, sim.camera().position);
        assert_eq!(frame.view.fov_degrees, 45.0);
        assert_eq!(frame.lighting.directional, daylight());
        assert!(frame.lighting.points.is_empty());
    }

    #[test]
    fn vehicle_box_follows_heading() {
        let sim = DrivingSim::new(DrivingTuning::default(), ChaseTuning::default());
        let frame = driving_frame(&sim);
        let car = frame.items[0];
        // Heading 180 turns the long axis onto -Z.
        let nose = car.model.transform_vector3(Vec3::Z);
        assert!(nose.z < -3.9);
    }

    #[test]
    fn combat_frame_counts() {
        let mut sim = combat();
        sim.step(&InputSnapshot::holding(&[Action::Shoot]), 0.01);
        let frame = combat_frame(&sim);
        assert_eq!(frame.count(DrawKind::Platform), 1);
        assert_eq!(frame.count(DrawKind::Wall), 4);
        assert_eq!(frame.count(DrawKind::Player), 1);
        assert_eq!(frame.count(DrawKind::Projectile), 1);
        assert_eq!(frame.count(DrawKind::Target), 0);
    }

    #[test]
    fn target_box_centre_is_hit_centre() {
        let mut sim = combat();
        // Let one spawn happen.
        sim.step(&InputSnapshot::default(), 3.0);
        let target = sim.world().targets()[0];
        let frame = combat_frame(&sim);
        let item = frame
            .items
            .iter()
            .find(|i| i.kind == DrawKind::Target)
            .copied()
            .unwrap();
        assert!((item.position() - target.center(0.75)).length() < 1e-5);
        // Box base rests at the target position.
        let base = item.model.transform_point3(Vec3::new(0.0, -0.5, 0.0));
        assert!((base.y - target.position.y).abs() < 1e-5);
    }

    #[test]
    fn lighting_frame_has_field_markers_and_spot() {
        let sim = LightingSim::new(LightingTuning::default());
        let frame = lighting_frame(&sim);
        let field = frame.field.unwrap();
        assert_eq!(field.instance_count(), 14_400);
        assert_eq!(frame.count(DrawKind::LightMarker), 3);
        assert_eq!(frame.lighting.points.len(), 3);
        assert!(frame.lighting.spot.is_some());
        assert!(frame.lighting.point_slots()[3].is_dark());
    }
}
