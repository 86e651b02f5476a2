use crate::anim::{AnimationPlayer, AnimationRegistry, AnimationSelector, Locomotion};
use crate::camera::{OrbitCamera, Zoom};
use crate::combat::{CombatEvent, CombatFrame, CombatWorld};
use crate::player::Player;
use crate::rng::SplitMix64;
use crate::tuning::{CombatTuning, OrbitTuning};
use showroom_input::InputSnapshot;

/// What changed during one combat frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatReport {
    pub moved: bool,
    /// Set only when the locomotion clip changed this frame.
    pub animation: Option<Locomotion>,
    pub events: Vec<CombatEvent>,
}

/// State of the combat demo: player, orbit camera, arena and animation.
#[derive(Debug, Clone)]
pub struct CombatSim {
    tuning: CombatTuning,
    player: Player,
    camera: OrbitCamera,
    zoom: Zoom,
    world: CombatWorld,
    selector: AnimationSelector,
    registry: AnimationRegistry,
    rng: SplitMix64,
    elapsed: f32,
}

impl CombatSim {
    pub fn new(
        tuning: CombatTuning,
        orbit: OrbitTuning,
        registry: AnimationRegistry,
        seed: u64,
    ) -> Self {
        let player = Player::new(&tuning);
        let mut camera = OrbitCamera::new(orbit);
        camera.follow(player.position);
        Self {
            tuning,
            player,
            camera,
            zoom: Zoom::default(),
            world: CombatWorld::new(tuning),
            selector: AnimationSelector::new(),
            registry,
            rng: SplitMix64::new(seed),
            elapsed: 0.0,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn world(&self) -> &CombatWorld {
        &self.world
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    pub fn animation(&self) -> Locomotion {
        self.selector.current()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    /// Advance one frame: look, walk, pick animation, place the camera,
    /// then run the arena with the camera's aim.
    pub fn step(&mut self, input: &InputSnapshot, dt: f32) -> CombatReport {
        let _span = tracing::info_span!("shooter_step", elapsed = self.elapsed).entered();

        self.camera.apply_pointer(input.pointer_delta);
        self.zoom.apply_scroll(input.scroll);
        self.player.yaw = self.camera.yaw;

        let moved = self.player.walk(
            &input.held,
            self.camera.walk_forward(),
            self.camera.walk_right(),
            dt,
            &self.tuning,
        );
        let animation = self.selector.update(&input.held, moved);

        self.camera.follow(self.player.position);

        let frame = CombatFrame {
            player: self.player.position,
            aim: self.camera.forward,
            shoot_held: input.held.shoot,
            dt,
        };
        self.world.update(&frame, &mut self.rng);
        self.elapsed += dt;

        CombatReport {
            moved,
            animation,
            events: self.world.drain_events(),
        }
    }

    /// Step and hand any animation change to `player`.
    pub fn step_and_play(
        &mut self,
        input: &InputSnapshot,
        dt: f32,
        player: &mut dyn AnimationPlayer,
    ) -> CombatReport {
        let report = self.step(input, dt);
        if let Some(which) = report.animation {
            self.registry.dispatch(which, player);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::AnimationClip;
    use glam::Vec3;
    use showroom_input::Action;

    fn sim(seed: u64) -> CombatSim {
        CombatSim::new(
            CombatTuning::default(),
            OrbitTuning::default(),
            AnimationRegistry::default(),
            seed,
        )
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl AnimationPlayer for Recorder {
        fn play(&mut self, clip: &AnimationClip) {
            self.0.push(clip.name.clone());
        }
    }

    #[test]
    fn walking_forward_moves_away_from_camera() {
        let mut s = sim(1);
        let start = s.player().position;
        let report = s.step(&InputSnapshot::holding(&[Action::Forward]), 0.5);
        assert!(report.moved);
        assert_eq!(report.animation, Some(Locomotion::Forward));
        // Yaw 0 puts the camera on +Z, so forward walks toward -Z.
        assert!((s.player().position - (start + Vec3::new(0.0, 0.0, -1.25))).length() < 1e-5);
    }

    #[test]
    fn player_faces_camera_yaw() {
        let mut s = sim(1);
        s.step(&InputSnapshot::default().with_pointer(-300.0, 40.0), 0.0);
        assert_eq!(s.player().yaw, s.camera().yaw);
        assert!((s.camera().yaw - 30.0).abs() < 1e-4);
        assert!((s.camera().pitch - 4.0).abs() < 1e-4);
    }

    #[test]
    fn animation_changes_are_played_once() {
        let mut s = sim(1);
        let mut rec = Recorder::default();
        let run = InputSnapshot::holding(&[Action::Forward, Action::Left]);
        for _ in 0..5 {
            s.step_and_play(&run, 1.0 / 60.0, &mut rec);
        }
        s.step_and_play(&InputSnapshot::default(), 1.0 / 60.0, &mut rec);
        assert_eq!(rec.0, vec!["run_forward_left", "rifle_idle"]);
        assert_eq!(s.animation(), Locomotion::Idle);
    }

    #[test]
    fn shoot_fires_along_camera_forward() {
        let mut s = sim(1);
        let report = s.step(&InputSnapshot::holding(&[Action::Shoot]), 0.0);
        let fired = report.events.iter().find_map(|e| match e {
            CombatEvent::Fired { direction, .. } => Some(*direction),
            _ => None,
        });
        let direction = fired.expect("a projectile should have been fired");
        assert!((direction - s.camera().forward).length() < 1e-6);
        assert_eq!(s.world().projectiles().len(), 1);
    }

    #[test]
    fn same_seed_and_inputs_replay_identically() {
        let script = |i: usize| {
            let mut held = Vec::new();
            if i % 90 < 40 {
                held.push(Action::Forward);
            }
            if i % 70 < 20 {
                held.push(Action::Right);
            }
            if i % 15 == 0 {
                held.push(Action::Shoot);
            }
            InputSnapshot::holding(&held).with_pointer((i % 7) as f32 - 3.0, 0.0)
        };
        let run = |seed| {
            let mut s = sim(seed);
            for i in 0..900 {
                s.step(&script(i), 1.0 / 60.0);
            }
            (
                *s.player(),
                s.world().targets().to_vec(),
                s.world().projectiles().to_vec(),
                s.world().kills(),
            )
        };
        assert_eq!(run(42), run(42));
    }
}
