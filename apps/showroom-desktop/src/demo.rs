use clap::ValueEnum;
use showroom_config::ShowroomConfig;
use showroom_input::InputSnapshot;
use showroom_kernel::{AnimationClip, AnimationPlayer, CombatSim, DrivingSim, LightingSim};
use showroom_render::{Frame, combat_frame, driving_frame, lighting_frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    Driving,
    Lighting,
    Combat,
}

impl DemoKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DemoKind::Driving => "driving",
            DemoKind::Lighting => "lighting",
            DemoKind::Combat => "combat",
        }
    }
}

/// Stands in for a skeletal animator: records and logs every clip switch.
#[derive(Debug, Default)]
pub struct LoggingAnimationPlayer {
    pub current: Option<String>,
    pub switches: u64,
}

impl AnimationPlayer for LoggingAnimationPlayer {
    fn play(&mut self, clip: &AnimationClip) {
        tracing::info!(clip = %clip.name, source = %clip.source.display(), "animation switched");
        self.current = Some(clip.name.clone());
        self.switches += 1;
    }
}

/// The one simulation a window runs.
pub enum ActiveDemo {
    Driving(DrivingSim),
    Lighting(LightingSim),
    Combat(CombatSim),
}

impl ActiveDemo {
    pub fn new(kind: DemoKind, config: &ShowroomConfig) -> Self {
        match kind {
            DemoKind::Driving => {
                ActiveDemo::Driving(DrivingSim::new(config.driving, config.chase))
            }
            DemoKind::Lighting => ActiveDemo::Lighting(LightingSim::new(config.lighting)),
            DemoKind::Combat => ActiveDemo::Combat(CombatSim::new(
                config.combat,
                config.orbit,
                config.animation_registry(),
                config.seed,
            )),
        }
    }

    pub fn kind(&self) -> DemoKind {
        match self {
            ActiveDemo::Driving(_) => DemoKind::Driving,
            ActiveDemo::Lighting(_) => DemoKind::Lighting,
            ActiveDemo::Combat(_) => DemoKind::Combat,
        }
    }

    pub fn step(&mut self, input: &InputSnapshot, dt: f32, animator: &mut LoggingAnimationPlayer) {
        match self {
            ActiveDemo::Driving(sim) => sim.step(input, dt),
            ActiveDemo::Lighting(sim) => sim.step(input, dt),
            ActiveDemo::Combat(sim) => {
                let report = sim.step_and_play(input, dt, animator);
                for event in &report.events {
                    tracing::debug!(?event, "combat");
                }
            }
        }
    }

    pub fn frame(&self) -> Frame {
        match self {
            ActiveDemo::Driving(sim) => driving_frame(sim),
            ActiveDemo::Lighting(sim) => lighting_frame(sim),
            ActiveDemo::Combat(sim) => combat_frame(sim),
        }
    }

    /// Label/value rows for the HUD.
    pub fn stats(&self) -> Vec<(&'static str, String)> {
        match self {
            ActiveDemo::Driving(sim) => {
                let v = sim.vehicle();
                vec![
                    ("speed", format!("{:.1}", v.speed)),
                    ("heading", format!("{:.1}", v.heading)),
                    (
                        "position",
                        format!("({:.1}, {:.1})", v.position.x, v.position.z),
                    ),
                    ("fov", format!("{:.0}", sim.zoom().fov)),
                ]
            }
            ActiveDemo::Lighting(sim) => {
                let lit = sim.point_lights().iter().filter(|l| !l.is_dark()).count();
                vec![
                    ("instances", sim.instances().len().to_string()),
                    ("point lights", lit.to_string()),
                    ("wave time", format!("{:.2}", sim.wave_time())),
                    ("fov", format!("{:.0}", sim.zoom().fov)),
                ]
            }
            ActiveDemo::Combat(sim) => {
                let world = sim.world();
                vec![
                    ("animation", sim.animation().to_string()),
                    ("projectiles", world.projectiles().len().to_string()),
                    ("targets", world.targets().len().to_string()),
                    ("kills", world.kills().to_string()),
                    ("shots", world.shots_fired().to_string()),
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_input::Action;
    use showroom_render::DrawKind;

    #[test]
    fn every_demo_builds_a_frame() {
        let config = ShowroomConfig::default();
        for kind in [DemoKind::Driving, DemoKind::Lighting, DemoKind::Combat] {
            let demo = ActiveDemo::new(kind, &config);
            assert_eq!(demo.kind(), kind);
            assert!(!demo.stats().is_empty());
            let _ = demo.frame();
        }
    }

    #[test]
    fn combat_switch_reaches_the_player() {
        let config = ShowroomConfig::default();
        let mut demo = ActiveDemo::new(DemoKind::Combat, &config);
        let mut animator = LoggingAnimationPlayer::default();
        demo.step(&InputSnapshot::holding(&[Action::Forward]), 0.016, &mut animator);
        assert_eq!(animator.switches, 1);
        assert_eq!(animator.current.as_deref(), Some("run_forward"));

        demo.step(&InputSnapshot::holding(&[Action::Shoot]), 0.016, &mut animator);
        assert_eq!(demo.frame().count(DrawKind::Projectile), 1);
    }
}
