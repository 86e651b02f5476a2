//! Projectile and target simulation.
//!
//! # Invariants
//! - A frame runs in a fixed order: fire, spawn, advance projectiles,
//!   pursue, resolve hits.
//! - A projectile is removed on the first frame its lifetime reaches zero.
//! - Hit removals are collected first and applied after the scan, so a
//!   projectile destroys at most one target and a destroyed target cannot
//!   be hit again in the same pass.

use crate::rng::SpawnRng;
use crate::spawn::{SpawnArea, SpawnTimer};
use crate::tuning::CombatTuning;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use showroom_input::EdgeTrigger;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u64,
    pub position: Vec3,
    /// Unit direction of travel.
    pub direction: Vec3,
    pub speed: f32,
    /// Remaining lifetime in seconds.
    pub life: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u64,
    /// Base of the target, on the ground.
    pub position: Vec3,
    pub speed: f32,
}

impl Target {
    /// Point hits are measured against.
    pub fn center(&self, height: f32) -> Vec3 {
        self.position + Vec3::Y * height
    }
}

/// Record of something that happened during an update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    Fired {
        id: u64,
        position: Vec3,
        direction: Vec3,
    },
    Expired {
        id: u64,
    },
    Spawned {
        id: u64,
        position: Vec3,
        attempts: u32,
    },
    Hit {
        projectile: u64,
        target: u64,
    },
}

/// Per-frame inputs to [`CombatWorld::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatFrame {
    pub player: Vec3,
    /// Direction new projectiles travel; normalized on fire.
    pub aim: Vec3,
    pub shoot_held: bool,
    pub dt: f32,
}

/// Owns every projectile and target in the arena.
#[derive(Debug, Clone)]
pub struct CombatWorld {
    tuning: CombatTuning,
    projectiles: Vec<Projectile>,
    targets: Vec<Target>,
    trigger: EdgeTrigger,
    spawn_timer: SpawnTimer,
    next_id: u64,
    kills: u64,
    shots: u64,
    event_log: Vec<CombatEvent>,
}

impl CombatWorld {
    pub fn new(tuning: CombatTuning) -> Self {
        Self {
            tuning,
            projectiles: Vec::new(),
            targets: Vec::new(),
            trigger: EdgeTrigger::new(),
            spawn_timer: SpawnTimer::new(),
            next_id: 0,
            kills: 0,
            shots: 0,
            event_log: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Targets destroyed so far.
    pub fn kills(&self) -> u64 {
        self.kills
    }

    pub fn shots_fired(&self) -> u64 {
        self.shots
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.event_log
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Launch a projectile from `origin`. Returns its id.
    pub fn fire(&mut self, origin: Vec3, aim: Vec3) -> u64 {
        let id = self.allocate_id();
        let direction = aim.normalize_or_zero();
        self.projectiles.push(Projectile {
            id,
            position: origin,
            direction,
            speed: self.tuning.projectile_speed,
            life: self.tuning.projectile_lifetime,
        });
        self.shots += 1;
        tracing::debug!(id, ?origin, ?direction, "projectile fired");
        self.event_log.push(CombatEvent::Fired {
            id,
            position: origin,
            direction,
        });
        id
    }

    /// Place a target at `position` without sampling. Returns its id.
    pub fn place_target(&mut self, position: Vec3) -> u64 {
        let id = self.allocate_id();
        self.targets.push(Target {
            id,
            position,
            speed: self.tuning.target_speed,
        });
        id
    }

    fn spawn_target(&mut self, player: Vec3, rng: &mut impl SpawnRng) {
        let sample = SpawnArea::from_tuning(&self.tuning).sample(player, rng);
        let id = self.place_target(sample.position);
        tracing::debug!(id, position = ?sample.position, attempts = sample.attempts, "target spawned");
        self.event_log.push(CombatEvent::Spawned {
            id,
            position: sample.position,
            attempts: sample.attempts,
        });
    }

    /// Advance the arena by one frame.
    pub fn update(&mut self, frame: &CombatFrame, rng: &mut impl SpawnRng) {
        let _span = tracing::info_span!("combat_step", dt = frame.dt).entered();

        if self.trigger.update(frame.shoot_held) {
            self.fire(frame.player + self.tuning.muzzle_offset, frame.aim);
        }

        if self.spawn_timer.tick(frame.dt, self.tuning.spawn_interval) {
            self.spawn_target(frame.player, rng);
        }

        self.advance_projectiles(frame.dt);
        self.pursue(frame.player, frame.dt);
        self.resolve_hits();
    }

    fn advance_projectiles(&mut self, dt: f32) {
        let mut expired = Vec::new();
        self.projectiles.retain_mut(|p| {
            p.position += p.direction * p.speed * dt;
            p.life -= dt;
            if p.life <= 0.0 {
                expired.push(p.id);
                false
            } else {
                true
            }
        });
        for id in expired {
            tracing::debug!(id, "projectile expired");
            self.event_log.push(CombatEvent::Expired { id });
        }
    }

    fn pursue(&mut self, player: Vec3, dt: f32) {
        for target in &mut self.targets {
            let heading = (player - target.position).normalize_or_zero();
            target.position += heading * target.speed * dt;
        }
    }

    fn resolve_hits(&mut self) {
        let reach = self.tuning.hit_distance;
        let lift = self.tuning.target_center_height;
        let mut spent = vec![false; self.projectiles.len()];
        let mut destroyed = vec![false; self.targets.len()];

        for (pi, projectile) in self.projectiles.iter().enumerate() {
            for (ti, target) in self.targets.iter().enumerate() {
                if destroyed[ti] {
                    continue;
                }
                if projectile.position.distance(target.center(lift)) < reach {
                    spent[pi] = true;
                    destroyed[ti] = true;
                    tracing::debug!(projectile = projectile.id, target = target.id, "target hit");
                    self.event_log.push(CombatEvent::Hit {
                        projectile: projectile.id,
                        target: target.id,
                    });
                    break;
                }
            }
        }

        let hits = destroyed.iter().filter(|d| **d).count();
        if hits == 0 {
            return;
        }
        self.kills += hits as u64;

        let mut index = 0;
        self.projectiles.retain(|_| {
            let keep = !spent[index];
            index += 1;
            keep
        });
        let mut index = 0;
        self.targets.retain(|_| {
            let keep = !destroyed[index];
            index += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SplitMix64;
    use crate::spawn::tests::ScriptedRng;

    fn world() -> CombatWorld {
        CombatWorld::new(CombatTuning::default())
    }

    fn frame(player: Vec3, shoot_held: bool, dt: f32) -> CombatFrame {
        CombatFrame {
            player,
            aim: Vec3::Z,
            shoot_held,
            dt,
        }
    }

    #[test]
    fn single_shoot_edge_fires_one_projectile() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        w.update(&frame(Vec3::ZERO, true, 0.0), &mut rng);
        w.update(&frame(Vec3::ZERO, true, 0.0), &mut rng);
        w.update(&frame(Vec3::ZERO, true, 0.0), &mut rng);

        assert_eq!(w.projectiles().len(), 1);
        let p = w.projectiles()[0];
        assert_eq!(p.direction, Vec3::Z);
        assert!((p.position - Vec3::new(-0.1, 0.8, 0.0)).length() < 1e-6);
        assert_eq!(p.life, 3.0);
        assert_eq!(w.shots_fired(), 1);
    }

    #[test]
    fn release_and_press_fires_again() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        w.update(&frame(Vec3::ZERO, true, 0.0), &mut rng);
        w.update(&frame(Vec3::ZERO, false, 0.0), &mut rng);
        w.update(&frame(Vec3::ZERO, true, 0.0), &mut rng);
        assert_eq!(w.projectiles().len(), 2);
    }

    #[test]
    fn projectile_moves_in_the_frame_it_is_fired() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        let dt = 1.0 / 60.0;
        w.update(&frame(Vec3::ZERO, true, dt), &mut rng);
        let p = w.projectiles()[0];
        let expected = Vec3::new(-0.1, 0.8, 0.0) + Vec3::Z * 15.0 * dt;
        assert!((p.position - expected).length() < 1e-5);
        assert!((p.life - (3.0 - dt)).abs() < 1e-6);
    }

    #[test]
    fn aim_is_normalized() {
        let mut w = world();
        w.fire(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert!((w.projectiles()[0].direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn projectile_removed_when_lifetime_reaches_zero() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        w.fire(Vec3::ZERO, Vec3::Z);
        w.update(&frame(Vec3::ZERO, false, 1.0), &mut rng);
        w.update(&frame(Vec3::ZERO, false, 1.0), &mut rng);
        assert_eq!(w.projectiles().len(), 1);
        assert_eq!(w.projectiles()[0].life, 1.0);
        w.update(&frame(Vec3::ZERO, false, 1.0), &mut rng);
        assert!(w.projectiles().is_empty());

        let expired = w
            .events()
            .iter()
            .filter(|e| matches!(e, CombatEvent::Expired { .. }))
            .count();
        assert_eq!(expired, 1);
    }

    #[test]
    fn lifetime_never_increases() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        w.fire(Vec3::ZERO, Vec3::Z);
        let mut last = w.projectiles()[0].life;
        while let Some(p) = w.projectiles().first().copied() {
            assert!(p.life <= last);
            assert!(p.life > 0.0);
            last = p.life;
            w.update(&frame(Vec3::ZERO, false, 0.25), &mut rng);
        }
    }

    #[test]
    fn projectile_removes_first_target_in_scan_order() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        w.fire(Vec3::new(0.0, 0.75, 0.0), Vec3::Z);
        let first = w.place_target(Vec3::ZERO);
        let second = w.place_target(Vec3::new(0.1, 0.0, 0.0));

        w.update(&frame(Vec3::new(0.0, 0.0, -3.0), false, 0.0), &mut rng);

        assert!(w.projectiles().is_empty());
        assert_eq!(w.targets().len(), 1);
        assert_eq!(w.targets()[0].id, second);
        assert_eq!(w.kills(), 1);
        assert!(w.events().contains(&CombatEvent::Hit {
            projectile: 0,
            target: first,
        }));
    }

    #[test]
    fn destroyed_target_not_eligible_for_later_projectiles() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        let a = w.fire(Vec3::new(0.0, 0.75, 0.0), Vec3::Z);
        let b = w.fire(Vec3::new(0.05, 0.75, 0.0), Vec3::Z);
        w.place_target(Vec3::ZERO);

        w.update(&frame(Vec3::new(0.0, 0.0, -3.0), false, 0.0), &mut rng);

        assert!(w.targets().is_empty());
        assert_eq!(w.projectiles().len(), 1);
        assert_eq!(w.projectiles()[0].id, b);
        assert_ne!(a, b);
        assert_eq!(w.kills(), 1);
    }

    #[test]
    fn hits_measure_to_target_center() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        // At the base but far below the centre.
        w.fire(Vec3::ZERO, Vec3::Z);
        w.place_target(Vec3::ZERO);
        w.update(&frame(Vec3::new(0.0, 0.0, -3.0), false, 0.0), &mut rng);
        assert_eq!(w.targets().len(), 1);
        assert_eq!(w.projectiles().len(), 1);
    }

    #[test]
    fn targets_pursue_player() {
        let mut w = world();
        let mut rng = SplitMix64::new(0);
        w.place_target(Vec3::new(2.0, 0.0, 0.0));
        w.place_target(Vec3::ZERO);
        w.update(&frame(Vec3::ZERO, false, 0.5), &mut rng);
        assert!((w.targets()[0].position - Vec3::new(1.4, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(w.targets()[1].position, Vec3::ZERO);
    }

    #[test]
    fn spawns_on_interval_away_from_player() {
        let mut w = world();
        let mut rng = SplitMix64::new(77);
        let player = Vec3::new(0.0, 0.09, 0.0);
        for _ in 0..(60 * 30) {
            let before = w.targets().len();
            w.update(&frame(player, false, 1.0 / 60.0), &mut rng);
            if w.targets().len() > before {
                let t = w.targets()[w.targets().len() - 1];
                // Sampled before this frame's pursuit step moved it.
                let pursued = t.speed / 60.0;
                assert!(t.position.distance(player) + pursued >= 2.5 - 1e-4);
            }
        }
        let spawned = w
            .events()
            .iter()
            .filter(|e| matches!(e, CombatEvent::Spawned { .. }))
            .count();
        assert!((9..=10).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn scripted_spawn_resamples_too_close_candidate() {
        let mut w = world();
        let player = Vec3::new(0.0, 0.1, 0.0);
        let mut rng = ScriptedRng::new(&[0.8, 0.5, 0.9, 0.5]);
        w.update(&frame(player, false, 3.0), &mut rng);
        let spawned: Vec<_> = w
            .events()
            .iter()
            .filter_map(|e| match e {
                CombatEvent::Spawned {
                    position, attempts, ..
                } => Some((*position, *attempts)),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].1, 2);
        assert!((spawned[0].0.x - 3.2).abs() < 1e-5);
    }

    #[test]
    fn same_seed_same_outcome() {
        let run = |seed: u64| {
            let mut w = world();
            let mut rng = SplitMix64::new(seed);
            for i in 0..600 {
                let shoot = i % 20 < 3;
                let f = CombatFrame {
                    player: Vec3::new(0.0, 0.09, 0.0),
                    aim: Vec3::new((i as f32 * 0.05).sin(), 0.0, (i as f32 * 0.05).cos()),
                    shoot_held: shoot,
                    dt: 1.0 / 60.0,
                };
                w.update(&f, &mut rng);
            }
            (w.targets().to_vec(), w.projectiles().to_vec(), w.drain_events())
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn drain_events_empties_log() {
        let mut w = world();
        w.fire(Vec3::ZERO, Vec3::Z);
        assert_eq!(w.drain_events().len(), 1);
        assert!(w.events().is_empty());
    }
}
