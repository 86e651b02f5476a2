use crate::rng::SpawnRng;
use crate::tuning::CombatTuning;
use glam::Vec3;

/// Fixed-interval spawn timer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimer {
    accumulated: f32,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `dt`; returns true (and resets to zero) once `interval`
    /// has been reached.
    pub fn tick(&mut self, dt: f32, interval: f32) -> bool {
        self.accumulated += dt;
        if self.accumulated >= interval {
            self.accumulated = 0.0;
            true
        } else {
            false
        }
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }
}

/// Square spawn region with an exclusion radius around the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub range: f32,
    pub height: f32,
    pub min_distance: f32,
    pub max_attempts: u32,
}

impl SpawnArea {
    pub fn from_tuning(tuning: &CombatTuning) -> Self {
        Self {
            range: tuning.spawn_range,
            height: tuning.spawn_height,
            min_distance: tuning.min_spawn_distance,
            max_attempts: tuning.max_spawn_attempts,
        }
    }

    fn candidate(&self, rng: &mut impl SpawnRng) -> Vec3 {
        let x = (rng.next_unit() * 2.0 - 1.0) * self.range;
        let z = (rng.next_unit() * 2.0 - 1.0) * self.range;
        Vec3::new(x, self.height, z)
    }

    /// Rejection-sample a position at least `min_distance` from `player`.
    ///
    /// Draws at most `max_attempts` candidates (never fewer than one). If
    /// every candidate lands inside the exclusion radius, the last one is
    /// returned with `constrained == false`.
    pub fn sample(&self, player: Vec3, rng: &mut impl SpawnRng) -> SpawnSample {
        let attempts = self.max_attempts.max(1);
        let mut position = self.candidate(rng);
        for attempt in 1..=attempts {
            if attempt > 1 {
                position = self.candidate(rng);
            }
            if position.distance(player) >= self.min_distance {
                return SpawnSample {
                    position,
                    attempts: attempt,
                    constrained: true,
                };
            }
            tracing::trace!(attempt, ?position, "spawn candidate too close to player");
        }
        tracing::warn!(
            attempts,
            min_distance = self.min_distance,
            range = self.range,
            "spawn sampling exhausted; placing target unconstrained"
        );
        SpawnSample {
            position,
            attempts,
            constrained: false,
        }
    }
}

/// Result of one spawn sampling run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSample {
    pub position: Vec3,
    pub attempts: u32,
    /// False when the retry bound was hit and the exclusion radius ignored.
    pub constrained: bool,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rng::SplitMix64;
    use std::collections::VecDeque;

    /// Replays a fixed list of unit samples, then repeats the last one.
    pub(crate) struct ScriptedRng {
        draws: VecDeque<f32>,
        last: f32,
    }

    impl ScriptedRng {
        pub(crate) fn new(draws: &[f32]) -> Self {
            Self {
                draws: draws.iter().copied().collect(),
                last: 0.5,
            }
        }
    }

    impl SpawnRng for ScriptedRng {
        fn next_unit(&mut self) -> f32 {
            if let Some(u) = self.draws.pop_front() {
                self.last = u;
            }
            self.last
        }
    }

    fn area() -> SpawnArea {
        SpawnArea::from_tuning(&CombatTuning::default())
    }

    #[test]
    fn timer_fires_on_interval_and_resets() {
        let mut timer = SpawnTimer::new();
        assert!(!timer.tick(1.0, 3.0));
        assert!(!timer.tick(1.5, 3.0));
        assert!(timer.tick(0.5, 3.0));
        assert_eq!(timer.accumulated(), 0.0);
        assert!(!timer.tick(2.9, 3.0));
    }

    #[test]
    fn timer_resets_to_zero_not_remainder() {
        let mut timer = SpawnTimer::new();
        assert!(timer.tick(5.0, 3.0));
        assert_eq!(timer.accumulated(), 0.0);
    }

    #[test]
    fn too_close_candidate_is_resampled() {
        let player = Vec3::new(0.0, 0.1, 0.0);
        // First candidate: x = (0.8 * 2 - 1) * 4 = 2.4, z = 0 -> distance 2.4.
        // Second candidate: x = 3.2, z = 0 -> distance 3.2.
        let mut rng = ScriptedRng::new(&[0.8, 0.5, 0.9, 0.5]);
        let sample = area().sample(player, &mut rng);
        assert!(sample.constrained);
        assert_eq!(sample.attempts, 2);
        assert!((sample.position.x - 3.2).abs() < 1e-5);
        assert!(sample.position.distance(player) >= 2.5);
    }

    #[test]
    fn first_valid_candidate_is_kept() {
        let player = Vec3::new(0.0, 0.1, 0.0);
        let mut rng = ScriptedRng::new(&[0.0, 0.0]);
        let sample = area().sample(player, &mut rng);
        assert_eq!(sample.attempts, 1);
        assert_eq!(sample.position, Vec3::new(-4.0, 0.1, -4.0));
    }

    #[test]
    fn impossible_exclusion_falls_back_after_bound() {
        let player = Vec3::ZERO;
        let tight = SpawnArea {
            range: 1.0,
            height: 0.0,
            min_distance: 10.0,
            max_attempts: 5,
        };
        let mut rng = SplitMix64::new(9);
        let sample = tight.sample(player, &mut rng);
        assert!(!sample.constrained);
        assert_eq!(sample.attempts, 5);
        assert!(sample.position.x.abs() <= 1.0 && sample.position.z.abs() <= 1.0);
    }

    #[test]
    fn zero_attempt_bound_still_draws_once() {
        let tight = SpawnArea {
            max_attempts: 0,
            ..area()
        };
        let mut rng = ScriptedRng::new(&[0.0, 0.0]);
        let sample = tight.sample(Vec3::ZERO, &mut rng);
        assert_eq!(sample.attempts, 1);
    }

    #[test]
    fn seeded_samples_respect_min_distance() {
        let mut rng = SplitMix64::new(1234);
        let a = area();
        for i in 0..500 {
            let player = Vec3::new((i % 9) as f32 - 4.0, 0.09, (i % 7) as f32 - 3.0);
            let sample = a.sample(player, &mut rng);
            assert!(sample.constrained);
            assert!(sample.position.distance(player) >= 2.5);
            assert!(sample.position.x.abs() <= 4.0 && sample.position.z.abs() <= 4.0);
        }
    }
}
