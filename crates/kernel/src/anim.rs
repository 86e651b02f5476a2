//! Locomotion animation selection.
//!
//! # Invariants
//! - Selection is a pure function of the held movement keys and whether
//!   the player actually moved.
//! - [`AnimationSelector`] reports a selection only when it differs from the
//!   one currently playing.

use serde::{Deserialize, Serialize};
use showroom_input::HeldActions;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Which locomotion clip the player should be showing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Locomotion {
    #[default]
    Idle,
    Forward,
    Back,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackLeft,
    BackRight,
}

impl Locomotion {
    pub const ALL: [Locomotion; 9] = [
        Locomotion::Idle,
        Locomotion::Forward,
        Locomotion::Back,
        Locomotion::Left,
        Locomotion::Right,
        Locomotion::ForwardLeft,
        Locomotion::ForwardRight,
        Locomotion::BackLeft,
        Locomotion::BackRight,
    ];

    /// Pick a clip for this frame. Any moving key combination outside the
    /// eight single/diagonal cases falls back to `Forward`.
    pub fn select(held: &HeldActions, moving: bool) -> Self {
        if !moving {
            return Locomotion::Idle;
        }
        let keys = (held.forward, held.back, held.left, held.right);
        match keys {
            (true, false, true, false) => Locomotion::ForwardLeft,
            (true, false, false, true) => Locomotion::ForwardRight,
            (false, true, true, false) => Locomotion::BackLeft,
            (false, true, false, true) => Locomotion::BackRight,
            (true, false, false, false) => Locomotion::Forward,
            (false, true, false, false) => Locomotion::Back,
            (false, false, true, false) => Locomotion::Left,
            (false, false, false, true) => Locomotion::Right,
            _ => Locomotion::Forward,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locomotion::Idle => "idle",
            Locomotion::Forward => "forward",
            Locomotion::Back => "back",
            Locomotion::Left => "left",
            Locomotion::Right => "right",
            Locomotion::ForwardLeft => "forward_left",
            Locomotion::ForwardRight => "forward_right",
            Locomotion::BackLeft => "back_left",
            Locomotion::BackRight => "back_right",
        }
    }
}

impl std::fmt::Display for Locomotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A playable clip: display name plus where its keyframes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub source: PathBuf,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Playback backend. The simulation only decides which clip; something
/// outside the kernel actually plays it.
pub trait AnimationPlayer {
    fn play(&mut self, clip: &AnimationClip);
}

/// Maps each [`Locomotion`] to the clip that represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationRegistry {
    clips: BTreeMap<Locomotion, AnimationClip>,
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        let file = |stem: &str| {
            AnimationClip::new(stem, format!("resources/objects/gun/{stem}.dae"))
        };
        let clips = [
            (Locomotion::Idle, file("rifle_idle")),
            (Locomotion::Forward, file("run_forward")),
            (Locomotion::Back, file("run_back")),
            (Locomotion::Left, file("run_left")),
            (Locomotion::Right, file("run_right")),
            (Locomotion::ForwardLeft, file("run_forward_left")),
            (Locomotion::ForwardRight, file("run_forward_right")),
            (Locomotion::BackLeft, file("run_back_left")),
            (Locomotion::BackRight, file("run_back_right")),
        ];
        Self {
            clips: clips.into_iter().collect(),
        }
    }
}

impl AnimationRegistry {
    pub fn empty() -> Self {
        Self {
            clips: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, which: Locomotion, clip: AnimationClip) -> Option<AnimationClip> {
        self.clips.insert(which, clip)
    }

    pub fn get(&self, which: Locomotion) -> Option<&AnimationClip> {
        self.clips.get(&which)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Overlay `other` on top of this registry, replacing matching entries.
    pub fn merge(&mut self, other: &AnimationRegistry) {
        for (which, clip) in &other.clips {
            self.clips.insert(*which, clip.clone());
        }
    }

    /// Locomotion states with no registered clip.
    pub fn missing(&self) -> Vec<Locomotion> {
        Locomotion::ALL
            .into_iter()
            .filter(|which| !self.clips.contains_key(which))
            .collect()
    }

    /// Hand the clip for `which` to `player`. Returns false when nothing is
    /// registered for it.
    pub fn dispatch(&self, which: Locomotion, player: &mut dyn AnimationPlayer) -> bool {
        match self.get(which) {
            Some(clip) => {
                player.play(clip);
                true
            }
            None => {
                tracing::warn!(%which, "no animation clip registered");
                false
            }
        }
    }
}

/// Tracks the playing locomotion and reports changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationSelector {
    current: Locomotion,
}

impl AnimationSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Locomotion {
        self.current
    }

    /// Returns the new selection only when it differs from the current one.
    pub fn update(&mut self, held: &HeldActions, moving: bool) -> Option<Locomotion> {
        let next = Locomotion::select(held, moving);
        if next == self.current {
            return None;
        }
        tracing::debug!(from = %self.current, to = %next, "animation switch");
        self.current = next;
        Some(next)
    }
}
