//! Configuration: every demo tunable in one file.
//!
//! Files are YAML (`.yaml`/`.yml`) or JSON (`.json`). Every section is
//! optional and every field inside a section falls back to its default, so
//! a file only names what it changes.
//!
//! # Invariants
//! - A config returned by [`ShowroomConfig::load`] has passed
//!   [`ShowroomConfig::validate`].

use serde::{Deserialize, Serialize};
use showroom_kernel::{
    AnimationRegistry, ChaseTuning, CombatTuning, DrivingTuning, LightingTuning, OrbitTuning,
};
use std::path::{Path, PathBuf};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension {0:?}; expected .yaml, .yml or .json")]
    UnsupportedFormat(PathBuf),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Serialization format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Format::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Window and frame-loop settings for the desktop application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Upper bound on a single frame's delta, seconds.
    pub max_frame_dt: f32,
    /// Show the overlay on start.
    pub hud: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "showroom".into(),
            width: 1280,
            height: 720,
            vsync: true,
            max_frame_dt: 0.1,
            hud: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowroomConfig {
    pub window: WindowConfig,
    pub driving: DrivingTuning,
    pub chase: ChaseTuning,
    pub combat: CombatTuning,
    pub orbit: OrbitTuning,
    pub lighting: LightingTuning,
    /// Clips named here replace the built-in entries for the same state.
    pub animations: Option<AnimationRegistry>,
    /// Spawn RNG seed for the combat demo.
    pub seed: u64,
}

impl ShowroomConfig {
    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, format)?;
        tracing::info!(?path, "configuration loaded");
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn parse(text: &str, format: Format) -> Result<Self, ConfigError> {
        let config: Self = match format {
            Format::Yaml => serde_yaml::from_str(text)?,
            Format::Json => serde_json::from_str(text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_text(&self, format: Format) -> Result<String, ConfigError> {
        Ok(match format {
            Format::Yaml => serde_yaml::to_string(self)?,
            Format::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Default clips with any configured overrides applied.
    pub fn animation_registry(&self) -> AnimationRegistry {
        let mut registry = AnimationRegistry::default();
        if let Some(overrides) = &self.animations {
            registry.merge(overrides);
        }
        registry
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return invalid("window", format!("size {}x{} must be non-zero", w.width, w.height));
        }
        positive("window.max_frame_dt", w.max_frame_dt)?;

        let d = &self.driving;
        positive("driving.max_speed", d.max_speed)?;
        positive("driving.acceleration", d.acceleration)?;
        non_negative("driving.brake", d.brake)?;
        non_negative("driving.friction", d.friction)?;
        non_negative("driving.turn_speed", d.turn_speed)?;
        positive("driving.bound", d.bound)?;

        non_negative("chase.distance", self.chase.distance)?;
        non_negative("orbit.distance", self.orbit.distance)?;
        non_negative("orbit.pitch_limit", self.orbit.pitch_limit)?;

        let c = &self.combat;
        positive("combat.projectile_speed", c.projectile_speed)?;
        positive("combat.projectile_lifetime", c.projectile_lifetime)?;
        positive("combat.target_speed", c.target_speed)?;
        positive("combat.spawn_interval", c.spawn_interval)?;
        positive("combat.spawn_range", c.spawn_range)?;
        non_negative("combat.min_spawn_distance", c.min_spawn_distance)?;
        positive("combat.hit_distance", c.hit_distance)?;
        non_negative("combat.arena_limit", c.arena_limit)?;
        if c.max_spawn_attempts == 0 {
            return invalid("combat.max_spawn_attempts", "must be at least 1".into());
        }

        let l = &self.lighting;
        if l.grid == 0 {
            return invalid("lighting.grid", "must be at least 1".into());
        }
        positive("lighting.spacing", l.spacing)?;
        positive("lighting.base_scale", l.base_scale)?;
        non_negative("lighting.wave.amplitude", l.wave.amplitude)?;
        positive("lighting.camera.pitch_limit", l.camera.pitch_limit)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid { field, reason })
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        invalid(field, format!("{value} must be positive"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(field, format!("{value} must not be negative"))
    }
}
