//! User-tunable settings with JSON persistence.
//!
//! Settings load from a JSON file in the platform config directory and
//! fall back to defaults field-by-field, so a partial file stays valid.
//! The shared handle lets the settings watcher publish a reload without
//! touching sessions already in flight.

use crate::constants::{
    ANIMATED_FOLLOW_RATE, DEFAULT_CANVAS_SIZE, DEFAULT_NOTE_SIZE, GRAVITY_ACCEL,
    MAX_RELEASE_SPEED, REST_SPEED, SETTINGS_FILE_NAME, SLIDE_FRICTION, VELOCITY_SMOOTHING,
};
use crate::types::DragMode;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static CONFIG_DIR: Lazy<Option<PathBuf>> =
    Lazy::new(|| dirs::config_dir().map(|dir| dir.join("spaceboard")));

/// Physics tuning for drag sessions and settling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Fraction of the remaining distance covered per Animated drag-move
    pub animated_follow: f32,
    /// Low-pass blend factor for velocity sampling
    pub velocity_smoothing: f32,
    /// Exponential friction coefficient, 1/s
    pub slide_friction: f32,
    /// Downward acceleration in gravity mode, units/s^2
    pub gravity: f32,
    /// Speed below which a settling note rests, units/s
    pub rest_speed: f32,
    /// Cap on release velocity, units/s
    pub max_release_speed: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            animated_follow: ANIMATED_FOLLOW_RATE,
            velocity_smoothing: VELOCITY_SMOOTHING,
            slide_friction: SLIDE_FRICTION,
            gravity: GRAVITY_ACCEL,
            rest_speed: REST_SPEED,
            max_release_speed: MAX_RELEASE_SPEED,
        }
    }
}

/// All user-tunable settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    /// Mode assigned to newly created notes
    pub default_drag_mode: DragMode,
    /// Size assigned to newly created notes (width, height)
    pub default_note_size: (f32, f32),
    /// Arena size for newly created canvases (width, height)
    pub canvas_size: (f32, f32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsSettings::default(),
            default_drag_mode: DragMode::default(),
            default_note_size: DEFAULT_NOTE_SIZE,
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

/// Shared settings handle. Readers take the lock briefly and copy out
/// what they need; the watcher replaces the whole value on reload.
pub type SettingsHandle = Arc<RwLock<Settings>>;

pub fn shared(settings: Settings) -> SettingsHandle {
    Arc::new(RwLock::new(settings))
}

/// Path of the settings file inside the platform config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    CONFIG_DIR.as_ref().map(|dir| dir.join(SETTINGS_FILE_NAME))
}

pub fn load_from(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading settings file {}", path.display()))?;
    let settings = serde_json::from_str(&raw)
        .with_context(|| format!("parsing settings file {}", path.display()))?;
    Ok(settings)
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating settings directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings).context("serializing settings")?;
    fs::write(path, json).with_context(|| format!("writing settings file {}", path.display()))?;
    Ok(())
}

/// Load from the default location, falling back to defaults when the file
/// is missing or unreadable.
pub fn load() -> Settings {
    let Some(path) = default_settings_path() else {
        return Settings::default();
    };
    if !path.exists() {
        return Settings::default();
    }
    match load_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load settings, using defaults");
            Settings::default()
        }
    }
}
