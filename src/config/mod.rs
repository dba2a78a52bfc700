// SPDX-License-Identifier: MPL-2.0
//! This module handles the coordinator's configuration, including loading and
//! saving it to a `toasts.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use fluent_toast::config::{self, CoordinatorConfig};
//! use fluent_toast::ui::notifications::Anchor;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.default_anchor = Anchor::BottomRight;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::domain::ui::{AnimationDuration, MaxQueued, MaxVisible, Pixels};
use crate::error::Result;
use crate::ui::notifications::{Anchor, Easing, Entrance, StackLayout};
use defaults::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_MAX_QUEUED, DEFAULT_MAX_VISIBLE,
    DEFAULT_QUEUE_DEBOUNCE_MS, DEFAULT_SCREEN_MARGIN, DEFAULT_STACK_SPACING,
    MAX_QUEUE_DEBOUNCE_MS,
};
use iced::Rectangle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "toasts.toml";
const APP_NAME: &str = "FluentToast";

/// Rectangle of the parent surface toasts are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<SurfaceRect> for Rectangle {
    fn from(rect: SurfaceRect) -> Self {
        Rectangle {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl From<Rectangle> for SurfaceRect {
    fn from(rect: Rectangle) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Coordinator settings.
///
/// Raw values are stored as written in the file; accessors return them
/// clamped into their valid ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub default_anchor: Anchor,
    pub max_visible: usize,
    pub max_queued: usize,
    pub stack_spacing: f32,
    pub screen_margin: f32,
    pub allow_duplicates: bool,
    /// Stack toasts at an anchor; when false a new toast replaces the old ones.
    pub stack_toasts: bool,
    pub animation_duration_ms: u64,
    pub easing: Easing,
    pub entrance: Entrance,
    pub stack_layout: StackLayout,
    pub queue_debounce_ms: u64,
    /// Parent surface; `None` lays toasts out on the whole screen.
    pub surface: Option<SurfaceRect>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            default_anchor: Anchor::default(),
            max_visible: DEFAULT_MAX_VISIBLE,
            max_queued: DEFAULT_MAX_QUEUED,
            stack_spacing: DEFAULT_STACK_SPACING,
            screen_margin: DEFAULT_SCREEN_MARGIN,
            allow_duplicates: false,
            stack_toasts: true,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            easing: Easing::default(),
            entrance: Entrance::default(),
            stack_layout: StackLayout::default(),
            queue_debounce_ms: DEFAULT_QUEUE_DEBOUNCE_MS,
            surface: None,
        }
    }
}

impl CoordinatorConfig {
    #[must_use]
    pub fn max_visible(&self) -> MaxVisible {
        MaxVisible::new(self.max_visible)
    }

    #[must_use]
    pub fn max_queued(&self) -> MaxQueued {
        MaxQueued::new(self.max_queued)
    }

    #[must_use]
    pub fn stack_spacing(&self) -> Pixels {
        Pixels::new(self.stack_spacing)
    }

    #[must_use]
    pub fn screen_margin(&self) -> Pixels {
        Pixels::new(self.screen_margin)
    }

    #[must_use]
    pub fn animation_duration(&self) -> AnimationDuration {
        AnimationDuration::new(self.animation_duration_ms)
    }

    /// Queue debounce, clamped to [`MAX_QUEUE_DEBOUNCE_MS`].
    #[must_use]
    pub fn queue_debounce(&self) -> Duration {
        Duration::from_millis(self.queue_debounce_ms.min(MAX_QUEUE_DEBOUNCE_MS))
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the user's config directory.
///
/// Returns the defaults if no file exists yet.
pub fn load() -> Result<CoordinatorConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(CoordinatorConfig::default())
}

/// Saves the configuration to the user's config directory.
pub fn save(config: &CoordinatorConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads the configuration from `path`, falling back to defaults on invalid TOML.
pub fn load_from_path(path: &Path) -> Result<CoordinatorConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid toast config, using defaults");
            Ok(CoordinatorConfig::default())
        }
    }
}

/// Saves the configuration to `path`, creating parent directories.
pub fn save_to_path(config: &CoordinatorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
