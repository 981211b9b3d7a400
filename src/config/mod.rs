use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::annotator::overlap::OverlapOrdering;
use crate::constants::{MIN_DRAG_DISTANCE, MIN_DRAG_DISTANCE_FORCE};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// How overlapping annotations are ordered for hit testing and cycling
    #[serde(default)]
    pub overlap_ordering: OverlapOrdering,

    /// Gate area drags behind a raised pressure stage (force touch)
    #[serde(default)]
    pub enable_force_touch: bool,

    /// Whether the rulers (and their marker strip) are shown
    #[serde(default = "default_rulers_visible")]
    pub rulers_visible: bool,

    /// Lock wheel scrolling to the dominant axis of each scroll burst
    #[serde(default)]
    pub predominant_axis_scrolling: bool,

    /// Last opened image, remembered for quick access (not auto-loaded)
    #[serde(default)]
    pub last_image_path: Option<PathBuf>,
}

fn default_rulers_visible() -> bool {
    true
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            overlap_ordering: OverlapOrdering::default(),
            enable_force_touch: false,
            rulers_visible: true,
            predominant_axis_scrolling: false,
            last_image_path: None,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Immutable snapshot of the settings gesture code reads.
///
/// Gesture systems never read [`AppConfig`] directly; the snapshot is
/// rebuilt on [`ApplyConfigRequest`], so a mid-gesture config edit cannot
/// change thresholds under an active drag.
#[derive(Resource, Debug, Clone, Default)]
pub struct InteractionSettings {
    pub overlap_ordering: OverlapOrdering,
    pub enable_force_touch: bool,
    pub rulers_visible: bool,
    pub predominant_axis_scrolling: bool,
}

impl InteractionSettings {
    /// Pointer travel required before a press escalates into a drag.
    pub fn min_drag_distance(&self) -> f32 {
        if self.enable_force_touch {
            MIN_DRAG_DISTANCE_FORCE
        } else {
            MIN_DRAG_DISTANCE
        }
    }

    /// Pressure stage an area drag must reach when gating is on.
    pub fn required_stage(&self) -> u8 {
        if self.enable_force_touch { 1 } else { 0 }
    }

    fn snapshot(data: &AppConfigData) -> Self {
        Self {
            overlap_ordering: data.overlap_ordering,
            enable_force_touch: data.enable_force_touch,
            rulers_visible: data.rulers_visible,
            predominant_axis_scrolling: data.predominant_axis_scrolling,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to re-snapshot [`InteractionSettings`] from the edited config
#[derive(Message)]
pub struct ApplyConfigRequest;

/// Message to update the last image path in config
#[derive(Message)]
pub struct UpdateLastImagePathRequest {
    pub path: PathBuf,
}

/// Load configuration from disk, falling back to defaults on any error.
fn load_config() -> AppConfig {
    let config_path = crate::paths::config_file();

    let data = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    data
                }
                Err(e) => {
                    warn!("Failed to parse config file, using defaults: {}", e);
                    AppConfigData::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file, using defaults: {}", e);
                AppConfigData::default()
            }
        }
    } else {
        info!("No config file found, using defaults");
        AppConfigData::default()
    };

    AppConfig {
        data,
        config_path,
        dirty: false,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut settings: ResMut<InteractionSettings>,
) {
    let loaded = load_config();
    config.data = loaded.data;
    config.config_path = loaded.config_path;
    config.dirty = false;
    *settings = InteractionSettings::snapshot(&config.data);
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to re-snapshot the interaction settings
fn apply_config_system(
    mut events: MessageReader<ApplyConfigRequest>,
    config: Res<AppConfig>,
    mut settings: ResMut<InteractionSettings>,
) {
    for _ in events.read() {
        *settings = InteractionSettings::snapshot(&config.data);
        debug!("Applied config: {:?}", *settings);
    }
}

/// System to update last image path
fn update_last_image_path_system(
    mut events: MessageReader<UpdateLastImagePathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_image_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<InteractionSettings>()
            .add_message::<SaveConfigRequest>()
            .add_message::<ApplyConfigRequest>()
            .add_message::<UpdateLastImagePathRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                    apply_config_system.run_if(on_message::<ApplyConfigRequest>),
                    update_last_image_path_system
                        .run_if(on_message::<UpdateLastImagePathRequest>),
                ),
            );
    }
}
