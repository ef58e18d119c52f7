// Inspector settings: defaults for sweeps and output, stored in the platform
// config dir, e.g. ~/.config/scrollstack/settings.json on Linux or
// ~/Library/Application Support/scrollstack/settings.json on macOS.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectSettings {
    /// Distance the viewport moves between snapshots during a sweep.
    #[serde(default = "default_sweep_step")]
    pub sweep_step: f32,
    #[serde(default)]
    pub format: OutputFormat,
    /// Whether scroll-to requests ask the surface to animate.
    #[serde(default)]
    pub animated_scrolls: bool,
}

fn default_sweep_step() -> f32 {
    40.0
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            sweep_step: default_sweep_step(),
            format: OutputFormat::default(),
            animated_scrolls: false,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("scrollstack").join("settings.json"))
}

pub fn load_settings() -> InspectSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => InspectSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> InspectSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<InspectSettings>(&data) {
            Ok(settings) if settings.sweep_step > 0.0 => settings,
            Ok(settings) => {
                log::warn!(
                    "Ignoring sweep_step {} in {}, must be positive",
                    settings.sweep_step,
                    path.display()
                );
                InspectSettings {
                    sweep_step: default_sweep_step(),
                    ..settings
                }
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                InspectSettings::default()
            }
        },
        Err(_) => InspectSettings::default(),
    }
}

pub fn save_settings_to(settings: &InspectSettings, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
