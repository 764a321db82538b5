use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use picker_core::ColorItem;
use picker_engine::PickerSettings;
use picker_logging::{picker_info, picker_warn};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "picker.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedColor {
    id: u64,
    name: String,
    /// 0xAARRGGBB
    argb: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    colors: Vec<PersistedColor>,
    pub default_color_id: u64,
    sample_period_ms: u64,
    step_delay_ms: u64,
    pub store_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let colors = [
            (1, "Red", 0xFFF4_4336),
            (2, "Green", 0xFF4C_AF50),
            (3, "Blue", 0xFF21_96F3),
            (4, "Amber", 0xFFFF_C107),
            (5, "Purple", 0xFF9C_27B0),
        ]
        .into_iter()
        .map(|(id, name, argb)| PersistedColor {
            id,
            name: name.to_string(),
            argb,
        })
        .collect();

        Self {
            colors,
            default_color_id: 1,
            sample_period_ms: 200,
            step_delay_ms: 60,
            store_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn colors(&self) -> Vec<ColorItem> {
        self.colors
            .iter()
            .map(|color| ColorItem::new(color.id, color.name.clone(), color.argb))
            .collect()
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn settings(&self) -> PickerSettings {
        PickerSettings {
            sample_period: Duration::from_millis(self.sample_period_ms),
            ..PickerSettings::default()
        }
    }
}

/// Read the config at `path`; a missing or unreadable file yields the defaults.
pub(crate) fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            picker_info!("No config at {:?}; using defaults", path);
            return AppConfig::default();
        }
        Err(err) => {
            picker_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            picker_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            picker_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
