use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::installed::SectionLabels;

const APP_SETTINGS_FILE: &str = "settings.json";
const SECTION_LABELS_FILE: &str = "labels.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to determine settings directory")]
    NoConfigDir,
    #[error("failed to create settings directory: {0}")]
    CreateDir(#[source] std::io::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid section labels in {path}: {source}")]
    Labels {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_show_installed_size")]
    pub show_installed_size: bool,
    #[serde(default)]
    pub show_hidden_rows: bool,
    #[serde(default)]
    pub section_labels: Option<PathBuf>,
}

fn default_show_installed_size() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            show_installed_size: default_show_installed_size(),
            show_hidden_rows: false,
            section_labels: None,
        }
    }
}

pub fn load_app_settings() -> AppSettings {
    let Some(path) = app_settings_path() else {
        return AppSettings::default();
    };

    load_app_settings_from(&path)
}

pub fn load_app_settings_from(path: &Path) -> AppSettings {
    let Ok(content) = fs::read_to_string(path) else {
        return AppSettings::default();
    };

    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring invalid settings file");
            AppSettings::default()
        }
    }
}

pub fn save_app_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    let path = app_settings_path().ok_or(SettingsError::NoConfigDir)?;
    save_app_settings_to(settings, &path)
}

pub fn save_app_settings_to(settings: &AppSettings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(SettingsError::CreateDir)?;
    }

    let data = serde_json::to_string_pretty(settings)?;

    fs::write(path, data).map_err(SettingsError::Write)
}

/// Loads header texts, falling back to the built-in English ones for any
/// section the file leaves out.
///
/// `path` wins over the settings entry, which wins over `labels.toml` in the
/// config directory. A missing default file is not an error.
pub fn load_section_labels(
    settings: &AppSettings,
    path: Option<&Path>,
) -> Result<SectionLabels, SettingsError> {
    let explicit = path
        .map(Path::to_path_buf)
        .or_else(|| settings.section_labels.clone());

    let path = match explicit {
        Some(path) => path,
        None => match app_config_dir().map(|dir| dir.join(SECTION_LABELS_FILE)) {
            Some(path) if path.exists() => path,
            _ => return Ok(SectionLabels::default()),
        },
    };

    let raw = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
        path: path.clone(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| SettingsError::Labels { path, source })
}

pub fn app_config_dir() -> Option<PathBuf> {
    if let Ok(custom) = env::var("NEBULA_INSTALLED_CONFIG_DIR") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        let trimmed = config_home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join("nebula-installed"));
        }
    }

    if let Ok(home) = env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join(".config").join("nebula-installed"));
        }
    }

    None
}

fn app_settings_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join(APP_SETTINGS_FILE))
}
