// Layoutfix Settings Module
// Persisted layout pair, hotkey and startup preference

use std::path::{Path, PathBuf};

/// User settings persisted between runs.
///
/// Loaded from a TOML file (default: ~/.config/layoutfix/settings.toml).
/// The core never reads these implicitly; the presentation layer loads
/// them and passes layout identifiers into the engine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// First candidate layout identifier
    #[serde(default = "default_layout_a")]
    pub layout_a: String,

    /// Second candidate layout identifier
    #[serde(default = "default_layout_b")]
    pub layout_b: String,

    /// Hotkey string registered by the presentation layer
    #[serde(default = "default_hotkey")]
    pub hotkey: String,

    /// Whether the presentation layer registers itself to run at startup
    #[serde(default)]
    pub run_at_startup: bool,

    /// Path the settings were loaded from (for reload/save)
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

fn default_layout_a() -> String {
    "he-IL".to_string()
}

fn default_layout_b() -> String {
    "en-US".to_string()
}

fn default_hotkey() -> String {
    "F9".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout_a: default_layout_a(),
            layout_b: default_layout_b(),
            hotkey: default_hotkey(),
            run_at_startup: false,
            source_path: None,
        }
    }
}

/// Errors that can occur when loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::InvalidValue(e.to_string()))
    }

    /// Default settings path: ~/.config/layoutfix/settings.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("layoutfix").join("settings.toml"))
    }

    /// Load settings from the default location, falling back to defaults
    /// when no file exists yet.
    pub fn load_default() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                let mut settings = Self::new();
                settings.source_path = Some(path);
                Ok(settings)
            }
            None => Ok(Self::new()),
        }
    }

    /// Write the settings back to the file they were loaded from
    pub fn save(&self) -> Result<(), SettingsError> {
        match &self.source_path {
            Some(path) => self.save_to(path),
            None => Err(SettingsError::InvalidValue("No source path set".to_string())),
        }
    }

    /// Write the settings to an explicit path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Re-read the settings from their source file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        match self.source_path.clone() {
            Some(path) => {
                *self = Self::from_file(path)?;
                Ok(())
            }
            None => Err(SettingsError::InvalidValue("No source path set".to_string())),
        }
    }
}
