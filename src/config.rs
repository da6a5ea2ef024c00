
use {
    serde::Deserialize,
    std::{io, path::Path},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read the config file")]
    Read(#[source] io::Error),
    #[error("Could not parse the config")]
    Parse(#[source] serde_json::Error),
}

/// Rule names from which the global keymap is compiled.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeymapNames {
    pub rules: String,
    pub model: String,
    pub layout: String,
    pub variant: String,
    pub options: String,
}

impl Default for KeymapNames {
    fn default() -> Self {
        Self {
            rules: "evdev".to_string(),
            model: "pc105".to_string(),
            layout: "us".to_string(),
            variant: String::new(),
            options: String::new(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeatConfig {
    pub name: String,
    pub keymap: KeymapNames,
    pub repeat_rate: i32,
    pub repeat_delay: i32,
    pub pointer_start: (i32, i32),
    pub cursor_hotspot: (i32, i32),
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self {
            name: "seat0".to_string(),
            keymap: Default::default(),
            repeat_rate: 25,
            repeat_delay: 600,
            pointer_start: (100, 100),
            cursor_hotspot: (16, 16),
        }
    }
}

impl SeatConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded seat config from {}", path.display());
        Ok(config)
    }
}
