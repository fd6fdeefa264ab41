// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Color mode for progress characters (auto, always, never)
    #[serde(default = "default_color")]
    pub color: ColorMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// When to color the progress characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown color mode: {}", other)),
        }
    }
}

impl ColorMode {
    /// Resolve to a concrete on/off decision. `Auto` follows terminal detection.
    pub fn resolve(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::colors_enabled(),
        }
    }
}

// Default values
pub const ENV_DOTSPEC_COLOR: &str = "DOTSPEC_COLOR";

pub const CONFIG_FILE_NAME: &str = ".dotspecrc.toml";

fn default_color() -> ColorMode {
    ColorMode::Auto
}

/// Color mode from the environment, if set to a recognized value
pub fn env_color_mode() -> Option<ColorMode> {
    std::env::var(ENV_DOTSPEC_COLOR).ok()?.parse().ok()
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .dotspecrc.toml (current directory)
        // 2. ~/.dotspecrc.toml (home directory)
        let candidates = [std::env::current_dir().ok(), dirs::home_dir()];
        Self::load_first(candidates.iter().flatten())
    }

    /// Load the config file from the first directory that contains one
    pub fn load_first<'a>(dirs: impl IntoIterator<Item = &'a PathBuf>) -> Option<Self> {
        let path = dirs
            .into_iter()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.exists())?;
        Self::load_from_file(&path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Cannot read config file {}: {}", path.display(), e);
                return None;
            }
        };

        let config = Self::try_parse(&content);
        if let Err(ref e) = config {
            warn!("Ignoring invalid config file {}: {}", path.display(), e);
        }
        config.ok()
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        Self::try_parse(content).ok()
    }

    /// Parse configuration, keeping the error
    pub fn try_parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Effective color mode: flag, then config file, then environment, then default
    pub fn color_mode(config: Option<&Self>, flag: Option<ColorMode>) -> ColorMode {
        flag.or_else(|| config.map(|c| c.output.color))
            .or_else(env_color_mode)
            .unwrap_or_else(default_color)
    }
}
