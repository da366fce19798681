//! Viewer configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `cubeview.toml` in the working directory (optional)
//! 3. Environment variables (`CUBEVIEW_SECTION__KEY`)
//!
//! Drag sensitivity is fixed and intentionally absent from this file.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cubeview.toml";
pub const ENV_PREFIX: &str = "CUBEVIEW_";

/// Main viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub puzzle: PuzzleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ViewerConfig {
    /// Load `cubeview.toml` from the working directory plus `CUBEVIEW_*` overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file; a missing file is not an error
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let mut figment = Figment::from(Serialized::defaults(ViewerConfig::default()));

        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }

        // CUBEVIEW_PUZZLE__LAYERS=4 -> puzzle.layers = 4
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Like [`ViewerConfig::load_from`], but invalid sources fall back to defaults
    ///
    /// The error is handed back so it can be reported once logging is up.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<ConfigError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

/// Frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Target frames per second
    pub fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { fps: 30 }
    }
}

/// Conversion from terminal cells to pointer pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Width of one terminal cell in pixels
    pub cell_width: f64,
    /// Height of one terminal cell in pixels
    pub cell_height: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

/// Shape of the displayed puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Cubies per edge
    pub layers: u32,
    /// Edge length in world units
    pub size: f32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            layers: 3,
            size: 3.0,
        }
    }
}

/// Logger settings
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "cubeview_core=debug"). When unset, `RUST_LOG` is consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    /// Log destination; the terminal itself is busy drawing
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            file: PathBuf::from("cubeview.log"),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
