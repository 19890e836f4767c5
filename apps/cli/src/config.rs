//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VISTARA_OUTPUT_DIR=/tmp/bills                                      │
//! │     VISTARA_LOGO_PATH=./logo.png                                       │
//! │     VISTARA_SURFACE_WIDTH=800                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/vistara/vistara.toml (Linux)                             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     output_dir = ".", no logo, surface_width = 600                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # vistara.toml
//! output_dir = "bills"
//! logo_path = "assets/logo.png"
//! surface_width = 600
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use vistara_export::DEFAULT_SURFACE_WIDTH;

use crate::error::{CliError, CliResult};

/// Allowed logical widths for the rendered bill.
pub const SURFACE_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 200..=2000;

const CONFIG_FILE_NAME: &str = "vistara.toml";

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory the exported PDF is written to.
    pub output_dir: PathBuf,

    /// PNG/JPEG shown in the header instead of the logo placeholder.
    pub logo_path: Option<PathBuf>,

    /// Logical width of the rendered bill, in px.
    pub surface_width: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            output_dir: PathBuf::from("."),
            logo_path: None,
            surface_width: DEFAULT_SURFACE_WIDTH,
        }
    }
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicitly given file must exist; the default location is optional.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if !SURFACE_WIDTH_RANGE.contains(&self.surface_width) {
            return Err(CliError::InvalidConfig(format!(
                "surface_width must be within {}..={}, got {}",
                SURFACE_WIDTH_RANGE.start(),
                SURFACE_WIDTH_RANGE.end(),
                self.surface_width
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(CliError::InvalidConfig(
                "output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `VISTARA_*` overrides read through `lookup`.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("VISTARA_OUTPUT_DIR") {
            debug!(output_dir = %dir, "Overriding output directory from environment");
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(logo) = lookup("VISTARA_LOGO_PATH") {
            self.logo_path = Some(PathBuf::from(logo)).filter(|p| !p.as_os_str().is_empty());
        }

        if let Some(width) = lookup("VISTARA_SURFACE_WIDTH") {
            match width.parse::<u32>() {
                Ok(w) => self.surface_width = w,
                Err(_) => warn!(width = %width, "Ignoring non-numeric VISTARA_SURFACE_WIDTH"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vistara", "bill")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
