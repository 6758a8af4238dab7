//! Sheet configuration.
//!
//! Loaded from `config.toml` in the user's config directory
//! (e.g. `~/.config/gridcalc/config.toml`):
//!
//! ```toml
//! formula_marker = "="
//! escape_marker = "'"
//! ```

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SheetError};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

/// Leading-character conventions for cell input.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Text starting with this character (and longer than it) is a formula.
    pub formula_marker: char,
    /// Text starting with this character is literal; the marker is hidden from
    /// the displayed value but kept in the stored text.
    pub escape_marker: char,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            formula_marker: '=',
            escape_marker: '\'',
        }
    }
}

impl SheetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SheetConfig =
            toml::from_str(content).map_err(|err| SheetError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Oversized files are refused.
    pub fn load(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(SheetError::Config(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the user's config file, or the defaults when there is none.
    pub fn load_default() -> Result<Self> {
        match user_config_path() {
            Some(path) if path.exists() => {
                log::debug!("loading sheet config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.formula_marker == self.escape_marker {
            return Err(SheetError::Config(format!(
                "formula_marker and escape_marker must differ (both are {:?})",
                self.formula_marker
            )));
        }
        if self.formula_marker.is_whitespace() || self.escape_marker.is_whitespace() {
            return Err(SheetError::Config(
                "markers must not be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
