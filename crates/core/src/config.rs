use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::ReportLayout;
use crate::render::{OutputStyle, RenderBackend, DEFAULT_MAX_LOOP_DEPTH};

/// Summarizer settings. Every section falls back to its defaults, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummarizerConfig {
    pub layout: ReportLayout,
    pub render: RenderOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    pub style: OutputStyle,
    /// Deepest loop level printed; deeper loops are summarized as not shown.
    pub max_loop_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: OutputStyle::Plain,
            max_loop_depth: DEFAULT_MAX_LOOP_DEPTH,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("config file not found at {}", .0.display())]
    #[diagnostic(code(config::not_found))]
    NotFound(PathBuf),

    #[error("failed to parse config: {0}")]
    #[diagnostic(code(config::parse_error))]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    #[diagnostic(code(config::serialize_error))]
    SerializeError(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    #[diagnostic(code(config::io_error))]
    IoError(#[from] std::io::Error),
}

impl SummarizerConfig {
    /// load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn backend(&self) -> Box<dyn RenderBackend> {
        self.render.style.backend(self.render.max_loop_depth)
    }
}
