// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for lyricguess.
//!
//! This module provides the application settings loaded from a TOML file:
//! where the catalog lives, clock and frame timing, logging and the
//! options for the lyric dump cleaner.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CleanOptions, DEFAULT_SUGGESTIONS};
use crate::engine::Mode;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "lyricguess.toml";

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Song catalog file (JSON or YAML); the built-in songs if absent
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Mode highlighted on the home screen
    #[serde(default)]
    pub default_mode: Option<Mode>,
    /// Milliseconds per clock tick
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Maximum title suggestions shown while typing
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Terminal redraw rate
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Lyric dump cleaner settings
    #[serde(default)]
    pub clean: CleanOptions,
}

fn default_tick_ms() -> u64 {
    1000
}
fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTIONS
}
fn default_frame_rate() -> u32 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            default_mode: None,
            tick_ms: default_tick_ms(),
            suggestion_limit: default_suggestion_limit(),
            frame_rate: default_frame_rate(),
            logging: LoggingConfig::default(),
            clean: CleanOptions::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the given file, else the default file if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Check values that parse but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(anyhow!("tick_ms must be greater than zero"));
        }
        if self.frame_rate == 0 {
            return Err(anyhow!("frame_rate must be greater than zero"));
        }
        self.logging.level()?;
        Ok(())
    }

    /// Clock tick period
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Load the configured catalog, or the built-in songs
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log file; logging is off when absent since the terminal is taken
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Maximum level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parsed maximum level
    pub fn level(&self) -> Result<tracing::Level> {
        self.level
            .parse()
            .map_err(|_| anyhow!("Invalid log level: {:?}", self.level))
    }
}
