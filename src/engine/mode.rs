// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Round modes and their time budgets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Round length selected on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// 30 second round
    #[serde(rename = "30s", alias = "30sec")]
    ThirtySeconds,
    /// 1 minute round
    #[serde(rename = "1m", alias = "1min")]
    OneMinute,
    /// 5 minute round
    #[serde(rename = "5m", alias = "5min")]
    FiveMinutes,
}

impl Mode {
    /// All modes in menu order
    pub const ALL: [Mode; 3] = [Mode::ThirtySeconds, Mode::OneMinute, Mode::FiveMinutes];

    /// Initial time budget in whole seconds
    pub fn initial_time(&self) -> u32 {
        match self {
            Mode::ThirtySeconds => 30,
            Mode::OneMinute => 60,
            Mode::FiveMinutes => 300,
        }
    }

    /// Label for menus
    pub fn label(&self) -> &'static str {
        match self {
            Mode::ThirtySeconds => "30 Seconds",
            Mode::OneMinute => "1 Minute",
            Mode::FiveMinutes => "5 Minutes",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a mode name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode {0:?} (expected 30s, 1m or 5m)")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "30s" | "30sec" | "30" => Ok(Mode::ThirtySeconds),
            "1m" | "1min" | "60" => Ok(Mode::OneMinute),
            "5m" | "5min" | "300" => Ok(Mode::FiveMinutes),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_times() {
        assert_eq!(Mode::ThirtySeconds.initial_time(), 30);
        assert_eq!(Mode::OneMinute.initial_time(), 60);
        assert_eq!(Mode::FiveMinutes.initial_time(), 300);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("30s".parse::<Mode>().unwrap(), Mode::ThirtySeconds);
        assert_eq!("1MIN".parse::<Mode>().unwrap(), Mode::OneMinute);
        assert_eq!(" 5m ".parse::<Mode>().unwrap(), Mode::FiveMinutes);
        assert!("10m".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: Mode,
        }

        let parsed: Wrapper = toml::from_str("mode = \"1min\"").unwrap();
        assert_eq!(parsed.mode, Mode::OneMinute);
        let parsed: Wrapper = toml::from_str("mode = \"30s\"").unwrap();
        assert_eq!(parsed.mode, Mode::ThirtySeconds);
    }
}
