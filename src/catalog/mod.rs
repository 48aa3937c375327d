// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song catalog.
//!
//! This module provides the song records the game draws from, loading
//! from JSON or YAML files, title suggestions for the guess input and
//! the cleaner that builds a catalog from a raw lyric dump.

pub mod clean;

pub use clean::{CleanOptions, CleanReport, LyricCleaner, RawSong};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of title suggestions
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// A song that can be guessed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Song {
    /// Title the player has to type
    pub title: String,
    /// Lyric lines in order
    pub lyrics: Vec<String>,
}

impl Song {
    /// Create a new song
    pub fn new(title: impl Into<String>, lyrics: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lyrics,
        }
    }
}

/// Reasons a song record is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("song {index} has an empty title")]
    EmptyTitle { index: usize },
    #[error("song {index} ({title:?}) has no lyric lines")]
    NoLyrics { index: usize, title: String },
    #[error("song {index} ({title:?}) has an empty lyric line at {line}")]
    EmptyLine {
        index: usize,
        title: String,
        line: usize,
    },
}

/// Immutable set of songs, in file order
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Build a catalog, validating every song
    pub fn new(songs: Vec<Song>) -> Result<Self, CatalogError> {
        for (index, song) in songs.iter().enumerate() {
            if song.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { index });
            }
            if song.lyrics.is_empty() {
                return Err(CatalogError::NoLyrics {
                    index,
                    title: song.title.clone(),
                });
            }
            if let Some(line) = song.lyrics.iter().position(|l| l.trim().is_empty()) {
                return Err(CatalogError::EmptyLine {
                    index,
                    title: song.title.clone(),
                    line,
                });
            }
        }
        Ok(Self { songs })
    }

    /// The sample songs used when no catalog file is configured
    pub fn builtin() -> Self {
        let songs = vec![
            Song::new(
                "This Year",
                vec![
                    "I broke free on a Saturday morning".to_string(),
                    "I put the pedal to the floor".to_string(),
                    "Headed north on Mills Avenue".to_string(),
                    "And listened to the engine roar".to_string(),
                ],
            ),
            Song::new(
                "No Children",
                vec![
                    "I hope that our few remaining friends".to_string(),
                    "Give up on trying to save us".to_string(),
                    "I hope we come up with a fail-safe plot".to_string(),
                    "To piss off the dumb few that forgave us".to_string(),
                ],
            ),
        ];
        Self { songs }
    }

    /// Load a catalog file, YAML for `.yaml`/`.yml` and JSON otherwise
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let catalog = if is_yaml {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        };
        catalog.with_context(|| format!("Invalid catalog file: {:?}", path))
    }

    /// Parse a catalog from a JSON array of songs
    pub fn from_json(json: &str) -> Result<Self> {
        let songs: Vec<Song> = serde_json::from_str(json).context("Failed to parse JSON catalog")?;
        Ok(Self::new(songs)?)
    }

    /// Parse a catalog from a YAML sequence of songs
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let songs: Vec<Song> = serde_yaml::from_str(yaml).context("Failed to parse YAML catalog")?;
        Ok(Self::new(songs)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")
    }

    /// Save the catalog as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write catalog file: {:?}", path.as_ref()))
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.songs.iter().map(|s| s.title.as_str())
    }

    /// Up to `limit` titles starting with `prefix`, ignoring case
    ///
    /// A blank prefix suggests nothing.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<&str> {
        if prefix.trim().is_empty() {
            return Vec::new();
        }
        let needle = prefix.to_lowercase();
        self.titles()
            .filter(|title| title.to_lowercase().starts_with(&needle))
            .take(limit)
            .collect()
    }
}
