// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Lyric dump cleaning.
//!
//! Converts scraped song records, where the lyrics are one text blob full of
//! section markers and page furniture, into a playable catalog. Alternate
//! versions (demos, live takes, remasters) collapse onto one entry.

use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Catalog, Song};

/// A scraped song with its lyrics as one text blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSong {
    pub title: String,
    #[serde(default)]
    pub lyrics: String,
}

/// Options for the cleaner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanOptions {
    /// Songs whose title contains one of these (case-insensitive) are dropped
    #[serde(default = "default_exclude_titles")]
    pub exclude_titles: Vec<String>,
    /// Lyric lines kept per song
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_exclude_titles() -> Vec<String> {
    vec!["jordan lake".to_string()]
}
fn default_max_lines() -> usize {
    5
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            exclude_titles: default_exclude_titles(),
            max_lines: default_max_lines(),
        }
    }
}

/// Result of a cleaning run
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    /// The cleaned catalog
    pub catalog: Catalog,
    /// Number of raw records read
    pub original_count: usize,
}

/// Marker found in the lyrics of instrumental tracks
const INSTRUMENTAL_MARKER: &str = "This song is an instrumental";

/// Title suffixes naming alternate versions of a song
const VERSION_SUFFIXES: [&str; 5] = [
    r"(?i)\s*\(Demo\).*",
    r"(?i)\s*\(Live.*?\).*",
    r"(?i)\s*- Live.*",
    r"(?i)\s*\(Remastered\).*",
    r"(?i)\s*\(Acoustic\).*",
];

/// Cleaner with its patterns compiled once
#[derive(Debug)]
pub struct LyricCleaner {
    options: CleanOptions,
    suffixes: Vec<Regex>,
    section_marker: Regex,
    line_number: Regex,
    header: Regex,
    embed: Regex,
    recommendations: Regex,
    blank_lines: Regex,
}

impl LyricCleaner {
    /// Create a cleaner with the given options
    pub fn new(options: CleanOptions) -> Result<Self> {
        let suffixes = VERSION_SUFFIXES
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid title suffix pattern")?;

        Ok(Self {
            options,
            suffixes,
            section_marker: Regex::new(r"\[.*?\]")?,
            line_number: Regex::new(r"(?m)^\d+\.?\s*")?,
            header: Regex::new(r"(?s)^.*?Lyrics")?,
            embed: Regex::new(r"\d*Embed\s*$")?,
            recommendations: Regex::new(r"(?s)You might also like.*")?,
            blank_lines: Regex::new(r"\n+")?,
        })
    }

    /// Strip version suffixes such as "(Live at ...)" from a title
    pub fn normalize_title(&self, title: &str) -> String {
        let mut normalized = title.to_string();
        for pattern in &self.suffixes {
            normalized = pattern.replace_all(&normalized, "").into_owned();
        }
        normalized.trim().to_string()
    }

    /// Reduce a lyric blob to its first lyric lines
    pub fn clean_lyrics(&self, lyrics: &str) -> Vec<String> {
        let text = self.section_marker.replace_all(lyrics, "");
        let text = self.line_number.replace_all(&text, "");
        let text = self.header.replace(&text, "");
        let text = self.embed.replace(&text, "");
        let text = self.recommendations.replace(&text, "");
        let text = self.blank_lines.replace_all(text.trim(), "\n");

        text.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.options.max_lines)
            .map(str::to_string)
            .collect()
    }

    fn is_excluded(&self, song: &RawSong) -> bool {
        let title = song.title.to_lowercase();
        self.options
            .exclude_titles
            .iter()
            .any(|phrase| title.contains(&phrase.to_lowercase()))
            || song.lyrics.contains(INSTRUMENTAL_MARKER)
    }

    /// Clean a whole dump into a catalog
    ///
    /// Versions sharing a normalized title keep the one with the shortest
    /// raw title; the first one wins ties. Songs left without lyrics are
    /// dropped.
    pub fn clean(&self, raw: Vec<RawSong>) -> Result<CleanReport> {
        let original_count = raw.len();
        let mut order: Vec<String> = Vec::new();
        let mut best: HashMap<String, RawSong> = HashMap::new();

        for song in raw {
            if self.is_excluded(&song) {
                debug!(title = %song.title, "excluded");
                continue;
            }
            let key = self.normalize_title(&song.title);
            if key.is_empty() {
                continue;
            }

            let replace = match best.get(&key) {
                Some(current) => song.title.chars().count() < current.title.chars().count(),
                None => {
                    order.push(key.clone());
                    true
                }
            };
            if replace {
                best.insert(key, song);
            }
        }

        let mut songs = Vec::with_capacity(order.len());
        for key in order {
            let Some(version) = best.remove(&key) else {
                continue;
            };
            let lyrics = self.clean_lyrics(&version.lyrics);
            if lyrics.is_empty() {
                debug!(title = %version.title, "no lyrics after cleaning");
                continue;
            }
            songs.push(Song::new(version.title.trim(), lyrics));
        }

        let catalog = Catalog::new(songs)?;
        info!(
            original = original_count,
            cleaned = catalog.len(),
            "lyric dump cleaned"
        );
        Ok(CleanReport {
            catalog,
            original_count,
        })
    }

    /// Parse a JSON dump and clean it
    pub fn clean_json(&self, json: &str) -> Result<CleanReport> {
        let raw: Vec<RawSong> = serde_json::from_str(json).context("Failed to parse lyric dump")?;
        self.clean(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> LyricCleaner {
        LyricCleaner::new(CleanOptions::default()).unwrap()
    }

    fn raw(title: &str, lyrics: &str) -> RawSong {
        RawSong {
            title: title.to_string(),
            lyrics: lyrics.to_string(),
        }
    }

    #[test]
    fn test_normalize_title() {
        let c = cleaner();
        assert_eq!(c.normalize_title("This Year (Demo)"), "This Year");
        assert_eq!(c.normalize_title("This Year (Live at the Bowery)"), "This Year");
        assert_eq!(c.normalize_title("This Year - Live 2005"), "This Year");
        assert_eq!(c.normalize_title("No Children (remastered)"), "No Children");
        assert_eq!(c.normalize_title("Up the Wolves (Acoustic) [Bonus]"), "Up the Wolves");
        assert_eq!(c.normalize_title("  Dance Music "), "Dance Music");
    }

    #[test]
    fn test_clean_lyrics() {
        let c = cleaner();
        let blob = "12 ContributorsThis Year Lyrics[Verse 1]\n\
                    I broke free on a Saturday morning\n\n\
                    I put the pedal to the floor\n\
                    [Chorus]\n\
                    I am going to make it through this year\n\
                    You might also like\nSomething else entirely\n42Embed";

        assert_eq!(
            c.clean_lyrics(blob),
            vec![
                "I broke free on a Saturday morning".to_string(),
                "I put the pedal to the floor".to_string(),
                "I am going to make it through this year".to_string(),
            ]
        );
    }

    #[test]
    fn test_clean_lyrics_keeps_first_lines() {
        let c = cleaner();
        let blob = "Song Lyrics\na\nb\nc\nd\ne\nf\ng";
        assert_eq!(c.clean_lyrics(blob).len(), 5);
        assert_eq!(c.clean_lyrics(blob)[0], "a");
    }

    #[test]
    fn test_clean_dump() {
        let c = cleaner();
        let dump = vec![
            raw("This Year (Live at the Bowery)", "This Year Lyrics\nlive line"),
            raw("This Year", "This Year Lyrics\nstudio line"),
            raw("This Year (Demo)", "This Year Lyrics\ndemo line"),
            raw("Jordan Lake Sessions Intro", "Lyrics\nspoken"),
            raw("Song for Dennis Brown", "1 ContributorsThis song is an instrumental"),
            raw("Blank", "Blank Lyrics\n[Intro]\n"),
            raw("No Children", "No Children Lyrics\nI hope that our few remaining friends"),
        ];

        let report = c.clean(dump).unwrap();
        assert_eq!(report.original_count, 7);

        let songs = report.catalog.songs();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "This Year");
        assert_eq!(songs[0].lyrics, vec!["studio line".to_string()]);
        assert_eq!(songs[1].title, "No Children");
    }

    #[test]
    fn test_clean_json() {
        let c = LyricCleaner::new(CleanOptions {
            exclude_titles: Vec::new(),
            max_lines: 1,
        })
        .unwrap();
        let json = r#"[{"title": "Jordan Lake", "lyrics": "Jordan Lake Lyrics\nfirst\nsecond"}]"#;

        let report = c.clean_json(json).unwrap();
        assert_eq!(report.catalog.songs()[0].lyrics, vec!["first".to_string()]);
    }
}
