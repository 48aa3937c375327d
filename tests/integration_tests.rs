// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for lyricguess
//!
//! These tests drive the public API the way the terminal frontend does:
//! load a catalog, run rounds through the engine and the session.

use std::fs;

use crossterm::event::{KeyCode, KeyModifiers};
use lyricguess::catalog::{Catalog, LyricCleaner, CleanOptions, Song};
use lyricguess::config::AppConfig;
use lyricguess::engine::{GuessOutcome, Mode, RoundEngine, MAX_STRIKES};
use lyricguess::ui::{Screen, Session, Transition};

fn lines(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("l{}", i)).collect()
}

fn no_children() -> Catalog {
    Catalog::new(vec![Song::new("No Children", lines(4))]).unwrap()
}

fn mixed_catalog() -> Catalog {
    Catalog::new(vec![
        Song::new("No Children", lines(4)),
        Song::new("This Year", lines(2)),
        Song::new("Up the Wolves", lines(6)),
        Song::new("Woke Up New", lines(1)),
    ])
    .unwrap()
}

/// Start invariants hold for every mode
#[test]
fn test_start_invariants_all_modes() {
    for mode in Mode::ALL {
        for seed in 0..5 {
            let mut engine = RoundEngine::with_seed(mixed_catalog(), seed);
            engine.start(mode).unwrap();

            let state = engine.state();
            assert_eq!(state.time_remaining, mode.initial_time());
            assert_eq!(state.score, 0);
            assert_eq!(state.revealed_count, 1);
            assert!(!state.is_over);
        }
    }
}

/// Four wrong guesses reveal all lines, the fifth moves on
#[test]
fn test_no_children_strike_scenario() {
    let mut engine = RoundEngine::with_seed(no_children(), 11);
    engine.start(Mode::OneMinute).unwrap();
    assert_eq!(engine.state().time_remaining, 60);
    assert_eq!(engine.state().revealed_count, 1);

    for _ in 0..4 {
        engine.submit_guess("wrong");
    }
    assert_eq!(engine.state().time_remaining, 56);
    assert_eq!(engine.state().revealed_count, 4);
    assert_eq!(engine.state().incorrect_guesses, 4);

    let outcome = engine.submit_guess("wrong");
    assert_eq!(
        outcome,
        GuessOutcome::Forfeited {
            title: "No Children".to_string()
        }
    );
    assert_eq!(engine.state().incorrect_guesses, 0);
    assert_eq!(engine.state().revealed_count, 1);
    assert_eq!(engine.state().time_remaining, 55);
}

/// Guesses are trimmed and case-folded
#[test]
fn test_trimmed_case_insensitive_match() {
    let mut engine = RoundEngine::with_seed(no_children(), 2);
    engine.start(Mode::OneMinute).unwrap();

    let outcome = engine.submit_guess(" NO CHILDREN ");
    assert!(matches!(outcome, GuessOutcome::Correct { .. }));
    assert_eq!(engine.state().score, 1);
}

/// The last tick ends the round and later ticks do nothing
#[test]
fn test_tick_from_one_second() {
    let mut engine = RoundEngine::with_seed(no_children(), 5);
    engine.start(Mode::ThirtySeconds).unwrap();
    while engine.state().time_remaining > 1 {
        engine.tick();
    }

    assert!(engine.tick());
    assert_eq!(engine.state().time_remaining, 0);
    assert!(engine.state().is_over);

    let after = engine.state().clone();
    for _ in 0..3 {
        assert!(!engine.tick());
    }
    assert_eq!(engine.state(), &after);
}

/// Nothing changes a finished round except starting again or going home
#[test]
fn test_finished_round_is_frozen() {
    let mut engine = RoundEngine::with_seed(mixed_catalog(), 8);
    engine.start(Mode::ThirtySeconds).unwrap();
    for _ in 0..30 {
        engine.tick();
    }
    assert!(engine.state().is_over);
    let frozen = engine.state().clone();

    let title = frozen.current_song.as_ref().map(|s| s.title.clone()).unwrap();
    assert_eq!(engine.submit_guess(&title), GuessOutcome::Ignored);
    assert_eq!(engine.submit_guess("wrong"), GuessOutcome::Ignored);
    assert!(!engine.skip());
    assert!(!engine.tick());
    assert_eq!(engine.state(), &frozen);

    engine.start(Mode::OneMinute).unwrap();
    assert!(!engine.state().is_over);
}

/// Long random play keeps every bound
#[test]
fn test_random_play_keeps_bounds() {
    let catalog = mixed_catalog();
    let titles: Vec<String> = catalog.titles().map(str::to_string).collect();

    for seed in 0..10u64 {
        let mut engine = RoundEngine::with_seed(catalog.clone(), seed);
        engine.start(Mode::OneMinute).unwrap();
        let budget = Mode::OneMinute.initial_time();

        for step in 0..400u64 {
            let before = engine.state().clone();
            match (step * 7 + seed) % 5 {
                0 => {
                    let title = before.current_song.as_ref().map(|s| s.title.clone()).unwrap();
                    engine.submit_guess(&title);
                    if !before.is_over {
                        assert_eq!(engine.state().score, before.score + 1);
                        assert!(engine.state().time_remaining >= before.time_remaining);
                    }
                }
                1 | 2 => {
                    let guess = format!("{} nope", titles[(step as usize) % titles.len()]);
                    engine.submit_guess(&guess);
                    let state = engine.state();
                    if state.current_song == before.current_song && state.incorrect_guesses > 0 {
                        assert!(state.revealed_count >= before.revealed_count);
                    }
                }
                3 => {
                    engine.skip();
                }
                _ => {
                    engine.tick();
                }
            }

            let state = engine.state();
            let song = state.current_song.as_ref().unwrap();
            assert!(state.time_remaining <= budget);
            assert!(state.revealed_count >= 1);
            assert!(state.revealed_count <= song.lyrics.len());
            assert!(state.incorrect_guesses < MAX_STRIKES);
            if state.is_over {
                assert_eq!(state.time_remaining, 0);
            }
        }
    }
}

/// Empty catalogs are reported, not ignored
#[test]
fn test_empty_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "[]").unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let mut engine = RoundEngine::with_seed(catalog, 0);
    let err = engine.start(Mode::OneMinute).unwrap_err();
    assert_eq!(err.to_string(), "cannot start a round: the song catalog is empty");
    assert_eq!(engine.state().mode, None);
}

/// Config, catalog file and session together
#[test]
fn test_config_to_session_flow() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("songs.yaml");
    fs::write(
        &catalog_path,
        "- title: Going to Georgia\n  lyrics: [\"The most remarkable thing about you\"]\n",
    )
    .unwrap();
    let config_path = dir.path().join("lyricguess.toml");
    fs::write(
        &config_path,
        format!(
            "catalog = {:?}\ndefault_mode = \"30s\"\nsuggestion_limit = 1\n",
            catalog_path.to_string_lossy()
        ),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    let catalog = config.load_catalog().unwrap();
    let mut session = Session::new(RoundEngine::with_seed(catalog, 1))
        .with_suggestion_limit(config.suggestion_limit)
        .with_default_mode(config.default_mode.unwrap());

    assert_eq!(
        session.handle_key(KeyCode::Enter, KeyModifiers::NONE),
        Transition::RoundStarted
    );
    assert_eq!(session.engine().state().time_remaining, 30);

    for c in "going".chars() {
        session.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
    }
    assert_eq!(session.ui().suggestions, vec!["Going to Georgia".to_string()]);
    session.handle_key(KeyCode::Tab, KeyModifiers::NONE);
    session.handle_key(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(session.engine().state().score, 1);

    let mut last = Transition::Stay;
    while session.screen() == Screen::Round {
        last = session.on_tick();
    }
    assert_eq!(last, Transition::RoundFinished);
    assert_eq!(session.screen(), Screen::GameOver);
    assert_eq!(session.engine().snapshot().score, 1);
}

/// A raw dump cleaned into a file can be played
#[test]
fn test_clean_then_play() {
    let raw = r#"[
        {"title": "Cotton (Live)", "lyrics": "Cotton Lyrics\n[Verse 1]\nI had a friend\nHe had a house"},
        {"title": "Cotton", "lyrics": "Cotton Lyrics\n[Verse 1]\n1. Fell asleep\n2. On the porch\nYou might also like\nAd copy\n7Embed"},
        {"title": "Jordan Lake Sessions: Intro", "lyrics": "Lyrics\nhello"}
    ]"#;

    let cleaner = LyricCleaner::new(CleanOptions::default()).unwrap();
    let report = cleaner.clean_json(raw).unwrap();
    assert_eq!(report.original_count, 3);
    assert_eq!(report.catalog.len(), 1);
    assert_eq!(
        report.catalog.songs()[0].lyrics,
        vec!["Fell asleep".to_string(), "On the porch".to_string()]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleaned.json");
    report.catalog.save(&path).unwrap();

    let mut engine = RoundEngine::with_seed(Catalog::load(&path).unwrap(), 4);
    engine.start(Mode::FiveMinutes).unwrap();
    assert_eq!(engine.revealed_lyrics(), &["Fell asleep".to_string()]);
    assert!(matches!(engine.submit_guess("cotton"), GuessOutcome::Correct { .. }));
}
