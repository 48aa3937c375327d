// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use lyricguess::catalog::{Catalog, LyricCleaner};
use lyricguess::config::{AppConfig, LoggingConfig};
use lyricguess::engine::{Mode, RoundEngine};
use lyricguess::timing::Ticker;
use lyricguess::ui::{App, Session};
use tracing::info;

fn print_usage() {
    println!("lyricguess - Lyric Guessing Game");
    println!();
    println!("Usage: lyricguess [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --catalog <PATH>      Song catalog (JSON, or YAML with .yaml/.yml)");
    println!("  --config <PATH>       Configuration file (default: lyricguess.toml)");
    println!("  --mode <MODE>         Start a round right away (30s, 1m, 5m)");
    println!("  --seed <N>            Seed song selection");
    println!("  --list                List catalog titles and exit");
    println!("  --clean <RAW> <OUT>   Clean a raw lyric dump into a catalog");
    println!("  --help                Show this help message");
}

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
    mode: Option<Mode>,
    seed: Option<u64>,
    list: bool,
    clean: Option<(PathBuf, PathBuf)>,
    help: bool,
}

fn value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--catalog" => cli.catalog = Some(PathBuf::from(value(&mut iter, "--catalog")?)),
            "--config" => cli.config = Some(PathBuf::from(value(&mut iter, "--config")?)),
            "--mode" => {
                let mode = value(&mut iter, "--mode")?;
                cli.mode = Some(mode.parse()?);
            }
            "--seed" => {
                let seed = value(&mut iter, "--seed")?;
                cli.seed = Some(
                    seed.parse()
                        .map_err(|_| anyhow!("Invalid seed: {}", seed))?,
                );
            }
            "--list" => cli.list = true,
            "--clean" => {
                let raw = value(&mut iter, "--clean")?;
                let out = value(&mut iter, "--clean")?;
                cli.clean = Some((PathBuf::from(raw), PathBuf::from(out)));
            }
            "--help" | "-h" => cli.help = true,
            other => return Err(anyhow!("Unknown option: {}", other)),
        }
    }

    Ok(cli)
}

/// Send tracing output to the configured log file
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.level()?)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}

fn list_titles(catalog: &Catalog) {
    println!("{} songs:", catalog.len());
    for title in catalog.titles() {
        println!("  {}", title);
    }
}

fn clean_dump(raw: &Path, out: &Path, config: &AppConfig) -> Result<()> {
    let json = fs::read_to_string(raw)
        .with_context(|| format!("Failed to read lyric dump: {:?}", raw))?;
    let cleaner = LyricCleaner::new(config.clean.clone())?;
    let report = cleaner.clean_json(&json)?;
    report.catalog.save(out)?;

    println!(
        "Cleaned data saved to {:?}. Original count: {}, Cleaned count: {}",
        out,
        report.original_count,
        report.catalog.len()
    );
    Ok(())
}

async fn play(cli: &CliArgs, config: &AppConfig) -> Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => config.load_catalog()?,
    };
    info!(songs = catalog.len(), "catalog loaded");

    let engine = match cli.seed {
        Some(seed) => RoundEngine::with_seed(catalog, seed),
        None => RoundEngine::new(catalog),
    };
    let mut session = Session::new(engine).with_suggestion_limit(config.suggestion_limit);
    if let Some(mode) = config.default_mode {
        session = session.with_default_mode(mode);
    }
    if let Some(mode) = cli.mode {
        session.start(mode);
    }

    let mut app = App::new(session, Ticker::new(config.tick_period()))
        .context("Failed to set up terminal")?;
    app.set_frame_rate(config.frame_rate);
    app.run().await
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if cli.help {
        print_usage();
        return Ok(());
    }

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    if let Some((raw, out)) = &cli.clean {
        return clean_dump(raw, out, &config);
    }

    if cli.list {
        let catalog = match &cli.catalog {
            Some(path) => Catalog::load(path)?,
            None => config.load_catalog()?,
        };
        list_titles(&catalog);
        return Ok(());
    }

    play(&cli, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&args(&["--catalog", "songs.json", "--mode", "5m", "--seed", "9"])).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("songs.json")));
        assert_eq!(cli.mode, Some(Mode::FiveMinutes));
        assert_eq!(cli.seed, Some(9));
        assert!(!cli.list);

        let cli = parse_args(&args(&["--clean", "raw.json", "out.json"])).unwrap();
        assert_eq!(
            cli.clean,
            Some((PathBuf::from("raw.json"), PathBuf::from("out.json")))
        );

        assert_eq!(parse_args(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--mode"])).is_err());
        assert!(parse_args(&args(&["--mode", "forever"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--clean", "raw.json"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }
}
