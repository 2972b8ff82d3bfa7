//! CLI commands for the program service.
//!
//! Supports server mode plus one-shot fetch and leaderboard commands.

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::generate;
use crate::leaderboard::{compute_leaderboard, WinPolicy};
use crate::pipeline;
use crate::reference;
use crate::scraper::ProgramFetcher;
use crate::types::{JockeyStat, Race, RaceDay};

#[derive(Parser)]
#[command(name = "sluzewiec-api")]
#[command(version, about = "Tor Służewiec race program scraper and API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Fetch the current race program once and print it
    Fetch {
        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Only print one card
        #[arg(short, long, value_enum)]
        day: Option<RaceDay>,
    },

    /// Compute the jockey leaderboard
    Leaderboard {
        /// Number of jockeys to keep
        #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..=20))]
        limit: u32,

        /// Win attribution policy (deterministic, simulated)
        #[arg(short = 'w', long, value_enum)]
        policy: Option<WinPolicy>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Print the season standings table instead of aggregating the
        /// fetched program
        #[arg(long)]
        season: bool,
    },
}

/// Fetch the program through the full fallback chain and print it.
pub async fn run_fetch(format: String, day: Option<RaceDay>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let fetcher = ProgramFetcher::new(config.source.clone())?;
    let mut rng = generate::rng_from(config.generator.seed);

    eprintln!("Fetching program from: {}", config.source.program_url);
    let program = pipeline::fetch_race_program(&fetcher, &config, &mut rng).await;
    eprintln!(
        "Got {} races via {:?}{}",
        program.races.len(),
        program.source,
        if program.is_degraded() { " (demo data)" } else { "" }
    );

    let races = match day {
        Some(day) => program.races_for_day(day),
        None => program.races,
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&races)?);
    } else {
        print_race_table(&races);
    }

    Ok(())
}

/// Compute and print the leaderboard.
pub async fn run_leaderboard(
    limit: u32,
    policy: Option<WinPolicy>,
    format: String,
    season: bool,
) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let jockeys = if season {
        reference::top_jockeys(limit as usize)
    } else {
        let fetcher = ProgramFetcher::new(config.source.clone())?;
        let mut rng = generate::rng_from(config.generator.seed);

        eprintln!("Fetching program from: {}", config.source.program_url);
        let program = pipeline::fetch_race_program(&fetcher, &config, &mut rng).await;
        eprintln!("Got {} races via {:?}", program.races.len(), program.source);

        let policy = policy.unwrap_or(config.leaderboard.win_policy);
        compute_leaderboard(&program.races, limit as usize, policy, &mut rng)
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&jockeys)?);
    } else {
        print_leaderboard_table(&jockeys);
    }

    Ok(())
}

fn print_race_table(races: &[Race]) {
    println!(
        "{:<8} {:<6} {:<9} {:<10} {:<12} {:<6} Tytuł",
        "Dzień", "Start", "Dystans", "Nagroda", "Nawierzchnia", "Konie"
    );
    for race in races {
        let day = match race.day {
            RaceDay::Tomorrow => "jutro",
            RaceDay::Sunday => "niedz.",
        };
        println!(
            "{:<8} {:<6} {:<9} {:<10} {:<12} {:<6} {}",
            day,
            race.time,
            race.distance,
            race.prize,
            race.surface.to_string(),
            race.horses.len(),
            race.title
        );
    }
}

fn print_leaderboard_table(jockeys: &[JockeyStat]) {
    println!(
        "{:<4} {:<20} {:>6} {:>6} {:>8} {:>12}",
        "#", "Dżokej", "Jazdy", "Wygr.", "Skut.", "Nagrody"
    );
    for (i, jockey) in jockeys.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:>6} {:>6} {:>7}% {:>9} zł",
            i + 1,
            jockey.name,
            jockey.races,
            jockey.wins,
            jockey.win_rate,
            jockey.earnings
        );
    }
}
