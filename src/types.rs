//! Core records for the race program pipeline and API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Program day a race belongs to. The track publishes two cards at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RaceDay {
    Tomorrow,
    Sunday,
}

/// Race lifecycle state. The pipeline only ever produces `Upcoming`;
/// the other variants exist for the secondary API, which reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RaceStatus {
    Upcoming,
    InProgress,
    Finished,
}

/// Track surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Turf,
    AllWeather,
    Cinder,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Surface::Turf => "Trawa",
            Surface::AllWeather => "Syntetyczna",
            Surface::Cinder => "Żużel",
        };
        f.write_str(label)
    }
}

/// One entrant in a race.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Horse {
    /// Starting number, 1-based within the race.
    pub number: u32,
    pub name: String,
    pub jockey: String,
    /// Carried weight in kilograms; 0 means not applicable (harness racing).
    pub weight_kg: u32,
    /// Win odds, one fractional digit.
    pub odds: String,
    pub owner: String,
    pub trainer: String,
    pub age: u32,
    /// Recent finishing positions, most recent last, e.g. "1-2-1".
    pub form: String,
    /// Demo finishing position; feeds the deterministic win policy only.
    pub position: u32,
}

/// One race of the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    /// Unique within a single fetch cycle.
    pub id: String,
    pub day: RaceDay,
    /// Scheduled start, `H:MM`/`HH:MM` 24-hour text.
    pub time: String,
    pub title: String,
    /// Distance with unit suffix, e.g. "1400m".
    pub distance: String,
    /// Prize as published by the source, preserved verbatim when scraped.
    pub prize: String,
    pub status: RaceStatus,
    pub venue: String,
    pub surface: Surface,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Empty means "starting list not yet available", not an error.
    pub horses: Vec<Horse>,
}

/// Where the displayed program came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Scraped from the live program page.
    Live,
    /// Loaded from the secondary structured API.
    SecondaryApi,
    /// Generated from the name pools.
    Synthetic,
    /// Hand-authored reference card.
    Reference,
}

impl DataSource {
    /// True when the data did not come from a live source and the UI should
    /// show a demo-data notice.
    pub fn is_degraded(&self) -> bool {
        matches!(self, DataSource::Synthetic | DataSource::Reference)
    }
}

/// A complete fetch-cycle snapshot. Replaced wholesale on refresh,
/// never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceProgram {
    pub races: Vec<Race>,
    pub source: DataSource,
    pub fetched_at: DateTime<Utc>,
}

impl RaceProgram {
    pub fn is_degraded(&self) -> bool {
        self.source.is_degraded()
    }

    /// Races scheduled for one of the two program days.
    pub fn races_for_day(&self, day: RaceDay) -> Vec<Race> {
        self.races.iter().filter(|r| r.day == day).cloned().collect()
    }
}

/// Aggregated per-jockey performance, rebuilt from the current race set on
/// every pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct JockeyStat {
    pub name: String,
    pub races: u32,
    pub wins: u32,
    /// Cumulative prize money, PLN.
    pub earnings: u64,
    /// Percentage with one decimal place, e.g. "21.1"; "0.0" without rides.
    pub win_rate: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Program snapshot response.
#[derive(Debug, Serialize)]
pub struct ProgramResponse {
    pub source: DataSource,
    pub degraded: bool,
    pub fetched_at: DateTime<Utc>,
    pub races: Vec<Race>,
}

/// Leaderboard response.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub jockeys: Vec<JockeyStat>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
