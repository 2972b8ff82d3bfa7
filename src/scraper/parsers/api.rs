//! Transform for the secondary structured race API.
//!
//! The feed is best-effort: every field is optional and substituted
//! field-by-field, so one sparse entry never sinks the whole response.

use rand::rngs::StdRng;
use rand::Rng;
use serde::Deserialize;

use crate::generate;
use crate::scraper::VENUE;
use crate::types::{Horse, Race, RaceDay, RaceStatus, Surface};

/// Race entry as served by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRace {
    race_id: Option<String>,
    race_date: Option<String>,
    race_time: Option<String>,
    race_name: Option<String>,
    distance: Option<String>,
    total_prize: Option<String>,
    status: Option<String>,
    track: Option<String>,
    horses: Option<Vec<ApiHorse>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiHorse {
    number: Option<u32>,
    name: Option<String>,
    jockey: Option<String>,
    weight: Option<u32>,
    odds: Option<String>,
    owner: Option<String>,
    trainer: Option<String>,
    age: Option<u32>,
    recent_form: Option<String>,
}

/// Parser for the secondary API response.
pub struct ApiProgramParser;

impl ApiProgramParser {
    /// Transform the API response into race records.
    ///
    /// `target_date` is the ISO date the request was scoped to; races dated
    /// to it land on the tomorrow card, everything else on Sunday. Returns
    /// `None` when the body is not a race array or the array is empty.
    pub fn parse(json: &str, target_date: &str, rng: &mut StdRng) -> Option<Vec<Race>> {
        let api_races: Vec<ApiRace> = serde_json::from_str(json).ok()?;
        if api_races.is_empty() {
            return None;
        }

        Some(
            api_races
                .into_iter()
                .enumerate()
                .map(|(index, race)| Self::to_race(race, index, target_date, rng))
                .collect(),
        )
    }

    fn to_race(api: ApiRace, index: usize, target_date: &str, rng: &mut StdRng) -> Race {
        let horses = match api.horses {
            Some(list) if !list.is_empty() => list
                .into_iter()
                .enumerate()
                .map(|(i, horse)| Self::to_horse(horse, i, rng))
                .collect(),
            _ => generate::horses_for_race(index, rng),
        };

        Race {
            id: api.race_id.unwrap_or_else(|| format!("api_race_{}", index)),
            day: if api.race_date.as_deref() == Some(target_date) {
                RaceDay::Tomorrow
            } else {
                RaceDay::Sunday
            },
            time: api.race_time.unwrap_or_else(|| format!("{}:00", 13 + index)),
            title: api.race_name.unwrap_or_else(|| format!("Gonitwa {}", index + 1)),
            distance: api.distance.unwrap_or_else(|| "1400m".to_string()),
            prize: api.total_prize.unwrap_or_else(|| "20000 zł".to_string()),
            status: match api.status.as_deref() {
                Some("in-progress") => RaceStatus::InProgress,
                Some("finished") => RaceStatus::Finished,
                _ => RaceStatus::Upcoming,
            },
            venue: api.track.unwrap_or_else(|| VENUE.to_string()),
            surface: Surface::Turf,
            category: None,
            horses,
        }
    }

    fn to_horse(api: ApiHorse, index: usize, rng: &mut StdRng) -> Horse {
        Horse {
            number: api.number.unwrap_or((index + 1) as u32),
            name: api.name.unwrap_or_else(|| format!("Koń {}", index + 1)),
            jockey: api.jockey.unwrap_or_else(|| generate::random_jockey(rng)),
            weight_kg: api.weight.unwrap_or_else(|| rng.gen_range(54..=61)),
            odds: api.odds.unwrap_or_else(|| generate::random_odds(rng)),
            owner: api.owner.unwrap_or_else(|| generate::random_owner(rng)),
            trainer: api.trainer.unwrap_or_else(|| generate::random_trainer(rng)),
            age: api.age.unwrap_or_else(|| rng.gen_range(2..=7)),
            form: api.recent_form.unwrap_or_else(|| generate::random_form(rng)),
            position: (index + 1) as u32,
        }
    }
}
