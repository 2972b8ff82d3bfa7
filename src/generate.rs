//! Synthetic race and horse generation.
//!
//! Fills the gaps left by partial scrapes (a race without a readable starting
//! list) and serves as the full fallback when no source yields data. All
//! randomness flows through a caller-supplied [`StdRng`] so a pinned seed
//! reproduces the exact program.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scraper::VENUE;
use crate::types::{Horse, Race, RaceDay, RaceStatus, Surface};

pub const HORSE_NAMES: [&str; 15] = [
    "Burza Warszawska",
    "Złoty Orzeł",
    "Wisła Champion",
    "Królewski Grom",
    "Mazowiecki Star",
    "Biały Rycerz",
    "Czarna Perła",
    "Słoneczny Dzień",
    "Górski Wiatr",
    "Leśny Książe",
    "Morska Fala",
    "Srebrny Pocisk",
    "Czerwony Baron",
    "Zielona Nadzieja",
    "Błękitny Sen",
];

pub const JOCKEYS: [&str; 15] = [
    "K. Mazur",
    "S. Abaev",
    "T. Kumarbek Uulu",
    "K. Grzybowski",
    "B. Kalysbek Uulu",
    "E. Zamudin Uulu",
    "A. Reznikov",
    "S. Mura",
    "M. Zholchubekov",
    "K. Dogdurbek Uulu",
    "D. Sabatbekov",
    "S. Vasyutov",
    "A. Gil",
    "K. Kamińska",
    "M. Przybek",
];

pub const OWNERS: [&str; 12] = [
    "SK Iwno",
    "Stud Janów Podlaski",
    "M. Stelmaszczyk",
    "Polska AKF Sp. z o.o.",
    "A. Laskowski",
    "Z. Górski",
    "Millennium Stud Sp. z o.o.",
    "BMS Group S. Pegza",
    "PPH Falba",
    "SK Krasne",
    "Plavac Sp. z o.o.",
    "Junior Speed srl",
];

pub const TRAINERS: [&str; 10] = [
    "W. Olkowski",
    "J. Kozłowski",
    "T. Pastuszka",
    "I. Karathanasis",
    "C. Pawlak",
    "A. Laskowski",
    "N. Szelągowska",
    "K. Rogowski",
    "M. Jodłowski",
    "S. Vasyutov",
];

/// Number of races in a fully generated program.
const PROGRAM_RACES: usize = 8;

/// Build an RNG from an optional pinned seed.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Evenly spaced afternoon start slot for a race index.
pub fn slot_time(index: usize) -> String {
    let minutes = if index % 2 == 0 { "00" } else { "30" };
    format!("{}:{}", 13 + index % 8, minutes)
}

/// Cycling distance sequence: 1200m, 1400m, 1600m, 1800m, 1200m, ...
pub fn slot_distance(index: usize) -> String {
    format!("{}m", 1200 + (index % 4) * 200)
}

/// Cycling prize pool: 15 000 zł upward in 5 000 zł steps.
pub fn slot_prize(index: usize) -> String {
    format!("{} zł", 15_000 + (index % 5) * 5_000)
}

/// Generate the starting field for one race.
///
/// Numbers are dense and 1-based; names cycle through the pool offset by the
/// race index so consecutive races do not repeat the same field.
pub fn horses_for_race(race_index: usize, rng: &mut StdRng) -> Vec<Horse> {
    let count = rng.gen_range(4..=9);

    (0..count)
        .map(|i| Horse {
            number: (i + 1) as u32,
            name: HORSE_NAMES[(race_index * 3 + i) % HORSE_NAMES.len()].to_string(),
            jockey: JOCKEYS[i % JOCKEYS.len()].to_string(),
            weight_kg: rng.gen_range(54..=61),
            odds: random_odds(rng),
            owner: OWNERS[i % OWNERS.len()].to_string(),
            trainer: TRAINERS[i % TRAINERS.len()].to_string(),
            age: rng.gen_range(2..=7),
            form: random_form(rng),
            position: (i + 1) as u32,
        })
        .collect()
}

/// Generate a complete program when no source yielded any race at all.
pub fn generate_program(rng: &mut StdRng) -> Vec<Race> {
    let stamp = chrono::Utc::now().timestamp();

    (0..PROGRAM_RACES)
        .map(|i| Race {
            id: format!("generated_{}_{}", stamp, i),
            day: if i < 5 { RaceDay::Tomorrow } else { RaceDay::Sunday },
            time: slot_time(i),
            title: format!("Gonitwa {}", i + 1),
            distance: slot_distance(i),
            prize: slot_prize(i),
            status: RaceStatus::Upcoming,
            venue: VENUE.to_string(),
            surface: Surface::Turf,
            category: None,
            horses: horses_for_race(i, rng),
        })
        .collect()
}

/// Win odds in [2.0, 10.0), one fractional digit.
pub fn random_odds(rng: &mut StdRng) -> String {
    format!("{:.1}", rng.gen_range(2.0_f64..10.0))
}

/// Three recent finishing positions in 1..=5, most recent last.
pub fn random_form(rng: &mut StdRng) -> String {
    (0..3)
        .map(|_| rng.gen_range(1..=5).to_string())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn random_jockey(rng: &mut StdRng) -> String {
    JOCKEYS[rng.gen_range(0..JOCKEYS.len())].to_string()
}

pub fn random_owner(rng: &mut StdRng) -> String {
    OWNERS[rng.gen_range(0..OWNERS.len())].to_string()
}

pub fn random_trainer(rng: &mut StdRng) -> String {
    TRAINERS[rng.gen_range(0..TRAINERS.len())].to_string()
}
