//! Hand-authored reference data.
//!
//! The last rung of the fallback chain: a fixed Służewiec race card plus the
//! season-to-date jockey standings. Never fails, never varies between calls.

use crate::scraper::VENUE;
use crate::types::{Horse, JockeyStat, Race, RaceDay, RaceStatus, Surface};

/// Season-to-date record of one rider.
#[derive(Debug, Clone, Copy)]
pub struct SeasonJockey {
    pub rank: u32,
    pub name: &'static str,
    pub place1: u32,
    pub place2: u32,
    pub place3: u32,
    pub place4: u32,
    pub place5: u32,
    pub total_starts: u32,
    pub win_percentage: f64,
}

/// Season standings, ordered by wins.
pub const SEASON_JOCKEYS: [SeasonJockey; 20] = [
    SeasonJockey { rank: 1, name: "S.Abaev", place1: 48, place2: 31, place3: 30, place4: 28, place5: 24, total_starts: 228, win_percentage: 21.05 },
    SeasonJockey { rank: 2, name: "K.Dogdurbek Uulu", place1: 32, place2: 31, place3: 24, place4: 21, place5: 16, total_starts: 175, win_percentage: 18.29 },
    SeasonJockey { rank: 3, name: "T.Kumarbek Uulu", place1: 27, place2: 18, place3: 19, place4: 25, place5: 27, total_starts: 174, win_percentage: 15.52 },
    SeasonJockey { rank: 4, name: "E.Zamudin Uulu", place1: 24, place2: 28, place3: 23, place4: 21, place5: 15, total_starts: 153, win_percentage: 15.69 },
    SeasonJockey { rank: 5, name: "S.Mura", place1: 20, place2: 17, place3: 13, place4: 14, place5: 8, total_starts: 106, win_percentage: 18.87 },
    SeasonJockey { rank: 6, name: "S.Mazur", place1: 16, place2: 19, place3: 12, place4: 7, place5: 8, total_starts: 84, win_percentage: 19.05 },
    SeasonJockey { rank: 7, name: "K.Grzybowski", place1: 15, place2: 20, place3: 29, place4: 26, place5: 24, total_starts: 162, win_percentage: 9.26 },
    SeasonJockey { rank: 8, name: "K.Mazur", place1: 14, place2: 19, place3: 19, place4: 28, place5: 18, total_starts: 143, win_percentage: 9.79 },
    SeasonJockey { rank: 9, name: "D.Sabatbekov", place1: 12, place2: 12, place3: 16, place4: 15, place5: 12, total_starts: 99, win_percentage: 12.12 },
    SeasonJockey { rank: 10, name: "A.Reznikov", place1: 10, place2: 11, place3: 9, place4: 11, place5: 20, total_starts: 110, win_percentage: 9.09 },
    SeasonJockey { rank: 11, name: "B.Kalysbek Uulu", place1: 9, place2: 14, place3: 6, place4: 8, place5: 7, total_starts: 64, win_percentage: 14.06 },
    SeasonJockey { rank: 12, name: "B.Marat Uulu", place1: 9, place2: 2, place3: 7, place4: 6, place5: 6, total_starts: 55, win_percentage: 16.36 },
    SeasonJockey { rank: 13, name: "S.Vasyutov", place1: 8, place2: 4, place3: 8, place4: 4, place5: 5, total_starts: 52, win_percentage: 15.38 },
    SeasonJockey { rank: 14, name: "A.Turgaev", place1: 7, place2: 16, place3: 10, place4: 15, place5: 13, total_starts: 96, win_percentage: 7.29 },
    SeasonJockey { rank: 15, name: "S.Urmatbek Uulu", place1: 7, place2: 8, place3: 13, place4: 6, place5: 8, total_starts: 65, win_percentage: 10.77 },
    SeasonJockey { rank: 16, name: "A.Burakiewicz", place1: 6, place2: 0, place3: 2, place4: 2, place5: 5, total_starts: 27, win_percentage: 22.22 },
    SeasonJockey { rank: 17, name: "M.Zholchubekov", place1: 5, place2: 10, place3: 14, place4: 10, place5: 18, total_starts: 96, win_percentage: 5.21 },
    SeasonJockey { rank: 18, name: "A.Gil", place1: 4, place2: 6, place3: 7, place4: 6, place5: 7, total_starts: 65, win_percentage: 6.15 },
    SeasonJockey { rank: 19, name: "J.Odložil", place1: 4, place2: 2, place3: 3, place4: 0, place5: 1, total_starts: 12, win_percentage: 33.33 },
    SeasonJockey { rank: 20, name: "A.Sienkiewicz", place1: 3, place2: 4, place3: 0, place4: 0, place5: 3, total_starts: 15, win_percentage: 20.0 },
];

/// Estimated payouts per finishing place used for season earnings, PLN.
const SEASON_PAYOUTS: [u64; 3] = [15_000, 8_000, 4_000];

/// Season totals.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SeasonSummary {
    pub total_jockeys: usize,
    pub total_wins: u32,
    pub total_starts: u32,
    /// Average win rate across all starts, two decimals with a `%` suffix.
    pub average_win_rate: String,
}

/// Top of the season standings mapped to leaderboard entries.
pub fn top_jockeys(limit: usize) -> Vec<JockeyStat> {
    SEASON_JOCKEYS
        .iter()
        .take(limit)
        .map(|j| JockeyStat {
            name: j.name.to_string(),
            races: j.total_starts,
            wins: j.place1,
            earnings: u64::from(j.place1) * SEASON_PAYOUTS[0]
                + u64::from(j.place2) * SEASON_PAYOUTS[1]
                + u64::from(j.place3) * SEASON_PAYOUTS[2],
            win_rate: format!("{:.1}", j.win_percentage),
        })
        .collect()
}

/// Totals across the whole standings table.
pub fn season_summary() -> SeasonSummary {
    let total_wins: u32 = SEASON_JOCKEYS.iter().map(|j| j.place1).sum();
    let total_starts: u32 = SEASON_JOCKEYS.iter().map(|j| j.total_starts).sum();

    SeasonSummary {
        total_jockeys: SEASON_JOCKEYS.len(),
        total_wins,
        total_starts,
        average_win_rate: format!(
            "{:.2}%",
            f64::from(total_wins) / f64::from(total_starts) * 100.0
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn horse(
    number: u32,
    name: &str,
    jockey: &str,
    weight_kg: u32,
    odds: &str,
    owner: &str,
    trainer: &str,
    age: u32,
    form: &str,
) -> Horse {
    Horse {
        number,
        name: name.to_string(),
        jockey: jockey.to_string(),
        weight_kg,
        odds: odds.to_string(),
        owner: owner.to_string(),
        trainer: trainer.to_string(),
        age,
        form: form.to_string(),
        position: number,
    }
}

#[allow(clippy::too_many_arguments)]
fn race(
    id: &str,
    day: RaceDay,
    time: &str,
    title: &str,
    distance: &str,
    prize: &str,
    category: &str,
    surface: Surface,
    horses: Vec<Horse>,
) -> Race {
    Race {
        id: id.to_string(),
        day,
        time: time.to_string(),
        title: title.to_string(),
        distance: distance.to_string(),
        prize: prize.to_string(),
        status: RaceStatus::Upcoming,
        venue: VENUE.to_string(),
        surface,
        category: Some(category.to_string()),
        horses,
    }
}

/// The guaranteed race card: three races on the tomorrow card, two on the
/// Sunday card, including one harness race (weights not applicable).
pub fn reference_program() -> Vec<Race> {
    vec![
        race(
            "sluzewiec_tomorrow_1",
            RaceDay::Tomorrow,
            "13:00",
            "Gonitwa dla 2-letnich koni II grupy hodowli krajowej wpisanych do Polskiej Księgi Stadnej Koni Pełnej Krwi Angielskiej (PSB) - seria A",
            "1400m",
            "21 000 zł",
            "Grupa II",
            Surface::Turf,
            vec![
                horse(1, "Słodka Czekolada", "A. Reznikov", 56, "3.2", "D., I. i M. Jaskólscy", "W. Olkowski", 2, "1-2-1"),
                horse(2, "Granada", "T. Kumarbek Uulu", 56, "4.5", "PPH Falba", "J. Kozłowski", 2, "2-1-3"),
                horse(3, "Oakley Martini", "M. Zholchubekov", 56, "2.8", "UAB Žirgo Startas", "T. Pastuszka", 2, "1-1-2"),
                horse(4, "Katla", "B. Marat Uulu", 56, "5.1", "SK Iwno i A. Skrzypczak", "I. Karathanasis", 2, "3-2-4"),
                horse(5, "Likya", "K. Mazur", 56, "6.8", "M. Kaszubowski", "C. Pawlak", 2, "4-3-1"),
                horse(6, "Thunder Storm", "K. Grzybowski", 57, "7.2", "A., M. i P. Laskowscy", "A. Laskowski", 2, "2-4-3"),
            ],
        ),
        race(
            "sluzewiec_tomorrow_2",
            RaceDay::Tomorrow,
            "13:30",
            "Nagroda Michałowa – (kat. A) - Gonitwa międzynarodowa dla 4-letnich i starszych koni czystej krwi arabskiej",
            "2800m",
            "56 000 zł",
            "Kategoria A",
            Surface::Turf,
            vec![
                horse(1, "Monaasib (GB)", "K. Dogdurbek Uulu", 62, "2.5", "Junior Speed srl", "M. Jodłowski", 6, "1-2-1"),
                horse(2, "Eyd'a Alfash", "B. Kalysbek Uulu", 60, "3.8", "M. Dąbrowski i M. Nieznańska", "K. Rogowski", 5, "2-1-2"),
                horse(3, "Lindahls Anakin (DK)", "K. Mazur", 62, "4.2", "A. Lindahl", "C. Pawlak", 5, "1-3-1"),
                horse(4, "Cabaliros (FR)", "S. Abaev", 59, "5.5", "A. Jabłońska-Kostrzewa", "K. Rogowski", 4, "3-1-4"),
            ],
        ),
        race(
            "sluzewiec_tomorrow_3",
            RaceDay::Tomorrow,
            "14:00",
            "Gonitwa dla 2-letnich koni II grupy hodowli krajowej wpisanych do Polskiej Księgi Stadnej Koni Pełnej Krwi Angielskiej (PSB) - seria B",
            "1400m",
            "21 000 zł",
            "Grupa II",
            Surface::Turf,
            vec![
                horse(1, "Szekla", "K. Mazur", 56, "3.1", "SK Iwno i N. Szelągowska", "N. Szelągowska", 2, "1-2-1"),
                horse(2, "Thulio", "K. Grzybowski", 57, "2.9", "A. i M. Rybaczyk", "A. Laskowski", 2, "2-1-1"),
                horse(3, "Damina", "B. Marat Uulu", 56, "4.3", "SK Iwno i A. Skrzypczak", "I. Karathanasis", 2, "1-3-2"),
            ],
        ),
        race(
            "sluzewiec_sunday_1",
            RaceDay::Sunday,
            "13:00",
            "Nagroda Fair Play (Specjalna) - Gonitwa międzynarodowa dla 3-letnich i starszych kłusaków francuskich (sulki)",
            "2400m",
            "16 000 zł",
            "Specjalna",
            Surface::Cinder,
            vec![
                horse(1, "Gobs", "D. Bińkowska", 0, "3.5", "D. Bińkowska, A. Frontczak-Salivonchyk", "A. Frontczak-Salivonchyk", 9, "1-2-3"),
                horse(2, "Katko Gede (FR)", "M. Wasiak", 0, "4.1", "L., M. i R. Melinger, A. i T. Wasiak", "M. Wasiak", 5, "2-1-2"),
                horse(3, "Kaline Restelan (FR)", "W. Pandel", 0, "5.2", "W. Pandel", "W. Pandel", 5, "3-2-1"),
            ],
        ),
        race(
            "sluzewiec_sunday_2",
            RaceDay::Sunday,
            "13:30",
            "Gonitwa dla 3-letnich koni czystej krwi arabskiej II grupy hodowli krajowej wpisanych do Polskiej Księgi Stadnej Koni Arabskich Czystej Krwi (PASB) - seria B",
            "1800m",
            "19 000 zł",
            "Grupa II",
            Surface::Turf,
            vec![
                horse(1, "Wans", "M. Zholchubekov", 58, "3.7", "R. Ptach", "S. Vasyutov", 3, "1-2-1"),
                horse(2, "Ghost Djeeli", "A. Sienkiewicz", 58, "4.5", "P. Piotrowski", "S. Vasyutov", 3, "2-1-3"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_program_shape() {
        let races = reference_program();

        assert_eq!(races.len(), 5);
        assert_eq!(races.iter().filter(|r| r.day == RaceDay::Tomorrow).count(), 3);
        assert!(races.iter().all(|r| !r.horses.is_empty()));
        assert!(races.iter().all(|r| r.status == RaceStatus::Upcoming));

        let mut ids: Vec<&str> = races.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_reference_program_is_stable() {
        let first = reference_program();
        let second = reference_program();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.horses.len(), b.horses.len());
        }
    }

    #[test]
    fn test_harness_race_has_no_weights() {
        let races = reference_program();
        let harness = races.iter().find(|r| r.id == "sluzewiec_sunday_1").unwrap();

        assert_eq!(harness.surface, Surface::Cinder);
        assert!(harness.horses.iter().all(|h| h.weight_kg == 0));
    }

    #[test]
    fn test_dense_numbering() {
        for race in reference_program() {
            for (i, horse) in race.horses.iter().enumerate() {
                assert_eq!(horse.number, (i + 1) as u32);
            }
        }
    }

    #[test]
    fn test_top_jockeys() {
        let top = top_jockeys(6);

        assert_eq!(top.len(), 6);
        assert_eq!(top[0].name, "S.Abaev");
        assert_eq!(top[0].wins, 48);
        assert_eq!(top[0].win_rate, "21.1");
        // 48 * 15 000 + 31 * 8 000 + 30 * 4 000
        assert_eq!(top[0].earnings, 1_088_000);

        for pair in top.windows(2) {
            assert!(pair[0].wins >= pair[1].wins);
        }
    }

    #[test]
    fn test_top_jockeys_limit_exceeds_table() {
        assert_eq!(top_jockeys(100).len(), SEASON_JOCKEYS.len());
    }

    #[test]
    fn test_season_summary() {
        let summary = season_summary();

        assert_eq!(summary.total_jockeys, 20);
        assert_eq!(
            summary.total_wins,
            SEASON_JOCKEYS.iter().map(|j| j.place1).sum::<u32>()
        );
        assert!(summary.average_win_rate.ends_with('%'));
    }
}
