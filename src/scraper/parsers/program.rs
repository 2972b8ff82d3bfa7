//! Race program parser for torsluzewiec.pl.
//!
//! The program page has no stable markup contract, so the parser tries an
//! ordered list of structural selector strategies and takes the first one
//! that matches anything. Documents with no usable structure at all fall
//! back to a plain-text scan for start times.

use rand::rngs::StdRng;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::extract::{extract_distance, extract_prize, extract_time};
use crate::generate;
use crate::scraper::VENUE;
use crate::types::{Race, RaceDay, RaceStatus, Surface};

/// Selector strategies for locating race entries, in priority order.
/// Results are never merged across strategies.
const RACE_SELECTORS: [&str; 5] = [
    ".race-schedule .race-item",
    ".program-gonitw .gonitwa",
    ".schedule-item",
    "[data-race]",
    ".race-entry",
];

/// Candidate sub-selectors for each race field, in priority order.
const TIME_SELECTORS: [&str; 3] = [".time", ".godzina", "[class*=\"time\"]"];
const TITLE_SELECTORS: [&str; 5] = [".title", ".nazwa", ".race-name", "h3", "h4"];
const DISTANCE_SELECTORS: [&str; 3] = [".distance", ".dystans", "[class*=\"distance\"]"];
const PRIZE_SELECTORS: [&str; 3] = [".prize", ".nagroda", "[class*=\"prize\"]"];

/// Upper bound on races taken from one document; bounds pathological matches.
const MAX_RACES: usize = 10;

/// Structured-path races landing on the tomorrow card before the rest spill
/// to Sunday; the text scan splits one entry later.
const STRUCTURED_TOMORROW: usize = 5;
const TEXT_TOMORROW: usize = 6;

/// Parser for the race program page.
pub struct ProgramParser;

impl ProgramParser {
    /// Parse the program document into race records.
    ///
    /// Returns `None` when neither the structural strategies nor the text
    /// scan find anything usable; the caller is expected to move on to the
    /// next data source. Partial results are never returned.
    pub fn parse(html: &str, rng: &mut StdRng) -> Option<Vec<Race>> {
        let document = Html::parse_document(html);

        let mut elements: Vec<ElementRef> = Vec::new();
        for sel_str in RACE_SELECTORS {
            if let Ok(selector) = Selector::parse(sel_str) {
                elements = document.select(&selector).collect();
                if !elements.is_empty() {
                    debug!("{} race entries matched `{}`", elements.len(), sel_str);
                    break;
                }
            }
        }

        if elements.is_empty() {
            return Self::parse_from_text(html, rng);
        }

        let stamp = chrono::Utc::now().timestamp();
        let races: Vec<Race> = elements
            .iter()
            .take(MAX_RACES)
            .enumerate()
            .map(|(index, element)| Self::parse_race_element(element, index, stamp, rng))
            .collect();

        if races.is_empty() {
            None
        } else {
            Some(races)
        }
    }

    /// Map one matched element to a race record. Every field that cannot be
    /// extracted gets a deterministic index-derived placeholder, so the
    /// record is always displayable.
    fn parse_race_element(element: &ElementRef, index: usize, stamp: i64, rng: &mut StdRng) -> Race {
        let time = Self::child_text(element, &TIME_SELECTORS)
            .and_then(|t| extract_time(&t))
            .unwrap_or_else(|| generate::slot_time(index));

        let title = Self::child_text(element, &TITLE_SELECTORS)
            .unwrap_or_else(|| format!("Gonitwa {}", index + 1));

        let distance = Self::child_text(element, &DISTANCE_SELECTORS)
            .and_then(|d| extract_distance(&d))
            .unwrap_or_else(|| generate::slot_distance(index));

        let prize = Self::child_text(element, &PRIZE_SELECTORS)
            .and_then(|p| extract_prize(&p))
            .unwrap_or_else(|| generate::slot_prize(index));

        Race {
            id: format!("sluzewiec_{}_{}", stamp, index),
            day: if index < STRUCTURED_TOMORROW {
                RaceDay::Tomorrow
            } else {
                RaceDay::Sunday
            },
            time,
            title,
            distance,
            prize,
            status: RaceStatus::Upcoming,
            venue: VENUE.to_string(),
            surface: Surface::Turf,
            category: None,
            horses: generate::horses_for_race(index, rng),
        }
    }

    /// First candidate sub-selector yielding non-empty text wins.
    fn child_text(element: &ElementRef, selectors: &[&str]) -> Option<String> {
        for sel_str in selectors {
            if let Ok(selector) = Selector::parse(sel_str) {
                if let Some(child) = element.select(&selector).next() {
                    let text = child.text().collect::<String>().trim().to_string();
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
        None
    }

    /// Markup-independent fallback: one minimal race per start-time pattern
    /// found anywhere in the document.
    pub fn parse_from_text(html: &str, rng: &mut StdRng) -> Option<Vec<Race>> {
        let re = Regex::new(r"\d{1,2}:\d{2}").unwrap();

        let races: Vec<Race> = re
            .find_iter(html)
            .take(MAX_RACES)
            .enumerate()
            .map(|(index, m)| Race {
                id: format!("text_race_{}", index),
                day: if index < TEXT_TOMORROW {
                    RaceDay::Tomorrow
                } else {
                    RaceDay::Sunday
                },
                time: m.as_str().to_string(),
                title: format!("Gonitwa {}", index + 1),
                distance: format!("{}m", 1400 + (index % 4) * 200),
                prize: format!("{} zł", 20_000 + index * 2_000),
                status: RaceStatus::Upcoming,
                venue: VENUE.to_string(),
                surface: Surface::Turf,
                category: None,
                horses: generate::horses_for_race(index, rng),
            })
            .collect();

        if races.is_empty() {
            debug!("no time patterns in document, giving up on this source");
            None
        } else {
            debug!("synthesized {} races from text scan", races.len());
            Some(races)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::rng_from;

    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="race-schedule">
    <div class="race-item">
        <span class="time">14:05</span>
        <span class="title">Nagroda Otwarcia</span>
        <span class="distance">1800 m</span>
        <span class="prize">25 000 zł</span>
    </div>
</div>
</body>
</html>"#;

    #[test]
    fn test_parse_structured_race() {
        let mut rng = rng_from(Some(42));
        let races = ProgramParser::parse(SAMPLE_HTML, &mut rng).unwrap();

        assert_eq!(races.len(), 1);
        let race = &races[0];
        assert_eq!(race.time, "14:05");
        assert_eq!(race.title, "Nagroda Otwarcia");
        assert_eq!(race.distance, "1800m");
        assert_eq!(race.prize, "25 000 zł");
        assert_eq!(race.day, RaceDay::Tomorrow);
        assert_eq!(race.status, RaceStatus::Upcoming);
        assert_eq!(race.venue, VENUE);
        assert!(!race.horses.is_empty());
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let html = r#"<div class="schedule-item"></div><div class="schedule-item"></div>"#;
        let mut rng = rng_from(Some(42));
        let races = ProgramParser::parse(html, &mut rng).unwrap();

        assert_eq!(races.len(), 2);
        assert_eq!(races[0].time, "13:00");
        assert_eq!(races[0].title, "Gonitwa 1");
        assert_eq!(races[0].distance, "1200m");
        assert_eq!(races[0].prize, "15000 zł");
        assert_eq!(races[1].time, "14:30");
        assert_eq!(races[1].distance, "1400m");
    }

    #[test]
    fn test_first_matching_strategy_wins() {
        // Both a priority-1 and a priority-5 structure are present; only the
        // first strategy's matches may be used.
        let html = r#"
<div class="race-schedule"><div class="race-item"><span class="time">13:15</span></div></div>
<div class="race-entry"><span class="time">18:00</span></div>
"#;
        let mut rng = rng_from(Some(42));
        let races = ProgramParser::parse(html, &mut rng).unwrap();

        assert_eq!(races.len(), 1);
        assert_eq!(races[0].time, "13:15");
    }

    #[test]
    fn test_attribute_selector_strategy() {
        let html = r#"<section data-race="1"><h3>Wielka Warszawska</h3></section>"#;
        let mut rng = rng_from(Some(42));
        let races = ProgramParser::parse(html, &mut rng).unwrap();

        assert_eq!(races.len(), 1);
        assert_eq!(races[0].title, "Wielka Warszawska");
    }

    #[test]
    fn test_race_cap() {
        let mut html = String::from("<div class=\"race-schedule\">");
        for i in 0..15 {
            html.push_str(&format!(
                "<div class=\"race-item\"><span class=\"time\">1{}:00</span></div>",
                i % 10
            ));
        }
        html.push_str("</div>");

        let mut rng = rng_from(Some(42));
        let races = ProgramParser::parse(&html, &mut rng).unwrap();
        assert_eq!(races.len(), MAX_RACES);
    }

    #[test]
    fn test_text_fallback() {
        let html = "<html><body>Gonitwy jutro: 12:30 oraz 15:45</body></html>";
        let mut rng = rng_from(Some(42));
        let races = ProgramParser::parse(html, &mut rng).unwrap();

        assert_eq!(races.len(), 2);
        assert_eq!(races[0].time, "12:30");
        assert_eq!(races[0].title, "Gonitwa 1");
        assert_eq!(races[0].distance, "1400m");
        assert_eq!(races[0].prize, "20000 zł");
        assert_eq!(races[1].time, "15:45");
        assert_eq!(races[1].prize, "22000 zł");
    }

    #[test]
    fn test_text_fallback_day_split() {
        let times: Vec<String> = (0..8).map(|i| format!("1{}:00", i)).collect();
        let html = times.join(" ");
        let mut rng = rng_from(Some(42));
        let races = ProgramParser::parse(&html, &mut rng).unwrap();

        assert_eq!(races.len(), 8);
        assert!(races[..6].iter().all(|r| r.day == RaceDay::Tomorrow));
        assert!(races[6..].iter().all(|r| r.day == RaceDay::Sunday));
    }

    #[test]
    fn test_unparseable_document() {
        let mut rng = rng_from(Some(42));
        assert!(ProgramParser::parse("<html><body>Brak programu</body></html>", &mut rng).is_none());
        assert!(ProgramParser::parse("", &mut rng).is_none());
    }

    #[test]
    fn test_horse_fields_within_bounds() {
        let mut rng = rng_from(Some(9));
        let races = ProgramParser::parse(SAMPLE_HTML, &mut rng).unwrap();

        for horse in &races[0].horses {
            assert!((54..=61).contains(&horse.weight_kg));
            assert!((2..=7).contains(&horse.age));
        }
    }
}
