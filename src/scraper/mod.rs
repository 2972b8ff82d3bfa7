//! Scraping layer for the Tor Służewiec program page.
//!
//! Provides the HTTP fetcher and the HTML/JSON parsers.

pub mod fetcher;
pub mod parsers;

pub use fetcher::ProgramFetcher;

/// Public race program page.
pub const PROGRAM_URL: &str = "https://torsluzewiec.pl/program-gonitw/";

/// CORS relay used to reach the program page from restricted origins.
pub const PROXY_URL: &str = "https://api.allorigins.win/raw?url=";

/// Secondary structured race API.
pub const SECONDARY_API_URL: &str = "https://api.horse-racing.pl/races";

/// Track identifier the secondary API expects.
pub const VENUE_SLUG: &str = "sluzewiec";

/// Venue name attached to every race record.
pub const VENUE: &str = "Tor Służewiec";

/// Wrap a target URL in the CORS relay.
pub fn proxied_url(proxy: &str, target: &str) -> String {
    format!("{}{}", proxy, urlencoding::encode(target))
}

/// Build the secondary API request URL for a venue and ISO date.
pub fn secondary_url(base: &str, venue: &str, date: &str) -> String {
    format!("{}?track={}&date={}", base, venue, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxied_url_encodes_target() {
        let url = proxied_url(PROXY_URL, PROGRAM_URL);
        assert!(url.starts_with(PROXY_URL));
        assert!(url.contains("https%3A%2F%2Ftorsluzewiec.pl"));
    }

    #[test]
    fn test_secondary_url() {
        let url = secondary_url(SECONDARY_API_URL, VENUE_SLUG, "2025-08-10");
        assert_eq!(
            url,
            "https://api.horse-racing.pl/races?track=sluzewiec&date=2025-08-10"
        );
    }
}
