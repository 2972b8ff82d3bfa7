//! HTTP fetcher for the program page and the secondary race API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use tracing::debug;

use super::{proxied_url, secondary_url};
use crate::config::SourceConfig;

/// Fetcher issuing proxied GETs against the configured sources.
pub struct ProgramFetcher {
    client: reqwest::Client,
    source: SourceConfig,
}

impl ProgramFetcher {
    /// Build a fetcher with the source's timeout and user agent baked into
    /// the client.
    pub fn new(source: SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(source.user_agent.clone())
            .timeout(Duration::from_secs(source.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, source })
    }

    /// Fetch the raw program page through the CORS relay.
    ///
    /// A non-2xx status or an empty body is an error; the pipeline treats
    /// both the same as a network failure.
    pub async fn fetch_program_page(&self) -> Result<String> {
        let url = proxied_url(&self.source.proxy_url, &self.source.program_url);
        debug!("fetching program page via {}", self.source.proxy_url);

        let response = self
            .client
            .get(&url)
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .context("program page request failed")?
            .error_for_status()
            .context("program page returned an error status")?;

        let body = response
            .text()
            .await
            .context("failed to read program page body")?;

        if body.trim().is_empty() {
            anyhow::bail!("program page returned an empty body");
        }

        Ok(body)
    }

    /// Fetch the secondary structured API for the configured venue and the
    /// given ISO date.
    pub async fn fetch_secondary(&self, date: &str) -> Result<String> {
        let url = secondary_url(
            &self.source.secondary_api_url,
            &self.source.venue_slug,
            date,
        );
        debug!("fetching secondary race API for {}", date);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("secondary API request failed")?
            .error_for_status()
            .context("secondary API returned an error status")?;

        Ok(response
            .text()
            .await
            .context("failed to read secondary API body")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> SourceConfig {
        SourceConfig {
            program_url: "https://torsluzewiec.pl/program-gonitw/".to_string(),
            proxy_url: format!("{}/raw?url=", server.uri()),
            secondary_api_url: format!("{}/races", server.uri()),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_program_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .and(query_param("url", "https://torsluzewiec.pl/program-gonitw/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>program</html>"))
            .mount(&server)
            .await;

        let fetcher = ProgramFetcher::new(source_for(&server)).unwrap();
        let body = fetcher.fetch_program_page().await.unwrap();
        assert!(body.contains("program"));
    }

    #[tokio::test]
    async fn test_empty_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .respond_with(ResponseTemplate::new(200).set_body_string("   "))
            .mount(&server)
            .await;

        let fetcher = ProgramFetcher::new(source_for(&server)).unwrap();
        assert!(fetcher.fetch_program_page().await.is_err());
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = ProgramFetcher::new(source_for(&server)).unwrap();
        assert!(fetcher.fetch_program_page().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_secondary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/races"))
            .and(query_param("track", "sluzewiec"))
            .and(query_param("date", "2025-08-10"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let fetcher = ProgramFetcher::new(source_for(&server)).unwrap();
        let body = fetcher.fetch_secondary("2025-08-10").await.unwrap();
        assert_eq!(body, "[]");
    }
}
