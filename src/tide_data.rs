//! # Forecast Page Fetching
//!
//! Downloads tide-forecast.com location pages and splits them into the
//! per-day fragments the assembler works on.
//!
//! ## Data Source
//! - **URL**: `<base-url>/locations/<location>/tides/latest`
//! - **Format**: HTML, one `div.tide-day` block per calendar day (about four weeks)
//!
//! Requests are issued one at a time. There is no cache and no retry: a
//! failed request aborts the run.

use crate::forecast::{assemble_day, selector};
use crate::{DayForecast, Result};
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info};

/// Browser-like user agent; the site serves a reduced page to unknown clients.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const TIMEOUT: Duration = Duration::from_secs(30);

/// Build the forecast page URL for a location identifier.
///
/// # Example
/// ```
/// use tide_scout_lib::tide_data::page_url;
///
/// assert_eq!(
///     page_url("https://www.tide-forecast.com/", "Half-Moon-Bay-California"),
///     "https://www.tide-forecast.com/locations/Half-Moon-Bay-California/tides/latest"
/// );
/// ```
pub fn page_url(base_url: &str, location: &str) -> String {
    format!(
        "{}/locations/{}/tides/latest",
        base_url.trim_end_matches('/'),
        location
    )
}

/// HTTP client bound to one forecast site.
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Download the raw HTML of a location's forecast page.
    ///
    /// Non-success status codes are returned as errors.
    pub async fn fetch_page(&self, location: &str) -> Result<String> {
        let url = page_url(&self.base_url, location);
        info!(%url, "fetching forecast page");

        let html = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!(%url, bytes = html.len(), "fetched forecast page");
        Ok(html)
    }
}

/// Parse a forecast page and assemble every day fragment, in page order.
pub fn parse_page(html: &str) -> Result<Vec<DayForecast>> {
    let doc = Html::parse_document(html);
    doc.select(&selector("div.tide-day"))
        .map(assemble_day)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_location() {
        assert_eq!(
            page_url("https://www.tide-forecast.com", "Huntington-Beach"),
            "https://www.tide-forecast.com/locations/Huntington-Beach/tides/latest"
        );
    }

    #[test]
    fn page_without_day_fragments_is_empty() {
        let days = parse_page("<html><body><p>No forecast</p></body></html>").unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn client_builds() {
        assert!(ForecastClient::new("https://www.tide-forecast.com").is_ok());
    }
}
