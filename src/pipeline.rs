//! # Batch Orchestration
//!
//! Location by location: fetch the page, assemble every day, keep the daylight
//! low tides, flatten them into export rows. Locations are handled strictly in
//! order and the first error ends the run.

use crate::config::Config;
use crate::export::{write_csv, LowTideRow};
use crate::forecast::daylight_low_tides;
use crate::tide_data::{parse_page, ForecastClient};
use crate::Result;
use tracing::info;

/// Export rows for one location's forecast page.
pub fn location_rows(location: &str, html: &str) -> Result<Vec<LowTideRow>> {
    let mut rows = Vec::new();
    for forecast in parse_page(html)? {
        rows.extend(
            daylight_low_tides(&forecast)
                .into_iter()
                .map(|tide| LowTideRow::new(tide, &forecast, location)),
        );
    }
    Ok(rows)
}

/// Fetch and process every location in order.
pub async fn collect_rows(client: &ForecastClient, locations: &[String]) -> Result<Vec<LowTideRow>> {
    let mut rows = Vec::new();
    for location in locations {
        let html = client.fetch_page(location).await?;
        let found = location_rows(location, &html)?;
        info!(%location, daylight_low_tides = found.len(), "processed location");
        rows.extend(found);
    }
    Ok(rows)
}

/// Run the whole batch and write the CSV named in `config`.
pub async fn run(config: &Config) -> Result<Vec<LowTideRow>> {
    let client = ForecastClient::new(config.source.base_url.clone())?;
    let rows = collect_rows(&client, &config.source.locations).await?;
    write_csv(&config.output.path, &rows)?;
    info!(
        path = %config.output.path.display(),
        rows = rows.len(),
        "wrote daylight low tide forecast"
    );
    Ok(rows)
}
