use chrono::NaiveDate;
use tracing::debug;

use crate::{
    config::Config,
    error::Result,
    model::{Coordinates, WeatherKind, WeatherResponse},
};

use super::HttpTransport;

/// Fetches raw historical observations for a coordinate pair on a single day.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    transport: HttpTransport,
    endpoint: String,
}

impl HistoryClient {
    pub fn new(transport: HttpTransport, endpoint: impl Into<String>) -> Self {
        Self { transport, endpoint: endpoint.into() }
    }

    pub fn from_config(transport: HttpTransport, config: &Config) -> Self {
        Self::new(transport, config.endpoints.history_url.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self, coordinates: Coordinates, date: NaiveDate) -> Result<WeatherResponse> {
        debug!(%coordinates, %date, "fetching history");

        let query = [
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
        ];
        let (url, body) = self.transport.get_text(&self.endpoint, &query).await?;

        Ok(WeatherResponse {
            kind: WeatherKind::History,
            coordinates,
            date: Some(date),
            url,
            body,
        })
    }
}
