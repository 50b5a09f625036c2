use tracing::debug;

use crate::{
    config::Config,
    error::Result,
    model::{Coordinates, WeatherKind, WeatherResponse},
};

use super::HttpTransport;

/// Fetches raw forecast data for a coordinate pair.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    transport: HttpTransport,
    endpoint: String,
}

impl ForecastClient {
    pub fn new(transport: HttpTransport, endpoint: impl Into<String>) -> Self {
        Self { transport, endpoint: endpoint.into() }
    }

    pub fn from_config(transport: HttpTransport, config: &Config) -> Self {
        Self::new(transport, config.endpoints.forecast_url.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherResponse> {
        debug!(%coordinates, "fetching forecast");

        let query = [
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
        ];
        let (url, body) = self.transport.get_text(&self.endpoint, &query).await?;

        Ok(WeatherResponse { kind: WeatherKind::Forecast, coordinates, date: None, url, body })
    }
}
