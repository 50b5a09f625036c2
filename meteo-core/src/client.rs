//! HTTP access to the forecast and history endpoints.
//!
//! Both clients share one [`HttpTransport`], built once from [`HttpConfig`] and
//! cheap to clone; clones reuse the same connection pool.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::{
    config::HttpConfig,
    error::{MeteoError, RequestFailure, Result},
};

pub mod forecast;
pub mod history;

pub use forecast::ForecastClient;
pub use history::HistoryClient;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build the shared client from `config`.
    ///
    /// Failures here are configuration problems (zero timeouts, TLS backend
    /// setup), so they are reported as `anyhow` errors like the rest of the
    /// config layer rather than as a `MeteoError`.
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        config.validate().context("Invalid HTTP settings")?;

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, timeout: config.timeout() })
    }

    /// GET `url` with `query` appended and return the final URL and the full body.
    pub(crate) async fn get_text(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<(String, String)> {
        let request = self
            .http
            .get(url)
            .query(query)
            .build()
            .map_err(|e| self.failure(url, e))?;
        let full_url = request.url().to_string();

        debug!(url = %full_url, "sending weather request");

        let res = self.http.execute(request).await.map_err(|e| self.failure(&full_url, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| self.failure(&full_url, e))?;

        if !status.is_success() {
            warn!(url = %full_url, %status, "weather endpoint returned an error status");
            return Err(MeteoError::Request {
                url: full_url,
                reason: RequestFailure::Status {
                    status: status.as_u16(),
                    body: truncate_body(&body),
                },
            });
        }

        info!(url = %full_url, bytes = body.len(), "received weather response");
        Ok((full_url, body))
    }

    fn failure(&self, url: &str, err: reqwest::Error) -> MeteoError {
        let reason = if err.is_timeout() {
            RequestFailure::Timeout { after: self.timeout }
        } else {
            RequestFailure::Transport(err)
        };

        MeteoError::Request { url: url.to_string(), reason }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_cuts_long_bodies_on_char_boundary() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[tokio::test]
    async fn transport_reports_timeout_when_peer_never_answers() {
        let (base, _listener) = testing::silent().await;
        let config = HttpConfig { timeout_secs: 1, connect_timeout_secs: 1, ..HttpConfig::default() };
        let transport = HttpTransport::new(&config).unwrap();

        let started = std::time::Instant::now();
        let err = transport.get_text(&base, &[]).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        match err {
            MeteoError::Request { reason: RequestFailure::Timeout { after }, .. } => {
                assert_eq!(after, Duration::from_secs(1));
            }
            other => panic!("expected a timeout, got {other:?}"),
        }
    }

    #[test]
    fn transport_refuses_zero_timeout() {
        let config = HttpConfig { timeout_secs: 0, ..HttpConfig::default() };

        let err = HttpTransport::new(&config).unwrap_err();
        assert!(format!("{err:#}").contains("timeout_secs must be at least 1 second"));
    }

    #[tokio::test]
    async fn transport_reports_connection_refused_as_request_error() {
        let base = testing::closed().await;
        let transport = HttpTransport::new(&HttpConfig::default()).unwrap();

        let err = transport.get_text(&base, &[]).await.unwrap_err();
        assert!(err.is_request());
    }

    #[tokio::test]
    async fn transport_rejects_unparseable_url() {
        let transport = HttpTransport::new(&HttpConfig::default()).unwrap();

        let err = transport.get_text("not a url", &[]).await.unwrap_err();
        assert!(err.is_request());
    }
}
