use chrono::{DateTime, Local};

use vitrine_core::agent::{DataSource, SourceError};
use vitrine_core::record::{DepartureRecord, Platform, Provenance};
use vitrine_core::time::format_hm;

use crate::config::TransitConfig;
use crate::normalize::normalize;
use crate::wire::StopAreaResponse;

/// Live departure board source with a prioritized acquisition chain.
pub struct TransitSource {
    config: TransitConfig,
    client: reqwest::Client,
}

impl TransitSource {
    pub fn new(config: TransitConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("vitrine-transit/0.1")
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    async fn fetch(&self, url: &str) -> Result<StopAreaResponse, SourceError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }
        resp.json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

impl DataSource for TransitSource {
    type Record = Vec<DepartureRecord>;

    /// Try each strategy URL in order; the first successful, parseable
    /// response wins. Exhausting the chain is one overall failure.
    async fn acquire(&self) -> Result<Self::Record, SourceError> {
        for url in self.config.strategy_urls() {
            match self.fetch(&url).await {
                Ok(payload) => {
                    let now = Local::now().naive_local();
                    let board = normalize(&payload, &self.config, now);
                    tracing::debug!(url, departures = board.len(), "transit refresh succeeded");
                    return Ok(board);
                },
                Err(e) => {
                    tracing::warn!(url, error = %e, "transit strategy failed, trying next");
                },
            }
        }
        Err(SourceError::Exhausted)
    }

    fn fallback(&self) -> Self::Record {
        fallback_board(Local::now())
    }
}

/// Deterministic, clearly-labeled stand-in board shown when live data has
/// never been available. Times are derived from `now` so the entries stay
/// plausibly near-future.
pub fn fallback_board(now: DateTime<Local>) -> Vec<DepartureRecord> {
    vec![
        DepartureRecord {
            line: "8".to_string(),
            destination: "Oud Overdie".to_string(),
            departure_time_local: format_hm(&(now + chrono::Duration::minutes(5))),
            delay_minutes: 0,
            platform: Platform::B,
            status: "PLANNED".to_string(),
            source: Provenance::Fallback,
        },
        DepartureRecord {
            line: "163".to_string(),
            destination: "Alkmaar Station".to_string(),
            departure_time_local: format_hm(&(now + chrono::Duration::minutes(12))),
            delay_minutes: 2,
            platform: Platform::A,
            status: "DRIVING".to_string(),
            source: Provenance::Fallback,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload_with_departure_at(stamp: &str) -> String {
        format!(
            r#"{{
                "amrrfl": {{
                    "36000240": {{
                        "Passes": {{
                            "pass-1": {{
                                "DestinationName50": "Overdie",
                                "LinePublicNumber": "8",
                                "ExpectedDepartureTime": "{stamp}",
                                "TargetDepartureTime": "{stamp}",
                                "TripStopStatus": "PLANNED",
                                "TimingPointCode": "36000240"
                            }}
                        }}
                    }}
                }}
            }}"#
        )
    }

    fn future_stamp() -> String {
        let soon = Local::now() + chrono::Duration::minutes(30);
        soon.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    #[test]
    fn fallback_board_is_labeled_and_non_empty() {
        let now = Local.with_ymd_and_hms(2026, 8, 24, 10, 0, 0).unwrap();
        let board = fallback_board(now);
        assert_eq!(board.len(), 2);
        assert!(board.iter().all(|d| d.source == Provenance::Fallback));
        assert_eq!(board[0].departure_time_local, "10:05");
        assert_eq!(board[1].departure_time_local, "10:12");
        assert_eq!(board[1].delay_minutes, 2);
        assert_eq!(board[1].platform, Platform::A);
    }

    #[tokio::test]
    async fn first_working_strategy_wins() {
        let mut server = mockito::Server::new_async().await;
        let bad = server
            .mock("GET", "/proxy/stop")
            .with_status(502)
            .create_async()
            .await;
        let good = server
            .mock("GET", "/direct/stop")
            .with_header("content-type", "application/json")
            .with_body(payload_with_departure_at(&future_stamp()))
            .create_async()
            .await;

        let source = TransitSource::new(TransitConfig {
            proxy_url: Some(format!("{}/proxy/stop", server.url())),
            direct_url: format!("{}/direct/stop", server.url()),
            cors_relay_prefix: None,
            ..TransitConfig::default()
        });

        let board = source.acquire().await.expect("direct strategy should win");
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].line, "8");
        bad.assert_async().await;
        good.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_body_falls_through_to_next_strategy() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/proxy/stop")
            .with_body("<html>not json</html>")
            .create_async()
            .await;
        server
            .mock("GET", "/direct/stop")
            .with_body(payload_with_departure_at(&future_stamp()))
            .create_async()
            .await;

        let source = TransitSource::new(TransitConfig {
            proxy_url: Some(format!("{}/proxy/stop", server.url())),
            direct_url: format!("{}/direct/stop", server.url()),
            ..TransitConfig::default()
        });

        let board = source.acquire().await.expect("second strategy should win");
        assert_eq!(board.len(), 1);
    }

    #[tokio::test]
    async fn exhausted_chain_reports_one_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/direct/stop")
            .with_status(500)
            .create_async()
            .await;

        let source = TransitSource::new(TransitConfig {
            proxy_url: None,
            direct_url: format!("{}/direct/stop", server.url()),
            cors_relay_prefix: None,
            ..TransitConfig::default()
        });

        let err = source.acquire().await.expect_err("chain should exhaust");
        assert!(matches!(err, SourceError::Exhausted));
    }
}
