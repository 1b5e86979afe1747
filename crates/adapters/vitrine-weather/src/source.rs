use chrono::Local;

use vitrine_core::agent::{DataSource, SourceError};
use vitrine_core::record::WeatherRecord;

use crate::config::{WeatherConfig, WeatherMode};
use crate::provider::{CurrentResponse, ForecastResponse, normalize_provider};
use crate::synth;

/// Weather source selected by configuration: local synthesis or a real
/// provider behind the same contract. The rotation controller and renderers
/// never see the difference.
pub enum WeatherSource {
    Synthetic,
    Provider {
        config: WeatherConfig,
        client: reqwest::Client,
    },
}

impl WeatherSource {
    pub fn new(config: WeatherConfig) -> Self {
        match config.mode {
            WeatherMode::Synthetic => Self::Synthetic,
            WeatherMode::Provider => {
                let client = reqwest::Client::builder()
                    .user_agent("vitrine-weather/0.1")
                    .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
                    .build()
                    .expect("Failed to create HTTP client");
                Self::Provider { config, client }
            },
        }
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, SourceError> {
    let resp = client
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

impl DataSource for WeatherSource {
    type Record = WeatherRecord;

    async fn acquire(&self) -> Result<WeatherRecord, SourceError> {
        match self {
            Self::Synthetic => Ok(synth::synthesize(&mut rand::rng(), &Local::now())),
            Self::Provider { config, client } => {
                let key = config.api_key.as_deref().unwrap_or_default();
                let base = &config.api_base_url;
                let (lat, lon) = (config.location.lat, config.location.lon);
                let current: CurrentResponse = get_json(
                    client,
                    &format!("{base}/weather?lat={lat}&lon={lon}&units=metric&appid={key}"),
                )
                .await?;
                let forecast: ForecastResponse = get_json(
                    client,
                    &format!("{base}/forecast?lat={lat}&lon={lon}&units=metric&appid={key}"),
                )
                .await?;
                let record = normalize_provider(&current, &forecast, &Local::now());
                tracing::debug!(
                    location = %config.location.name,
                    temperature_c = record.temperature_c,
                    "weather refresh succeeded"
                );
                Ok(record)
            },
        }
    }

    fn fallback(&self) -> WeatherRecord {
        synth::fallback_record(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::record::Provenance;

    #[tokio::test]
    async fn synthetic_mode_always_produces_a_record() {
        let source = WeatherSource::new(WeatherConfig::default());
        let record = source.acquire().await.unwrap();
        assert_eq!(record.source, Provenance::Live);
        assert_eq!(record.forecast.len(), 5);
    }

    #[tokio::test]
    async fn provider_mode_fetches_and_normalizes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/weather\?.*$".to_string()))
            .with_body(
                r#"{ "main": { "temp": 12.3, "humidity": 80 },
                     "wind": { "speed": 10.0 },
                     "weather": [ { "description": "overcast clouds", "icon": "04d" } ] }"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/forecast\?.*$".to_string()))
            .with_body(r#"{ "list": [] }"#)
            .create_async()
            .await;

        let source = WeatherSource::new(WeatherConfig {
            mode: WeatherMode::Provider,
            api_key: Some("test-key".to_string()),
            api_base_url: server.url(),
            ..WeatherConfig::default()
        });

        let record = source.acquire().await.unwrap();
        assert_eq!(record.temperature_c, 12.0);
        assert_eq!(record.wind_speed_kph, 36.0);
        assert_eq!(record.icon, "☁️");
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_source_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/weather\?.*$".to_string()))
            .with_status(401)
            .create_async()
            .await;

        let source = WeatherSource::new(WeatherConfig {
            mode: WeatherMode::Provider,
            api_key: Some("bad-key".to_string()),
            api_base_url: server.url(),
            ..WeatherConfig::default()
        });

        let err = source.acquire().await.expect_err("401 should fail");
        assert!(matches!(err, SourceError::Status(401)));
    }

    #[test]
    fn fallback_is_labeled() {
        let source = WeatherSource::new(WeatherConfig::default());
        assert_eq!(source.fallback().source, Provenance::Fallback);
    }
}
