use serde::Deserialize;

/// Transit adapter configuration, read from the `[transit]` section of
/// `vitrine.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    /// Trusted local proxy in front of the provider, tried first when set.
    pub proxy_url: Option<String>,
    /// Direct provider endpoint for the configured stop area.
    pub direct_url: String,
    /// Public CORS relay prefix; the direct URL is appended to it. Last
    /// resort when set.
    pub cors_relay_prefix: Option<String>,
    /// Stop name shown in the board header.
    pub stop_name: String,
    /// Exact destination names to keep; everything else is filtered out.
    pub allowed_destinations: Vec<String>,
    /// Timing point code that maps to platform A; all others are B.
    pub platform_a_code: String,
    /// Minutes subtracted from the provider's expected time, compensating
    /// for its over-estimation, before filtering and display.
    pub skew_minutes: i64,
    pub refresh_interval_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            proxy_url: None,
            direct_url: "https://v0.ovapi.nl/stopareacode/amrrfl/".to_string(),
            cors_relay_prefix: None,
            stop_name: "Buurthuis Overdie Ontmoet".to_string(),
            allowed_destinations: vec![
                "Station Alkmaar".to_string(),
                "Overdie".to_string(),
            ],
            platform_a_code: "36000240".to_string(),
            skew_minutes: 3,
            refresh_interval_secs: 30,
            http_timeout_secs: 10,
        }
    }
}

impl TransitConfig {
    /// Acquisition URLs in priority order: proxy, direct, CORS relay.
    pub fn strategy_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        if let Some(proxy) = &self.proxy_url {
            urls.push(proxy.clone());
        }
        urls.push(self.direct_url.clone());
        if let Some(prefix) = &self.cors_relay_prefix {
            urls.push(format!("{prefix}{}", self.direct_url));
        }
        urls
    }
}
