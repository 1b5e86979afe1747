use serde::Deserialize;

/// How the weather agent obtains its record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherMode {
    /// Plausible values generated locally, no network. The default.
    #[default]
    Synthetic,
    /// OpenWeatherMap-compatible HTTP provider.
    Provider,
}

/// Weather adapter configuration, read from the `[weather]` section of
/// `vitrine.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub mode: WeatherMode,
    pub location: LocationConfig,
    /// Provider API key; required only in provider mode.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub refresh_interval_secs: u64,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        // Alkmaar, Netherlands
        Self {
            lat: 52.6317,
            lon: 4.7481,
            name: "Alkmaar".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            mode: WeatherMode::Synthetic,
            location: LocationConfig::default(),
            api_key: None,
            api_base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            refresh_interval_secs: 600,
            http_timeout_secs: 10,
        }
    }
}
