use serde::{Deserialize, Serialize};

/// Whether a record came from a live provider or the built-in fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Live,
    Fallback,
}

/// Boarding platform at the stop, derived from the timing point code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    A,
    B,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// One normalized departure row on the transit board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureRecord {
    pub line: String,
    pub destination: String,
    /// Local departure time, formatted HH:MM after sorting.
    pub departure_time_local: String,
    /// Delay in whole minutes, clamped to zero.
    pub delay_minutes: u32,
    pub platform: Platform,
    /// Provider trip status, e.g. PLANNED or DRIVING.
    pub status: String,
    pub source: Provenance,
}

impl DepartureRecord {
    /// Vehicle currently on its way to the stop.
    pub fn is_driving(&self) -> bool {
        self.status == "DRIVING"
    }
}

/// One day in the weather forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub high_c: f64,
    pub low_c: f64,
    pub description: String,
    pub icon: String,
}

/// Normalized current conditions plus a short forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature_c: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: f64,
    pub wind_speed_kph: f64,
    pub forecast: Vec<ForecastDay>,
    pub source: Provenance,
}
