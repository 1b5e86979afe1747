use chrono::{DateTime, Local};
use rand::Rng;

use vitrine_core::record::{ForecastDay, Provenance, WeatherRecord};
use vitrine_core::time::day_label;

/// Fixed forecast shape for synthetic and fallback records; only the day
/// labels vary with the calendar.
const FORECAST_TEMPLATE: [(f64, f64, &str, &str); 5] = [
    (20.0, 15.0, "Partly Cloudy", "⛅"),
    (22.0, 16.0, "Sunny", "☀️"),
    (19.0, 14.0, "Light Rain", "🌦️"),
    (17.0, 12.0, "Cloudy", "☁️"),
    (21.0, 15.0, "Sunny", "☀️"),
];

fn template_forecast(today: &DateTime<Local>) -> Vec<ForecastDay> {
    FORECAST_TEMPLATE
        .iter()
        .enumerate()
        .map(|(i, (high_c, low_c, description, icon))| ForecastDay {
            day: day_label(today, i as u32),
            high_c: *high_c,
            low_c: *low_c,
            description: (*description).to_string(),
            icon: (*icon).to_string(),
        })
        .collect()
}

/// Generate a plausible current-conditions record: 15–25 °C, 50–80 %
/// humidity, 5–20 km/h wind.
pub fn synthesize(rng: &mut impl Rng, today: &DateTime<Local>) -> WeatherRecord {
    WeatherRecord {
        temperature_c: rng.random_range(15.0..=25.0_f64).round(),
        description: "Partly Cloudy".to_string(),
        icon: "⛅".to_string(),
        humidity_pct: rng.random_range(50.0..=80.0_f64).round(),
        wind_speed_kph: rng.random_range(5.0..=20.0_f64).round(),
        forecast: template_forecast(today),
        source: Provenance::Live,
    }
}

/// Deterministic mid-range record installed when the first provider refresh
/// ever fails.
pub fn fallback_record(today: &DateTime<Local>) -> WeatherRecord {
    WeatherRecord {
        temperature_c: 18.0,
        description: "Partly Cloudy".to_string(),
        icon: "⛅".to_string(),
        humidity_pct: 65.0,
        wind_speed_kph: 12.0,
        forecast: template_forecast(today),
        source: Provenance::Fallback,
    }
}
