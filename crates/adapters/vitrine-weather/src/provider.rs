use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;

use vitrine_core::record::{ForecastDay, Provenance, WeatherRecord};
use vitrine_core::time::day_label;

/// Current-conditions payload subset (OpenWeatherMap `/weather`).
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub main: MainBlock,
    pub wind: WindBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

/// 3-hourly forecast payload subset (OpenWeatherMap `/forecast`).
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSlot>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastSlot {
    pub dt_txt: String,
    pub main: MainBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    /// Metres per second with `units=metric`.
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionBlock {
    pub description: String,
    pub icon: String,
}

/// Map an OpenWeatherMap icon code (e.g. `10d`) to the display symbol.
pub fn icon_for(code: &str) -> &'static str {
    match code.get(..2).unwrap_or("") {
        "01" => "☀️",
        "02" | "03" => "⛅",
        "04" => "☁️",
        "09" | "10" => "🌦️",
        "11" => "⛈️",
        "13" => "❄️",
        "50" => "🌫️",
        _ => "⛅",
    }
}

/// Collapse the provider's current conditions and 3-hourly forecast into
/// the canonical record: per-day high/low from the slot extremes, the
/// day's description taken from the slot nearest midday, at most five days.
pub fn normalize_provider(
    current: &CurrentResponse,
    forecast: &ForecastResponse,
    today: &DateTime<Local>,
) -> WeatherRecord {
    let condition = current.weather.first();
    let mut days: BTreeMap<NaiveDate, Vec<(NaiveDateTime, f64, Option<&ConditionBlock>)>> =
        BTreeMap::new();

    for slot in &forecast.list {
        let Ok(stamp) = NaiveDateTime::parse_from_str(&slot.dt_txt, "%Y-%m-%d %H:%M:%S") else {
            tracing::debug!(dt_txt = %slot.dt_txt, "skipping forecast slot with bad timestamp");
            continue;
        };
        if stamp.date() < today.date_naive() {
            continue;
        }
        days.entry(stamp.date())
            .or_default()
            .push((stamp, slot.main.temp, slot.weather.first()));
    }

    let forecast_days = days
        .into_iter()
        .take(5)
        .map(|(date, slots)| {
            let high_c = slots.iter().map(|(_, t, _)| *t).fold(f64::MIN, f64::max).round();
            let low_c = slots.iter().map(|(_, t, _)| *t).fold(f64::MAX, f64::min).round();
            let midday = slots
                .iter()
                .min_by_key(|(stamp, _, _)| (i64::from(stamp.hour()) - 12).abs())
                .and_then(|(_, _, cond)| *cond);
            let offset = (date.num_days_from_ce() - today.date_naive().num_days_from_ce()) as u32;
            ForecastDay {
                day: day_label(today, offset),
                high_c,
                low_c,
                description: midday.map_or_else(String::new, |c| c.description.clone()),
                icon: midday.map_or("⛅", |c| icon_for(&c.icon)).to_string(),
            }
        })
        .collect();

    WeatherRecord {
        temperature_c: current.main.temp.round(),
        description: condition.map_or_else(String::new, |c| c.description.clone()),
        icon: condition.map_or("⛅", |c| icon_for(&c.icon)).to_string(),
        humidity_pct: current.main.humidity,
        wind_speed_kph: (current.wind.speed * 3.6).round(),
        forecast: forecast_days,
        source: Provenance::Live,
    }
}
