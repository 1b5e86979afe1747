use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Deserialize;

/// OVapi stop-area payload: `stop_area_code -> timing_point_code -> passes`.
pub type StopAreaResponse = HashMap<String, HashMap<String, TimingPoint>>;

/// One timing point (physical stop position) within the stop area.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimingPoint {
    #[serde(default, rename = "Passes")]
    pub passes: HashMap<String, Pass>,
}

/// One scheduled vehicle pass at a timing point.
#[derive(Debug, Clone, Deserialize)]
pub struct Pass {
    #[serde(rename = "DestinationName50")]
    pub destination: String,
    #[serde(rename = "LinePublicNumber")]
    pub line: String,
    #[serde(rename = "ExpectedDepartureTime")]
    pub expected_departure: String,
    #[serde(rename = "TargetDepartureTime")]
    pub target_departure: String,
    #[serde(rename = "TripStopStatus")]
    pub status: String,
    #[serde(rename = "TimingPointCode")]
    pub timing_point_code: String,
}

/// OVapi timestamps are local time without an offset, e.g.
/// `2026-08-24T10:05:00`.
pub fn parse_departure_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
}
