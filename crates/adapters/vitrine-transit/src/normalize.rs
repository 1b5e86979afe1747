use chrono::{Duration, NaiveDateTime, Timelike};

use vitrine_core::record::{DepartureRecord, Platform, Provenance};

use crate::config::TransitConfig;
use crate::wire::{StopAreaResponse, parse_departure_time};

/// The board never shows more than this many departures.
pub const MAX_DEPARTURES: usize = 8;

/// Turn a raw stop-area payload into the display-ready departure board.
///
/// Filters to the configured destinations and to departures whose
/// skew-adjusted expected time is still in the future, computes the clamped
/// delay, maps the timing point code to a platform letter, sorts on the
/// adjusted timestamp (not the formatted string, which would misorder
/// across midnight), and truncates to [`MAX_DEPARTURES`]. The HH:MM display
/// string is derived only after sorting.
pub fn normalize(
    payload: &StopAreaResponse,
    config: &TransitConfig,
    now: NaiveDateTime,
) -> Vec<DepartureRecord> {
    let skew = Duration::minutes(config.skew_minutes);
    let mut upcoming: Vec<(NaiveDateTime, DepartureRecord)> = Vec::new();

    for stop_area in payload.values() {
        for timing_point in stop_area.values() {
            for pass in timing_point.passes.values() {
                if !config
                    .allowed_destinations
                    .iter()
                    .any(|d| d == &pass.destination)
                {
                    continue;
                }

                let (Ok(expected), Ok(target)) = (
                    parse_departure_time(&pass.expected_departure),
                    parse_departure_time(&pass.target_departure),
                ) else {
                    tracing::debug!(
                        line = %pass.line,
                        expected = %pass.expected_departure,
                        target = %pass.target_departure,
                        "skipping pass with unparseable departure time"
                    );
                    continue;
                };

                let adjusted = expected - skew;
                if adjusted <= now {
                    continue;
                }

                let delay_minutes = delay_minutes(expected, target);
                let platform = if pass.timing_point_code == config.platform_a_code {
                    Platform::A
                } else {
                    Platform::B
                };

                upcoming.push((
                    adjusted,
                    DepartureRecord {
                        line: pass.line.clone(),
                        destination: pass.destination.clone(),
                        departure_time_local: String::new(),
                        delay_minutes,
                        platform,
                        status: pass.status.clone(),
                        source: Provenance::Live,
                    },
                ));
            }
        }
    }

    upcoming.sort_by_key(|(adjusted, _)| *adjusted);
    upcoming.truncate(MAX_DEPARTURES);
    upcoming
        .into_iter()
        .map(|(adjusted, record)| DepartureRecord {
            departure_time_local: format!("{:02}:{:02}", adjusted.hour(), adjusted.minute()),
            ..record
        })
        .collect()
}

/// Whole minutes the vehicle runs behind schedule, clamped to zero.
pub fn delay_minutes(expected: NaiveDateTime, target: NaiveDateTime) -> u32 {
    let delay_secs = (expected - target).num_seconds();
    (delay_secs as f64 / 60.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn pass_json(dest: &str, line: &str, expected: &str, target: &str, code: &str) -> String {
        format!(
            r#"{{
                "DestinationName50": "{dest}",
                "LinePublicNumber": "{line}",
                "ExpectedDepartureTime": "{expected}",
                "TargetDepartureTime": "{target}",
                "TripStopStatus": "PLANNED",
                "TimingPointCode": "{code}"
            }}"#
        )
    }

    fn payload_of(passes: &[String]) -> StopAreaResponse {
        let entries: Vec<String> = passes
            .iter()
            .enumerate()
            .map(|(i, p)| format!(r#""pass-{i}": {p}"#))
            .collect();
        let raw = format!(
            r#"{{ "amrrfl": {{ "36000240": {{ "Passes": {{ {} }} }} }} }}"#,
            entries.join(",")
        );
        serde_json::from_str(&raw).unwrap()
    }

    fn no_skew_config() -> TransitConfig {
        TransitConfig {
            skew_minutes: 0,
            ..TransitConfig::default()
        }
    }

    #[test]
    fn filters_to_allowed_destinations() {
        let payload = payload_of(&[
            pass_json("Overdie", "8", "2026-08-24T10:10:00", "2026-08-24T10:10:00", "1"),
            pass_json("Centrum", "2", "2026-08-24T10:12:00", "2026-08-24T10:12:00", "1"),
            pass_json(
                "Station Alkmaar",
                "163",
                "2026-08-24T10:15:00",
                "2026-08-24T10:15:00",
                "1",
            ),
        ]);
        let board = normalize(&payload, &no_skew_config(), at(24, 10, 0));
        let destinations: Vec<&str> = board.iter().map(|d| d.destination.as_str()).collect();
        assert_eq!(destinations, vec!["Overdie", "Station Alkmaar"]);
    }

    #[test]
    fn delay_is_rounded_minutes() {
        assert_eq!(delay_minutes(at(24, 10, 5), at(24, 10, 0)), 5);
    }

    #[test]
    fn early_departure_clamps_to_zero() {
        assert_eq!(delay_minutes(at(24, 9, 58), at(24, 10, 0)), 0);
    }

    #[test]
    fn platform_follows_timing_point_code() {
        let payload = payload_of(&[
            pass_json("Overdie", "8", "2026-08-24T10:10:00", "2026-08-24T10:10:00", "36000240"),
            pass_json("Overdie", "8", "2026-08-24T10:20:00", "2026-08-24T10:20:00", "36000999"),
        ]);
        let board = normalize(&payload, &no_skew_config(), at(24, 10, 0));
        assert_eq!(board[0].platform, Platform::A);
        assert_eq!(board[1].platform, Platform::B);
    }

    #[test]
    fn past_departures_are_dropped() {
        let payload = payload_of(&[
            pass_json("Overdie", "8", "2026-08-24T09:55:00", "2026-08-24T09:55:00", "1"),
            pass_json("Overdie", "8", "2026-08-24T10:05:00", "2026-08-24T10:05:00", "1"),
        ]);
        let board = normalize(&payload, &no_skew_config(), at(24, 10, 0));
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].departure_time_local, "10:05");
    }

    #[test]
    fn skew_shifts_filter_and_display() {
        // Expected 10:02 with 3 minutes of provider over-estimation is
        // effectively 09:59, already gone at 10:00.
        let payload = payload_of(&[
            pass_json("Overdie", "8", "2026-08-24T10:02:00", "2026-08-24T10:02:00", "1"),
            pass_json("Overdie", "8", "2026-08-24T10:30:00", "2026-08-24T10:30:00", "1"),
        ]);
        let cfg = TransitConfig::default();
        assert_eq!(cfg.skew_minutes, 3);
        let board = normalize(&payload, &cfg, at(24, 10, 0));
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].departure_time_local, "10:27");
    }

    #[test]
    fn sorts_and_truncates_to_eight() {
        // Ten distinct future departures, deliberately out of order.
        let minutes = [50, 10, 40, 5, 55, 20, 35, 15, 45, 25];
        let passes: Vec<String> = minutes
            .iter()
            .map(|m| {
                let stamp = format!("2026-08-24T11:{m:02}:00");
                pass_json("Overdie", "8", &stamp, &stamp, "1")
            })
            .collect();
        let board = normalize(&payload_of(&passes), &no_skew_config(), at(24, 10, 0));
        assert_eq!(board.len(), MAX_DEPARTURES);
        let times: Vec<&str> = board.iter().map(|d| d.departure_time_local.as_str()).collect();
        assert_eq!(
            times,
            vec!["11:05", "11:10", "11:15", "11:20", "11:25", "11:35", "11:40", "11:45"]
        );
    }

    #[test]
    fn midnight_boundary_sorts_on_timestamp_not_string() {
        // 23:50 today departs before 00:10 tomorrow, even though "00:10"
        // sorts first as a string.
        let payload = payload_of(&[
            pass_json("Overdie", "8", "2026-08-25T00:10:00", "2026-08-25T00:10:00", "1"),
            pass_json("Overdie", "8", "2026-08-24T23:50:00", "2026-08-24T23:50:00", "1"),
        ]);
        let board = normalize(&payload, &no_skew_config(), at(24, 23, 40));
        let times: Vec<&str> = board.iter().map(|d| d.departure_time_local.as_str()).collect();
        assert_eq!(times, vec!["23:50", "00:10"]);
    }

    #[test]
    fn unparseable_pass_is_skipped_not_fatal() {
        let payload = payload_of(&[
            pass_json("Overdie", "8", "whenever", "2026-08-24T10:10:00", "1"),
            pass_json("Overdie", "8", "2026-08-24T10:10:00", "2026-08-24T10:10:00", "1"),
        ]);
        let board = normalize(&payload, &no_skew_config(), at(24, 10, 0));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn live_records_are_labeled_live() {
        let payload = payload_of(&[pass_json(
            "Overdie",
            "8",
            "2026-08-24T10:10:00",
            "2026-08-24T10:10:00",
            "1",
        )]);
        let board = normalize(&payload, &no_skew_config(), at(24, 10, 0));
        assert_eq!(board[0].source, Provenance::Live);
    }
}
