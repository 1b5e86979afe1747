use chrono::{DateTime, Datelike, Local, Timelike};

/// HH:MM, as shown on the departure board.
pub fn format_hm(dt: &DateTime<Local>) -> String {
    format!("{:02}:{:02}", dt.hour(), dt.minute())
}

/// HH:MM:SS, as shown on the clock screen and the last-updated line.
pub fn format_hms(dt: &DateTime<Local>) -> String {
    format!("{:02}:{:02}:{:02}", dt.hour(), dt.minute(), dt.second())
}

/// Long date for the clock screen, e.g. "Monday 24 August 2026".
pub fn format_long_date(dt: &DateTime<Local>) -> String {
    format!(
        "{} {} {} {}",
        dt.format("%A"),
        dt.day(),
        dt.format("%B"),
        dt.year()
    )
}

/// Forecast column label for a day `offset` days from `today`:
/// "Today", "Tomorrow", then the weekday name.
pub fn day_label(today: &DateTime<Local>, offset: u32) -> String {
    match offset {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => {
            let day = *today + chrono::Duration::days(i64::from(n));
            day.format("%A").to_string()
        },
    }
}
