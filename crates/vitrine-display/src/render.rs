use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use vitrine_core::agent::AgentState;
use vitrine_core::record::{DepartureRecord, Provenance, WeatherRecord};
use vitrine_core::screen::ScreenId;
use vitrine_core::time::{format_hms, format_long_date};

use crate::TaskCommand;
use crate::config::CenterConfig;
use crate::state::AppState;

/// ANSI clear-screen plus cursor-home, written before every frame.
const CLEAR: &str = "\x1b[2J\x1b[H";
/// How often the visible frame is recomposed.
const REDRAW_PERIOD: Duration = Duration::from_secs(1);

pub fn clock_frame(now: &DateTime<Local>, center: &CenterConfig) -> String {
    format!(
        "\n\n        {}\n        {}\n\n\n  {}\n  {}\n",
        format_hms(now),
        format_long_date(now),
        center.name,
        center.welcome_message,
    )
}

pub fn weather_frame(snapshot: &AgentState<WeatherRecord>, location_name: &str) -> String {
    let Some(weather) = &snapshot.last_good else {
        return format!("\n  Loading weather for {location_name}...\n");
    };

    let mut frame = format!(
        "\n  Weather in {location_name}\n\n  {}  {:.0}°C  {}\n  💧 {:.0}%   💨 {:.0} km/h\n",
        weather.icon,
        weather.temperature_c,
        weather.description,
        weather.humidity_pct,
        weather.wind_speed_kph,
    );

    if !weather.forecast.is_empty() {
        frame.push_str("\n  Forecast\n");
        for day in &weather.forecast {
            frame.push_str(&format!(
                "  {:<10} {}  {:.0}°/{:.0}°  {}\n",
                day.day, day.icon, day.high_c, day.low_c, day.description
            ));
        }
    }

    if weather.source == Provenance::Fallback {
        frame.push_str("\n  Estimated values, live weather unavailable\n");
    }
    if let Some(updated) = &snapshot.last_updated {
        frame.push_str(&format!("\n  Last updated: {}\n", format_hms(updated)));
    }
    frame
}

pub fn transit_frame(snapshot: &AgentState<Vec<DepartureRecord>>, stop_name: &str) -> String {
    let Some(board) = &snapshot.last_good else {
        return "\n  Loading bus times...\n".to_string();
    };

    let mut frame = format!("\n  🚌 Bus Departures\n  {stop_name}\n\n");

    if board.is_empty() {
        frame.push_str("  No departures\n");
    } else {
        frame.push_str(&format!(
            "  {:<6}{:<28}{:<12}{}\n",
            "Line", "Destination", "Time", "Platform"
        ));
        for departure in board {
            let mut time = departure.departure_time_local.clone();
            if departure.delay_minutes > 0 {
                time.push_str(&format!(" +{}m", departure.delay_minutes));
            }
            frame.push_str(&format!(
                "  {:<6}{:<28}{:<12}{}{}\n",
                departure.line,
                departure.destination,
                time,
                departure.platform,
                if departure.is_driving() { "  • Onderweg" } else { "" },
            ));
        }
    }

    if board.iter().any(|d| d.source == Provenance::Fallback) {
        frame.push_str("\n  Placeholder times, live departures unavailable\n");
    }
    if let Some(updated) = &snapshot.last_updated {
        frame.push_str(&format!("\n  Last updated: {}\n", format_hms(updated)));
    }
    frame.push_str("\n  Real-time departures • Check platform displays for updates\n");
    frame
}

/// Compose the frame for whatever the rotation says is on screen. The fade
/// window renders blank.
pub async fn compose_frame(app: &AppState) -> String {
    let screen = {
        let rotation = app.rotation.read().await;
        if !rotation.is_visible() {
            return String::new();
        }
        rotation.active_screen()
    };

    match screen {
        ScreenId::Clock => clock_frame(&Local::now(), &app.config.center),
        ScreenId::Weather => {
            let snapshot = app.weather.read().await;
            weather_frame(&snapshot, &app.config.weather.location.name)
        },
        ScreenId::Transit => {
            let snapshot = app.transit.read().await;
            transit_frame(&snapshot, &app.config.transit.stop_name)
        },
    }
}

/// Spawn the terminal output loop: clear and redraw once per second.
pub fn spawn_renderer(app: AppState) -> (mpsc::UnboundedSender<TaskCommand>, JoinHandle<()>) {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(REDRAW_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let frame = compose_frame(&app).await;
                    let mut stdout = std::io::stdout();
                    let _ = write!(stdout, "{CLEAR}{frame}");
                    let _ = stdout.flush();
                }
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(TaskCommand::Stop) | None => break,
                    }
                }
            }
        }
    });
    (cmd_tx, handle)
}
