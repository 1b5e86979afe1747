use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use vitrine_core::rotation::Rotation;
use vitrine_core::screen::ScreenId;
use vitrine_display::config::DisplayConfig;
use vitrine_display::state::AppState;
use vitrine_display::{TaskCommand, agent_loop, render, rotation};
use vitrine_transit::TransitSource;
use vitrine_weather::WeatherSource;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Vitrine display starting");

    let config = DisplayConfig::load();
    config.validate();

    let screens = config.screen_ids().expect("validated screen list");
    let enabled = screens.clone();
    let rotation_state = Rotation::new(screens).expect("validated screen list");

    let app = AppState::new(config, rotation_state);
    let mut stop_senders = Vec::new();
    let mut handles = Vec::new();

    if enabled.contains(&ScreenId::Weather) {
        let source = WeatherSource::new(app.config.weather.clone());
        let period = Duration::from_secs(app.config.weather.refresh_interval_secs);
        let (tx, handle) =
            agent_loop::spawn_agent("weather", source, Arc::clone(&app.weather), period);
        stop_senders.push(tx);
        handles.push(handle);
    }

    if enabled.contains(&ScreenId::Transit) {
        let source = TransitSource::new(app.config.transit.clone());
        let period = Duration::from_secs(app.config.transit.refresh_interval_secs);
        let (tx, handle) =
            agent_loop::spawn_agent("transit", source, Arc::clone(&app.transit), period);
        stop_senders.push(tx);
        handles.push(handle);
    }

    let slide = Duration::from_secs(app.config.slideshow.slide_duration_secs);
    let fade = Duration::from_millis(app.config.slideshow.fade_duration_ms);
    let (tx, handle) = rotation::spawn_rotation(Arc::clone(&app.rotation), slide, fade);
    stop_senders.push(tx);
    handles.push(handle);

    let (tx, handle) = render::spawn_renderer(app.clone());
    stop_senders.push(tx);
    handles.push(handle);

    tracing::info!(
        screens = enabled.len(),
        slide_secs = app.config.slideshow.slide_duration_secs,
        "display running"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }

    tracing::info!("shutting down");
    for tx in &stop_senders {
        let _ = tx.send(TaskCommand::Stop);
    }
    for handle in handles {
        let _ = handle.await;
    }
    tracing::info!("Vitrine display stopped");
}
