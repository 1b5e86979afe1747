pub mod config;
pub mod provider;
pub mod source;
pub mod synth;

pub use config::{WeatherConfig, WeatherMode};
pub use source::WeatherSource;
