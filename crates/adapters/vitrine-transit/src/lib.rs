pub mod config;
pub mod normalize;
pub mod source;
pub mod wire;

pub use config::TransitConfig;
pub use source::TransitSource;
