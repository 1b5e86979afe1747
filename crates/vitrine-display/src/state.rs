use std::sync::Arc;

use tokio::sync::RwLock;

use vitrine_core::agent::AgentState;
use vitrine_core::record::{DepartureRecord, WeatherRecord};
use vitrine_core::rotation::Rotation;

use crate::config::DisplayConfig;

pub type SharedRotation = Arc<RwLock<Rotation>>;
pub type SharedAgent<R> = Arc<RwLock<AgentState<R>>>;

/// Everything the renderer reads. Each field is written only by its owning
/// task: the rotation driver mutates `rotation`, each refresh task mutates
/// its own agent snapshot.
#[derive(Clone)]
pub struct AppState {
    pub rotation: SharedRotation,
    pub weather: SharedAgent<WeatherRecord>,
    pub transit: SharedAgent<Vec<DepartureRecord>>,
    pub config: Arc<DisplayConfig>,
}

impl AppState {
    pub fn new(config: DisplayConfig, rotation: Rotation) -> Self {
        Self {
            rotation: Arc::new(RwLock::new(rotation)),
            weather: Arc::new(RwLock::new(AgentState::new())),
            transit: Arc::new(RwLock::new(AgentState::new())),
            config: Arc::new(config),
        }
    }
}
