pub mod agent_loop;
pub mod config;
pub mod render;
pub mod rotation;
pub mod state;

/// Command understood by every long-running display task.
#[derive(Debug)]
pub enum TaskCommand {
    Stop,
}
