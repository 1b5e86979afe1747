pub mod agent;
pub mod record;
pub mod rotation;
pub mod screen;
pub mod time;
