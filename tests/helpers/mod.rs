pub mod factories;
pub mod factory;
pub mod memory_container;
pub mod recording_sink;
