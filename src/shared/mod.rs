pub mod bytes;
pub mod config;
pub mod path;
