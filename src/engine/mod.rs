pub mod copy;
pub mod errors;
pub mod estimate;
pub mod events;
pub mod inventory;
pub mod partition;
pub mod splitter;

pub use errors::*;
