pub mod splitter;
pub mod summary;

pub use splitter::Splitter;
pub use summary::SplitSummary;
