pub mod advisory;
pub mod scanner;
pub mod unit;

pub use advisory::Advisory;
pub use scanner::{Inventory, InventoryScanner, ScannedUnit, SkippedScan, UnitAdvisory};
pub use unit::UnitDescriptor;
