pub mod copier;
pub mod guid;
pub mod naming;
pub mod report;

pub use copier::{BatchCopier, UnitOutcome};
pub use guid::GuidGenerator;
pub use naming::OutputNamer;
pub use report::{OutputReport, UnitFailure};
