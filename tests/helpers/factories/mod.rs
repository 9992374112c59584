pub mod scan_factory;
pub mod unit_descriptor_factory;

pub use scan_factory::ScanFactory;
pub use unit_descriptor_factory::UnitDescriptorFactory;
