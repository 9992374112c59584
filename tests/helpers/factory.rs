pub use super::factories::{ScanFactory, UnitDescriptorFactory};

pub struct Factory;

impl Factory {
    pub fn scan() -> ScanFactory {
        ScanFactory::new()
    }

    pub fn unit() -> UnitDescriptorFactory {
        UnitDescriptorFactory::new()
    }
}
