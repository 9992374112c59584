use crate::engine::inventory::UnitDescriptor;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct UnitDescriptorFactory {
    params: HashMap<String, Value>,
}

impl UnitDescriptorFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("name".into(), json!("Scan0"));
        params.insert("point_count".into(), json!(1_000));
        params.insert("source_index".into(), json!(0));
        params.insert("estimated_size_bytes".into(), json!(30_000));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> UnitDescriptor {
        UnitDescriptor {
            name: self.params["name"].as_str().unwrap().to_string(),
            point_count: self.params["point_count"].as_u64().unwrap(),
            source_index: self.params["source_index"].as_u64().unwrap() as usize,
            estimated_size_bytes: self.params["estimated_size_bytes"].as_u64().unwrap(),
        }
    }

    /// One descriptor per size, indexed and named in order.
    pub fn sized(sizes: &[u64]) -> Vec<UnitDescriptor> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                Self::new()
                    .with("name", format!("Scan{}", i))
                    .with("source_index", i as u64)
                    .with("estimated_size_bytes", *size)
                    .create()
            })
            .collect()
    }
}
