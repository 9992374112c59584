use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::engine::inventory::Inventory;
use crate::engine::partition::{Batch, OutputPlan};
use crate::shared::config::SplitConfig;
use crate::shared::path::sanitize_component;

/// Derives output paths: `<stem>_<scan>.<ext>` for a single scan and
/// `<stem>_<first>-<last>.<ext>` for several, next to the input by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNamer {
    dir: PathBuf,
    stem: String,
    extension: String,
}

impl OutputNamer {
    pub fn new(dir: impl Into<PathBuf>, stem: &str, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn for_input(input: &Path, config: &SplitConfig) -> Self {
        let dir = config.output_dir.clone().unwrap_or_else(|| {
            input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        });
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        Self::new(dir, &stem, &config.output_extension)
    }

    pub fn file_name(&self, first: &str, last: Option<&str>) -> String {
        let label = match last {
            Some(last) => format!(
                "{}-{}",
                sanitize_component(first),
                sanitize_component(last)
            ),
            None => sanitize_component(first),
        };
        format!("{}_{}.{}", self.stem, label, self.extension)
    }

    pub fn path_for(&self, batch: &Batch, inventory: &Inventory) -> PathBuf {
        let name_of = |index: usize| {
            inventory
                .unit(index)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| format!("Scan{}", index))
        };
        let file_name = match (batch.first(), batch.last()) {
            (Some(first), Some(last)) if batch.len() > 1 => {
                self.file_name(&name_of(first), Some(&name_of(last)))
            }
            (Some(first), _) => self.file_name(&name_of(first), None),
            _ => self.file_name("empty", None),
        };
        self.dir.join(file_name)
    }

    /// One path per batch. Colliding names (e.g. duplicate scan names) get a
    /// numeric suffix so no output overwrites another.
    pub fn assign(&self, plan: &OutputPlan, inventory: &Inventory) -> Vec<PathBuf> {
        let mut used = HashSet::new();
        plan.batches
            .iter()
            .map(|batch| {
                let base = self.path_for(batch, inventory);
                let mut candidate = base.clone();
                let mut n = 2;
                while !used.insert(candidate.clone()) {
                    candidate = with_suffix(&base, n);
                    n += 1;
                }
                candidate
            })
            .collect()
    }
}

fn with_suffix(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    };
    path.with_file_name(name)
}
