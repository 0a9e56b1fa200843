//! Simulation configuration.
//!
//! All parameters have defaults; a TOML file may override any subset of them.
//!
//! ```toml
//! milestones = [1, 10, 100, 1000]
//! live_policy = { threshold = 128 }
//! output_dir = "out"
//! parallel = true
//! ```

use crate::{Error, LivePolicy, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MILESTONES: [u64; 4] = [1, 10, 100, 1000];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Generations at which a snapshot is written.
    pub milestones: Vec<u64>,

    /// How starting-position pixels map to live cells.
    pub live_policy: LivePolicy,

    /// Where snapshots go. Default: the example folder itself.
    pub output_dir: Option<PathBuf>,

    /// Step generations on the rayon pool.
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            milestones: DEFAULT_MILESTONES.to_vec(),
            live_policy: LivePolicy::default(),
            output_dir: None,
            parallel: true,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Sort and de-duplicate milestones. An empty list or generation 0 is rejected.
    pub fn normalized(mut self) -> Result<Self> {
        if self.milestones.is_empty() {
            return Err(Error::Config("at least one milestone is required".into()));
        }
        if self.milestones.contains(&0) {
            return Err(Error::Config("milestones start at generation 1".into()));
        }
        self.milestones = self.milestones.into_iter().sorted().dedup().collect();
        Ok(self)
    }

    /// The last generation that has to be computed.
    #[inline]
    pub fn last_milestone(&self) -> u64 {
        self.milestones.iter().copied().max().unwrap_or(0)
    }

    /// Snapshot directory for an example folder.
    pub fn output_dir_for(&self, example: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| example.to_path_buf())
    }
}
