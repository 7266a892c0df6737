// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! CLI configuration, read from TOML.
//!
//! ```toml
//! snapshot = "owid-covid-data.csv"
//!
//! [store]
//! chronological = true
//! build_threads = 4
//!
//! [store.layout]
//! location = 2
//! ```

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use outbreak::StoreConfig;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CliError;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Snapshot CSV used when `--snapshot` is not given.
    pub snapshot: Option<PathBuf>,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&text)?;
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line flags on top of the file settings.
    pub fn with_overrides(mut self, structural: bool, threads: Option<usize>) -> Result<Self> {
        if structural {
            self.store.chronological = false;
        }
        if let Some(threads) = threads {
            self.store.build_threads = threads;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.build_threads == 0 {
            return Err(CliError::Config("build_threads must be at least 1".to_string()));
        }
        Ok(())
    }
}
