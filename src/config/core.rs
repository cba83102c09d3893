use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use super::{ChunkSysConfig, WorldGenConfig};

/// Root configuration, one section per concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub worldgen: WorldGenConfig,
    pub chunksys: ChunkSysConfig,
}

impl EngineConfig {
    /// Loads a TOML config, falling back to defaults when the file is
    /// missing or malformed. A bad config should not stop the world from
    /// coming up.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("failed to parse {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                warn!("config {} not found, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)
    }
}
