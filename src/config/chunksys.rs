use serde::{Deserialize, Serialize};

/// Chunk streaming tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSysConfig {
    /// Horizontal chunk radius kept loaded around the observer.
    pub view_distance: i32,
    /// Vertical chunk radius kept loaded around the observer.
    pub view_distance_vertical: i32,
    /// Maximum chunk loads processed per tick. Loading is the expensive
    /// step (generation plus meshing), so it is amortized; unloads drain
    /// at a fixed one per tick.
    pub loads_per_tick: usize,
}

impl Default for ChunkSysConfig {
    fn default() -> Self {
        Self {
            view_distance: 5,
            view_distance_vertical: 2,
            loads_per_tick: 2,
        }
    }
}
