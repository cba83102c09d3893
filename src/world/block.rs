use serde::{Deserialize, Serialize};

/// Number of block kinds, including air. Used to size per-block lookup
/// tables such as the texture atlas.
pub const BLOCK_KINDS: usize = 8;

/// The closed set of block kinds.
///
/// Discriminants are stable: generated meshes persist them indirectly as
/// texture layer indices, so new kinds must be appended with fresh values,
/// never renumbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Sand = 4,
    Bedrock = 5,
    SnowGrass = 6,
    Clay = 7,
}

impl BlockType {
    /// Everything except air is solid for collision and face culling.
    pub fn is_solid(self) -> bool {
        self != BlockType::Air
    }
}
