use crate::world::block::{BlockType, BLOCK_KINDS};

use super::mesh::BlockFace;

/// Maps (block, face) to a layer in the renderer's texture array.
///
/// Constructed explicitly by the rendering side and handed to the mesher;
/// there is no global texture registry. The default table keeps the legacy
/// layer ordering (dirt=0, grass_top=1, grass_side=2, stone=3) with the
/// newer blocks appended.
#[derive(Debug, Clone)]
pub struct TextureAtlas {
    layers: [[u32; 6]; BLOCK_KINDS],
}

impl TextureAtlas {
    /// An atlas with every layer zeroed; callers fill it with `set_*`.
    pub fn empty() -> Self {
        Self {
            layers: [[0; 6]; BLOCK_KINDS],
        }
    }

    /// One layer for all six faces of a block.
    pub fn set_uniform(&mut self, block: BlockType, layer: u32) {
        self.layers[block as usize] = [layer; 6];
    }

    pub fn set(&mut self, block: BlockType, face: BlockFace, layer: u32) {
        self.layers[block as usize][face.index()] = layer;
    }

    pub fn layer(&self, block: BlockType, face: BlockFace) -> u32 {
        self.layers[block as usize][face.index()]
    }
}

impl Default for TextureAtlas {
    fn default() -> Self {
        let mut atlas = Self::empty();
        atlas.set_uniform(BlockType::Dirt, 0);
        // Grass has a distinct cap and skirt; its underside reads as dirt.
        atlas.set_uniform(BlockType::Grass, 2);
        atlas.set(BlockType::Grass, BlockFace::Top, 1);
        atlas.set(BlockType::Grass, BlockFace::Bottom, 0);
        atlas.set_uniform(BlockType::Stone, 3);
        atlas.set_uniform(BlockType::Sand, 4);
        atlas.set_uniform(BlockType::Bedrock, 5);
        atlas.set_uniform(BlockType::SnowGrass, 7);
        atlas.set(BlockType::SnowGrass, BlockFace::Top, 6);
        atlas.set(BlockType::SnowGrass, BlockFace::Bottom, 0);
        atlas.set_uniform(BlockType::Clay, 8);
        atlas
    }
}
