use glam::IVec3;
use thiserror::Error;

use super::block::BlockType;
use super::chunk_coord::ChunkCoord;

pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    #[error("block position ({0}, {1}, {2}) outside [0, {CHUNK_SIZE})")]
    OutOfBounds(i32, i32, i32),
}

/// A dense 16^3 grid of block identifiers, owned by exactly one world
/// entry at a time. Mutation goes through the checked `set`; meshing is a
/// separate step and never happens as a side effect here.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Vec<BlockType>,
    solid_count: usize,
}

impl Chunk {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![BlockType::Air; CHUNK_VOLUME],
            solid_count: 0,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 || x >= CHUNK_SIZE || y >= CHUNK_SIZE || z >= CHUNK_SIZE {
            return None;
        }
        Some((x + y * CHUNK_SIZE + z * CHUNK_SIZE * CHUNK_SIZE) as usize)
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> Result<BlockType, ChunkError> {
        let index = Self::index(x, y, z).ok_or(ChunkError::OutOfBounds(x, y, z))?;
        Ok(self.blocks[index])
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> Result<(), ChunkError> {
        let index = Self::index(x, y, z).ok_or(ChunkError::OutOfBounds(x, y, z))?;
        let old = self.blocks[index];
        if old.is_solid() && !block.is_solid() {
            self.solid_count -= 1;
        } else if !old.is_solid() && block.is_solid() {
            self.solid_count += 1;
        }
        self.blocks[index] = block;
        Ok(())
    }

    /// Block at a local position, air when out of range. Convenience
    /// for loop-generated coordinates; the public contract stays `get`.
    pub fn local(&self, p: IVec3) -> BlockType {
        Self::index(p.x, p.y, p.z).map_or(BlockType::Air, |i| self.blocks[i])
    }

    pub fn is_solid_local(&self, p: IVec3) -> bool {
        self.local(p).is_solid()
    }

    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// True when the chunk holds nothing but air, so meshing can be skipped.
    pub fn is_empty(&self) -> bool {
        self.solid_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_all_air() {
        let chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        assert!(chunk.is_empty());
        for p in [(0, 0, 0), (15, 15, 15), (7, 3, 11)] {
            assert_eq!(chunk.get(p.0, p.1, p.2).unwrap(), BlockType::Air);
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut chunk = Chunk::new(ChunkCoord::new(1, 2, 3));
        chunk.set(4, 5, 6, BlockType::Stone).unwrap();
        assert_eq!(chunk.get(4, 5, 6).unwrap(), BlockType::Stone);
        assert_eq!(chunk.solid_count(), 1);

        chunk.set(4, 5, 6, BlockType::Air).unwrap();
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        assert_eq!(
            chunk.get(16, 0, 0),
            Err(ChunkError::OutOfBounds(16, 0, 0))
        );
        assert_eq!(
            chunk.set(0, -1, 0, BlockType::Dirt),
            Err(ChunkError::OutOfBounds(0, -1, 0))
        );
        // Failed set must not touch the grid.
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_local_is_total() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        chunk.set(0, 0, 0, BlockType::Grass).unwrap();
        assert_eq!(chunk.local(IVec3::new(0, 0, 0)), BlockType::Grass);
        assert_eq!(chunk.local(IVec3::new(-1, 0, 0)), BlockType::Air);
        assert_eq!(chunk.local(IVec3::new(16, 0, 0)), BlockType::Air);
    }
}
