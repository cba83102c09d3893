pub mod block;
pub mod chunk;
pub mod chunk_coord;
pub mod core;
pub mod generator;

// Re-export commonly used types
pub use block::BlockType;
pub use chunk::{Chunk, ChunkError, CHUNK_SIZE, CHUNK_VOLUME};
pub use chunk_coord::ChunkCoord;
pub use core::{ChunkState, World, WorldError};
pub use generator::{BiomeType, BiomeWeights, ColumnSample, TerrainGenerator};
