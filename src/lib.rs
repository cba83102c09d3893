pub mod config;
pub mod render;
pub mod world;

// Re-export commonly used types
pub use config::{ChunkSysConfig, EngineConfig, WorldGenConfig};
pub use render::atlas::TextureAtlas;
pub use render::mesh::{build_chunk_mesh, BlockFace, ChunkMesh};
pub use world::block::BlockType;
pub use world::chunk::{Chunk, ChunkError, CHUNK_SIZE};
pub use world::chunk_coord::ChunkCoord;
pub use world::core::{ChunkState, World, WorldError};
pub use world::generator::{BiomeType, BiomeWeights, GeneratorError, TerrainGenerator};
