pub mod atlas;
pub mod mesh;

pub use atlas::TextureAtlas;
pub use mesh::{build_chunk_mesh, BlockFace, ChunkMesh};
