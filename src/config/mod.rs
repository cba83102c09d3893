pub mod chunksys;
pub mod core;
pub mod worldgen;

pub use chunksys::ChunkSysConfig;
pub use core::EngineConfig;
pub use worldgen::WorldGenConfig;
