pub mod biome;
pub mod noise;
pub mod terrain;

pub use biome::{BiomeParams, BiomeType, BiomeWeights};
pub use terrain::{ColumnSample, GeneratorError, TerrainGenerator, WORLD_FLOOR};
