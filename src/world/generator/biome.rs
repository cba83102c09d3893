use serde::{Deserialize, Serialize};

use crate::world::block::BlockType;

pub const BIOME_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeType {
    Plains,
    Forest,
    Desert,
    Mountains,
    Tundra,
    Ocean,
}

impl BiomeType {
    pub const ALL: [BiomeType; BIOME_COUNT] = [
        BiomeType::Plains,
        BiomeType::Forest,
        BiomeType::Desert,
        BiomeType::Mountains,
        BiomeType::Tundra,
        BiomeType::Ocean,
    ];

    pub fn index(self) -> usize {
        match self {
            BiomeType::Plains => 0,
            BiomeType::Forest => 1,
            BiomeType::Desert => 2,
            BiomeType::Mountains => 3,
            BiomeType::Tundra => 4,
            BiomeType::Ocean => 5,
        }
    }

    /// Terrain shaping and block palette for this biome.
    pub const fn params(self) -> BiomeParams {
        match self {
            BiomeType::Plains => BiomeParams {
                base_height: 24.0,
                hill_amplitude: 6.0,
                hill_scale_mul: 1.0,
                mountain_factor: 0.2,
                valley_factor: 1.0,
                top_block: BlockType::Grass,
                mid_block: BlockType::Dirt,
            },
            BiomeType::Forest => BiomeParams {
                base_height: 26.0,
                hill_amplitude: 8.0,
                hill_scale_mul: 1.1,
                mountain_factor: 0.4,
                valley_factor: 1.0,
                top_block: BlockType::Grass,
                mid_block: BlockType::Dirt,
            },
            BiomeType::Desert => BiomeParams {
                base_height: 22.0,
                hill_amplitude: 5.0,
                // Dunes roll on a longer wavelength than grass hills.
                hill_scale_mul: 0.7,
                mountain_factor: 0.1,
                valley_factor: 0.5,
                top_block: BlockType::Sand,
                mid_block: BlockType::Sand,
            },
            BiomeType::Mountains => BiomeParams {
                base_height: 32.0,
                hill_amplitude: 10.0,
                hill_scale_mul: 1.3,
                mountain_factor: 1.0,
                valley_factor: 0.3,
                top_block: BlockType::Stone,
                mid_block: BlockType::Stone,
            },
            BiomeType::Tundra => BiomeParams {
                base_height: 27.0,
                hill_amplitude: 7.0,
                hill_scale_mul: 1.0,
                mountain_factor: 0.6,
                valley_factor: 0.8,
                top_block: BlockType::SnowGrass,
                mid_block: BlockType::Dirt,
            },
            BiomeType::Ocean => BiomeParams {
                base_height: 8.0,
                hill_amplitude: 3.0,
                hill_scale_mul: 0.8,
                mountain_factor: 0.0,
                valley_factor: 0.2,
                top_block: BlockType::Sand,
                mid_block: BlockType::Clay,
            },
        }
    }
}

/// Per-biome terrain parameters referenced during height blending and
/// block selection.
#[derive(Debug, Clone, Copy)]
pub struct BiomeParams {
    pub base_height: f64,
    pub hill_amplitude: f64,
    /// Multiplier on the shared hill-noise scale; each biome samples the
    /// rolling-hill field at its own wavelength.
    pub hill_scale_mul: f64,
    pub mountain_factor: f64,
    pub valley_factor: f64,
    pub top_block: BlockType,
    pub mid_block: BlockType,
}

/// Normalized per-biome suitability weights at one (x, z) column.
/// Entries are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeWeights([f64; BIOME_COUNT]);

impl BiomeWeights {
    pub(crate) fn from_raw(weights: [f64; BIOME_COUNT]) -> Self {
        Self(weights)
    }

    /// Degenerate fallback: the whole column reads as plains.
    pub fn all_plains() -> Self {
        let mut w = [0.0; BIOME_COUNT];
        w[BiomeType::Plains.index()] = 1.0;
        Self(w)
    }

    pub fn get(&self, biome: BiomeType) -> f64 {
        self.0[biome.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BiomeType, f64)> + '_ {
        BiomeType::ALL.iter().map(|&b| (b, self.0[b.index()]))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Biome with the highest weight; ties resolve to the first in
    /// declaration order so the result is deterministic.
    pub fn dominant(&self) -> BiomeType {
        let mut best = BiomeType::Plains;
        let mut best_w = f64::MIN;
        for (biome, w) in self.iter() {
            if w > best_w {
                best = biome;
                best_w = w;
            }
        }
        best
    }

    /// Second-highest weighted biome.
    pub fn secondary(&self) -> BiomeType {
        let dominant = self.dominant();
        let mut best = dominant;
        let mut best_w = f64::MIN;
        for (biome, w) in self.iter() {
            if biome != dominant && w > best_w {
                best = biome;
                best_w = w;
            }
        }
        best
    }
}
