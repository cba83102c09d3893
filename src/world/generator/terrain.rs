use log::warn;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use thiserror::Error;

use crate::config::WorldGenConfig;
use crate::world::block::BlockType;

use super::biome::{BiomeType, BiomeWeights, BIOME_COUNT};
use super::noise::{smoothstep, NoiseField, NoiseField3};

/// Lowest world y; bedrock sits in the two layers above it.
pub const WORLD_FLOOR: i32 = 0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("non-finite {field} sample at ({x}, {z})")]
    NonFinite {
        field: &'static str,
        x: i32,
        z: i32,
    },
}

/// Everything the block selector needs about one (x, z) column, computed
/// once and reused across the column's y range during chunk fill.
#[derive(Debug, Clone)]
pub struct ColumnSample {
    pub height: i32,
    pub weights: BiomeWeights,
    pub dominant: BiomeType,
}

/// Seeded, stateless-per-call terrain sampler. Every public method is a
/// pure function of (seed, coordinates), so a chunk can be regenerated at
/// any time without persisting it.
pub struct TerrainGenerator {
    config: WorldGenConfig,
    hills: NoiseField,
    mountains: NoiseField,
    mountain_gate: NoiseField,
    valleys: NoiseField,
    temperature: NoiseField,
    humidity: NoiseField,
    region: NoiseField,
    cave_a: NoiseField3,
    cave_b: NoiseField3,
    scatter: NoiseField3,
}

impl TerrainGenerator {
    pub fn new(config: WorldGenConfig) -> Self {
        // One offset stream per seed; field construction order is part of
        // the determinism contract.
        let mut rng = ChaCha12Rng::seed_from_u64(config.seed as u64);
        let seed = config.seed;
        Self {
            hills: NoiseField::new(seed, &mut rng, config.hill_scale),
            mountains: NoiseField::new(seed, &mut rng, config.mountain_scale),
            mountain_gate: NoiseField::new(seed, &mut rng, config.mountain_scale * 0.5),
            valleys: NoiseField::new(seed, &mut rng, config.valley_scale),
            temperature: NoiseField::new(seed, &mut rng, config.temperature_scale),
            humidity: NoiseField::new(seed, &mut rng, config.humidity_scale),
            region: NoiseField::new(seed, &mut rng, config.region_scale),
            cave_a: NoiseField3::new(seed, &mut rng, config.cave_scale),
            cave_b: NoiseField3::new(seed, &mut rng, config.cave_scale),
            scatter: NoiseField3::new(seed, &mut rng, 0.2),
            config,
        }
    }

    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Normalized biome weights at a column. Falls back to all-plains when
    /// a noise sample degenerates, so one bad column never corrupts a chunk.
    pub fn biome_weights(&self, x: i32, z: i32) -> BiomeWeights {
        match self.try_biome_weights(x, z) {
            Ok(weights) => weights,
            Err(e) => {
                warn!("biome fallback: {e}");
                BiomeWeights::all_plains()
            }
        }
    }

    fn try_biome_weights(&self, x: i32, z: i32) -> Result<BiomeWeights, GeneratorError> {
        let cfg = &self.config;
        let (xf, zf) = (x as f64, z as f64);
        let temperature = self.temperature.sample01(xf, zf);
        let humidity = self.humidity.sample01(xf, zf);
        let region = self.region.sample01(xf, zf);
        if !temperature.is_finite() || !humidity.is_finite() || !region.is_finite() {
            return Err(GeneratorError::NonFinite {
                field: "biome",
                x,
                z,
            });
        }

        // Ocean is a hard mask on the coarse region field with a narrow
        // transition band; everything else shares the remainder.
        let ocean = 1.0
            - smoothstep(
                cfg.ocean_region_threshold,
                cfg.ocean_region_threshold + cfg.ocean_transition_band,
                region,
            );

        let mut scores = [0.0; BIOME_COUNT];
        scores[BiomeType::Plains.index()] = 0.25;
        scores[BiomeType::Forest.index()] = ((humidity - 0.5) * 2.0).clamp(0.0, 1.0)
            * (1.0 - (temperature - 0.5).abs() * 2.0).clamp(0.0, 1.0);
        scores[BiomeType::Desert.index()] = ((temperature - 0.55) * 2.5).clamp(0.0, 1.0)
            * ((0.45 - humidity) * 2.5).clamp(0.0, 1.0);
        scores[BiomeType::Mountains.index()] = ((region - 0.68) * 3.0).clamp(0.0, 1.0);
        scores[BiomeType::Tundra.index()] = ((0.35 - temperature) * 2.5).clamp(0.0, 1.0);

        let mut total: f64 = scores.iter().sum();
        if total < 1e-9 {
            // Degenerate column: apply the plains floor so the vector
            // still normalizes.
            scores[BiomeType::Plains.index()] = cfg.plains_floor_weight.max(1e-3);
            total = scores[BiomeType::Plains.index()];
        }

        // Non-ocean scores split the (1 - ocean) remainder.
        let land = 1.0 - ocean;
        let mut weights = [0.0; BIOME_COUNT];
        for biome in BiomeType::ALL {
            if biome == BiomeType::Ocean {
                continue;
            }
            weights[biome.index()] = scores[biome.index()] / total * land;
        }
        weights[BiomeType::Ocean.index()] = ocean;
        Ok(BiomeWeights::from_raw(weights))
    }

    /// Dominant biome tag at a column.
    pub fn biome_at(&self, x: i32, z: i32) -> BiomeType {
        self.biome_weights(x, z).dominant()
    }

    /// Surface height at a column, clamped to [min_height, max_height).
    pub fn height(&self, x: i32, z: i32) -> i32 {
        let weights = self.biome_weights(x, z);
        self.height_with_weights(x, z, &weights)
    }

    fn height_with_weights(&self, x: i32, z: i32, weights: &BiomeWeights) -> i32 {
        match self.try_height(x, z, weights) {
            Ok(h) => h.floor() as i32,
            Err(e) => {
                warn!("terrain fallback: {e}");
                self.config.min_height
            }
        }
    }

    fn try_height(&self, x: i32, z: i32, weights: &BiomeWeights) -> Result<f64, GeneratorError> {
        let cfg = &self.config;
        let (xf, zf) = (x as f64, z as f64);

        // Shared features, sampled once per column. Mountains are raised
        // to a power for peaked ridges and gated so flat land stays flat;
        // valleys subtract.
        let mountain_raw = self.mountains.sample01(xf, zf);
        let gate = self.mountain_gate.sample01(xf, zf);
        let gate_factor = smoothstep(cfg.mountain_gate, cfg.mountain_gate + 0.1, gate);
        let mountain_term = mountain_raw.powi(2) * gate_factor * cfg.mountain_height;
        let valley = self.valleys.sample01(xf + 500.0, zf + 500.0) * cfg.valley_depth;

        // Blend per-biome candidate heights by the normalized weights.
        let mut blended = 0.0;
        for (biome, weight) in weights.iter() {
            if weight <= 0.0 {
                continue;
            }
            let p = biome.params();
            let hills = self.hills.sample01_scaled(xf, zf, p.hill_scale_mul);
            let candidate = p.base_height + hills * p.hill_amplitude
                + mountain_term * p.mountain_factor
                - valley * p.valley_factor;
            blended += candidate * weight;
        }

        if !blended.is_finite() {
            return Err(GeneratorError::NonFinite {
                field: "height",
                x,
                z,
            });
        }
        Ok(blended.clamp(cfg.min_height as f64, cfg.max_height as f64 - 1.0))
    }

    /// Column summary for chunk fill: one biome/height evaluation reused
    /// across all y in the column.
    pub fn sample_column(&self, x: i32, z: i32) -> ColumnSample {
        let weights = self.biome_weights(x, z);
        let height = self.height_with_weights(x, z, &weights);
        ColumnSample {
            height,
            dominant: weights.dominant(),
            weights,
        }
    }

    /// Whether (x, y, z) is carved out as a cave.
    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_cave_with_surface(x, y, z, self.height(x, z))
    }

    /// Cave test when the column surface height is already known; chunk
    /// fill uses this to avoid resampling the column per voxel.
    pub fn is_cave_with_surface(&self, x: i32, y: i32, z: i32, surface: i32) -> bool {
        let cfg = &self.config;
        if y < WORLD_FLOOR + cfg.cave_floor_margin || y > cfg.sea_level - cfg.cave_sea_margin {
            return false;
        }
        // Never break through exposed terrain.
        if y > surface - cfg.cave_surface_margin {
            return false;
        }

        // Two decorrelated fields multiplied, not added: a position must
        // score high on both, which yields sparse rounded pockets instead
        // of sprawling ravines. The threshold tightens with depth.
        let depth = (cfg.sea_level - y).max(0) as f64;
        let threshold = cfg.cave_threshold + depth * cfg.cave_depth_tighten;
        let (xf, yf, zf) = (x as f64, y as f64, z as f64);
        let a = self.cave_a.sample01(xf, yf, zf);
        let b = self.cave_b.sample01(xf, yf, zf);
        a * b > threshold
    }

    /// Block identifier at a position given its column summary.
    pub fn block_at(&self, x: i32, y: i32, z: i32, column: &ColumnSample) -> BlockType {
        let cfg = &self.config;
        if y <= WORLD_FLOOR + 1 {
            return BlockType::Bedrock;
        }

        let surface = column.height;
        if y > surface {
            return BlockType::Air;
        }

        if y == surface {
            return self.surface_block(x, z, column);
        }

        // Shallow band: the biome's mid material, occasionally borrowing
        // the secondary biome's to soften hard biome edges.
        if y > surface - cfg.dirt_depth {
            let mid = column.dominant.params().mid_block;
            let secondary = column.weights.secondary();
            let w_secondary = column.weights.get(secondary);
            if w_secondary > cfg.edge_soften_weight
                && self.scatter.sample01(x as f64, y as f64, z as f64) < w_secondary
            {
                return secondary.params().mid_block;
            }
            return mid;
        }

        // Transition band: dirt thins into stone with depth instead of a
        // hard cutoff.
        if y > surface - cfg.stone_transition_depth {
            let band = (cfg.stone_transition_depth - cfg.dirt_depth) as f64;
            let toward_stone = (surface - cfg.dirt_depth - y) as f64 / band.max(1.0);
            if self.scatter.sample01(x as f64, y as f64, z as f64) < toward_stone {
                return BlockType::Stone;
            }
            return BlockType::Dirt;
        }

        BlockType::Stone
    }

    fn surface_block(&self, x: i32, z: i32, column: &ColumnSample) -> BlockType {
        let cfg = &self.config;
        let surface = column.height;

        // Hard overrides first: beaches near sea level, snow caps high up.
        if surface <= cfg.sea_level + cfg.beach_band {
            return BlockType::Sand;
        }
        if surface >= cfg.snow_line {
            return BlockType::SnowGrass;
        }

        let dominant = column.dominant;
        let w_dominant = column.weights.get(dominant);
        if w_dominant >= cfg.dominance_override {
            return dominant.params().top_block;
        }

        // Blended edge: a per-position draw may hand the surface to the
        // runner-up biome.
        let secondary = column.weights.secondary();
        let w_secondary = column.weights.get(secondary);
        if w_secondary > cfg.edge_soften_weight
            && self.scatter.sample01(x as f64, surface as f64, z as f64) < w_secondary
        {
            return secondary.params().top_block;
        }
        dominant.params().top_block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u32) -> TerrainGenerator {
        TerrainGenerator::new(WorldGenConfig {
            seed,
            ..WorldGenConfig::default()
        })
    }

    #[test]
    fn test_height_is_deterministic_across_instances() {
        let a = generator(42);
        let b = generator(42);
        for x in (-64..64).step_by(7) {
            for z in (-64..64).step_by(7) {
                assert_eq!(a.height(x, z), b.height(x, z));
                assert_eq!(a.biome_at(x, z), b.biome_at(x, z));
                assert_eq!(a.is_cave(x, 10, z), b.is_cave(x, 10, z));
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generator(1);
        let b = generator(2);
        let differs = (-64..64).any(|x| a.height(x, 0) != b.height(x, 0));
        assert!(differs);
    }

    #[test]
    fn test_height_stays_in_bounds() {
        let gen = generator(7);
        let cfg = gen.config();
        for x in (-400..400).step_by(13) {
            for z in (-400..400).step_by(17) {
                let h = gen.height(x, z);
                assert!(h >= cfg.min_height, "height {h} below floor at ({x}, {z})");
                assert!(h < cfg.max_height, "height {h} above cap at ({x}, {z})");
            }
        }
    }

    #[test]
    fn test_biome_weights_normalized() {
        let gen = generator(3);
        for x in (-300..300).step_by(19) {
            for z in (-300..300).step_by(23) {
                let weights = gen.biome_weights(x, z);
                for (biome, w) in weights.iter() {
                    assert!(w >= 0.0, "negative weight for {biome:?} at ({x}, {z})");
                }
                assert!(
                    (weights.sum() - 1.0).abs() < 1e-6,
                    "weights sum {} at ({x}, {z})",
                    weights.sum()
                );
            }
        }
    }

    #[test]
    fn test_caves_respect_vertical_band() {
        let gen = generator(11);
        let cfg = gen.config();
        for x in (-100..100).step_by(9) {
            for z in (-100..100).step_by(9) {
                // Below the floor margin and above the sea margin the test
                // must come back false no matter what the noise says.
                assert!(!gen.is_cave(x, WORLD_FLOOR + cfg.cave_floor_margin - 1, z));
                assert!(!gen.is_cave(x, cfg.sea_level - cfg.cave_sea_margin + 1, z));
            }
        }
    }

    #[test]
    fn test_caves_never_touch_the_surface_skin() {
        let gen = generator(13);
        let cfg = gen.config();
        for x in (-100..100).step_by(11) {
            for z in (-100..100).step_by(11) {
                let surface = gen.height(x, z);
                for y in (surface - cfg.cave_surface_margin + 1)..=surface {
                    assert!(
                        !gen.is_cave_with_surface(x, y, z, surface),
                        "cave within surface margin at ({x}, {y}, {z})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_block_column_layering() {
        let gen = generator(5);
        let column = gen.sample_column(10, 10);
        let surface = column.height;

        assert_eq!(gen.block_at(10, 0, 10, &column), BlockType::Bedrock);
        assert_eq!(gen.block_at(10, 1, 10, &column), BlockType::Bedrock);
        assert_eq!(gen.block_at(10, surface + 1, 10, &column), BlockType::Air);
        assert!(gen.block_at(10, surface, 10, &column).is_solid());

        // Deep interior is always stone.
        if surface > gen.config().stone_transition_depth + 2 {
            let deep = surface - gen.config().stone_transition_depth - 1;
            if deep > 1 {
                assert_eq!(gen.block_at(10, deep, 10, &column), BlockType::Stone);
            }
        }
    }

    #[test]
    fn test_surface_overrides() {
        let gen = generator(17);
        // A synthetic column at sea level must read as beach sand, and one
        // above the snow line as snow, regardless of biome weights.
        let beach = ColumnSample {
            height: gen.config().sea_level,
            weights: BiomeWeights::all_plains(),
            dominant: BiomeType::Plains,
        };
        assert_eq!(
            gen.block_at(0, beach.height, 0, &beach),
            BlockType::Sand
        );

        let peak = ColumnSample {
            height: gen.config().snow_line + 5,
            weights: BiomeWeights::all_plains(),
            dominant: BiomeType::Plains,
        };
        assert_eq!(
            gen.block_at(0, peak.height, 0, &peak),
            BlockType::SnowGrass
        );
    }
}
