use serde::{Deserialize, Serialize};

/// Terrain generation tunables. Every threshold that shapes the world is a
/// field here rather than a literal in the generator; the defaults document
/// the intended character of the default world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// World seed; the only input that distinguishes two worlds.
    pub seed: u32,

    // Vertical layout
    pub sea_level: i32,
    /// Surfaces at or above this height get snow regardless of biome.
    pub snow_line: i32,
    pub min_height: i32,
    pub max_height: i32,

    // Biome fields
    pub temperature_scale: f64,
    pub humidity_scale: f64,
    /// Coarse region field; drives the ocean mask and mountain regions.
    pub region_scale: f64,
    /// Region values below this are fully ocean.
    pub ocean_region_threshold: f64,
    /// Width of the ocean-to-land transition band on the region field.
    pub ocean_transition_band: f64,
    /// Minimum plains weight applied when every biome score is negligible.
    pub plains_floor_weight: f64,

    // Height fields
    pub hill_scale: f64,
    pub mountain_scale: f64,
    pub mountain_height: f64,
    /// Mountain gate threshold; below it the mountain term fades to zero
    /// so flat regions stay flat.
    pub mountain_gate: f64,
    pub valley_scale: f64,
    pub valley_depth: f64,

    // Caves
    pub cave_scale: f64,
    pub cave_threshold: f64,
    /// Threshold increase per block of depth below sea level.
    pub cave_depth_tighten: f64,
    /// Caves never form closer than this to the world floor.
    pub cave_floor_margin: i32,
    /// Caves never form closer than this below sea level.
    pub cave_sea_margin: i32,
    /// Caves never break within this many blocks of the surface.
    pub cave_surface_margin: i32,

    // Block selection
    /// Surfaces within one block of sea level become sand beaches.
    pub beach_band: i32,
    /// Dominant-biome weight above which blending is skipped for the
    /// surface block.
    pub dominance_override: f64,
    /// Secondary-biome weight above which sub-surface blocks may borrow
    /// the neighbor biome's material, softening hard biome edges.
    pub edge_soften_weight: f64,
    /// Depth of the biome mid-block band below the surface.
    pub dirt_depth: i32,
    /// Depth at which the dirt-to-stone transition band ends.
    pub stone_transition_depth: i32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            sea_level: 20,
            snow_line: 56,
            min_height: 1,
            max_height: 96,
            temperature_scale: 0.004,
            humidity_scale: 0.004,
            region_scale: 0.0015,
            ocean_region_threshold: 0.30,
            ocean_transition_band: 0.06,
            plains_floor_weight: 0.05,
            hill_scale: 0.02,
            mountain_scale: 0.008,
            mountain_height: 40.0,
            mountain_gate: 0.55,
            valley_scale: 0.012,
            valley_depth: 6.0,
            cave_scale: 0.05,
            cave_threshold: 0.38,
            cave_depth_tighten: 0.004,
            cave_floor_margin: 3,
            cave_sea_margin: 2,
            cave_surface_margin: 4,
            beach_band: 1,
            dominance_override: 0.7,
            edge_soften_weight: 0.25,
            dirt_depth: 3,
            stone_transition_depth: 6,
        }
    }
}
