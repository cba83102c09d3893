use anyhow::Result;
use glam::Vec3;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::Path;

use voxide::{EngineConfig, TextureAtlas, World};

/// Headless streaming demo: walks an observer across the world and logs
/// what the streaming manager does. Rendering consumes `World::meshes`;
/// here we only count what it would draw.
fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = EngineConfig::load(Path::new("voxide.toml"));
    info!(
        "starting world: seed {}, view distance {}",
        config.worldgen.seed, config.chunksys.view_distance
    );

    let mut world = World::new(config, TextureAtlas::default());
    let mut pos = Vec3::new(0.0, 24.0, 0.0);

    for tick in 0..600u32 {
        pos.x += 0.9;
        world.update_observer(pos);
        world.tick();

        if tick % 100 == 0 {
            let quads: usize = world.meshes().map(|(_, m)| m.quad_count()).sum();
            info!(
                "tick {tick}: {} chunks loaded, {} queued ({} unloading), {quads} quads",
                world.loaded_count(),
                world.queued_load_count(),
                world.queued_unload_count(),
            );
        }
    }

    let (x, z) = (pos.x as i32, pos.z as i32);
    info!(
        "observer ended at x={x} z={z}: height {}, biome {:?}",
        world.terrain_height(x, z),
        world.biome_at(x, z)
    );
    Ok(())
}
