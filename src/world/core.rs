use std::collections::{HashMap, HashSet, VecDeque};

use glam::{IVec3, Vec3};
use log::{debug, warn};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::render::atlas::TextureAtlas;
use crate::render::mesh::{build_chunk_mesh, ChunkMesh};

use super::block::BlockType;
use super::chunk::{Chunk, ChunkError, CHUNK_SIZE};
use super::chunk_coord::ChunkCoord;
use super::generator::terrain::WORLD_FLOOR;
use super::generator::{BiomeType, BiomeWeights, TerrainGenerator};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    #[error("chunk {0} is not loaded")]
    ChunkNotLoaded(ChunkCoord),
    #[error(transparent)]
    Chunk(#[from] ChunkError),
}

/// Lifecycle of one chunk coordinate. The state map in `World` is the
/// single source of truth; the queues only order the work, and entries
/// whose state moved on since enqueue are skipped when drained. A
/// coordinate therefore can never be live in both queues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkState {
    #[default]
    Unloaded,
    QueuedForLoad,
    Loaded,
    QueuedForUnload,
}

/// The streaming world: owns every live chunk, decides which coordinates
/// should exist around the observer, and amortizes creation/destruction
/// over ticks. Single-threaded by design; chunk mutation and remeshing
/// happen atomically within one tick's processing of one request.
pub struct World {
    config: EngineConfig,
    generator: TerrainGenerator,
    atlas: TextureAtlas,
    chunks: HashMap<ChunkCoord, Chunk>,
    meshes: HashMap<ChunkCoord, ChunkMesh>,
    states: HashMap<ChunkCoord, ChunkState>,
    load_queue: VecDeque<ChunkCoord>,
    unload_queue: VecDeque<ChunkCoord>,
    observer_chunk: ChunkCoord,
}

impl World {
    pub fn new(config: EngineConfig, atlas: TextureAtlas) -> Self {
        let generator = TerrainGenerator::new(config.worldgen.clone());
        let mut world = Self {
            config,
            generator,
            atlas,
            chunks: HashMap::new(),
            meshes: HashMap::new(),
            states: HashMap::new(),
            load_queue: VecDeque::new(),
            unload_queue: VecDeque::new(),
            observer_chunk: ChunkCoord::new(0, 0, 0),
        };
        world.refresh_desired();
        world
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn chunk_state(&self, coord: ChunkCoord) -> ChunkState {
        self.states.get(&coord).copied().unwrap_or_default()
    }

    /// Chunk containing a world block position.
    pub fn chunk_coord_of(&self, world_pos: IVec3) -> ChunkCoord {
        ChunkCoord::of_world(world_pos)
    }

    /// Tracks the observer. When it crosses into a new chunk the desired
    /// set is recomputed and the queues updated; this always runs before
    /// any queue draining in the same tick, since callers update the
    /// observer first and then call `tick`.
    pub fn update_observer(&mut self, pos: Vec3) {
        let coord = ChunkCoord::from_world_pos(pos);
        if coord != self.observer_chunk {
            debug!("observer moved to chunk {coord}");
            self.observer_chunk = coord;
            self.refresh_desired();
        }
    }

    fn refresh_desired(&mut self) {
        let h = self.config.chunksys.view_distance;
        let v = self.config.chunksys.view_distance_vertical;

        let mut desired = HashSet::new();
        for dx in -h..=h {
            for dy in -v..=v {
                for dz in -h..=h {
                    desired.insert(self.observer_chunk.offset(dx, dy, dz));
                }
            }
        }

        for &coord in &desired {
            match self.chunk_state(coord) {
                ChunkState::Unloaded => {
                    self.states.insert(coord, ChunkState::QueuedForLoad);
                    self.load_queue.push_back(coord);
                }
                ChunkState::QueuedForUnload => {
                    // Cancel: the chunk never left the map, so it simply
                    // becomes loaded again; its queue entry goes stale.
                    self.states.insert(coord, ChunkState::Loaded);
                    debug!("cancelled unload of {coord}");
                }
                ChunkState::QueuedForLoad | ChunkState::Loaded => {}
            }
        }

        let known: Vec<ChunkCoord> = self.states.keys().copied().collect();
        for coord in known {
            if desired.contains(&coord) {
                continue;
            }
            match self.chunk_state(coord) {
                ChunkState::Loaded => {
                    self.states.insert(coord, ChunkState::QueuedForUnload);
                    self.unload_queue.push_back(coord);
                }
                ChunkState::QueuedForLoad => {
                    // Cancel before it ever materializes; the load-queue
                    // entry goes stale.
                    self.states.remove(&coord);
                    debug!("cancelled load of {coord}");
                }
                ChunkState::Unloaded | ChunkState::QueuedForUnload => {}
            }
        }
    }

    /// One streaming step: up to `loads_per_tick` chunk loads and exactly
    /// one unload, in FIFO order of enqueue.
    pub fn tick(&mut self) {
        let budget = self.config.chunksys.loads_per_tick;
        let mut loaded = 0;
        while loaded < budget {
            let Some(coord) = self.load_queue.pop_front() else {
                break;
            };
            if self.chunk_state(coord) != ChunkState::QueuedForLoad {
                continue; // superseded since enqueue
            }
            self.load_chunk(coord);
            loaded += 1;
        }

        while let Some(coord) = self.unload_queue.pop_front() {
            if self.chunk_state(coord) != ChunkState::QueuedForUnload {
                continue;
            }
            self.chunks.remove(&coord);
            self.meshes.remove(&coord);
            self.states.remove(&coord);
            debug!("unloaded chunk {coord}");
            break;
        }
    }

    /// True while either queue still has live work.
    pub fn pending_work(&self) -> bool {
        self.states.values().any(|s| {
            matches!(s, ChunkState::QueuedForLoad | ChunkState::QueuedForUnload)
        })
    }

    fn load_chunk(&mut self, coord: ChunkCoord) {
        let chunk = match self.generate_chunk(coord) {
            Ok(chunk) => chunk,
            Err(e) => {
                // Degrade to minimal flat terrain instead of leaving a
                // hole in the world.
                warn!("generation failed for chunk {coord}: {e}; using fallback terrain");
                self.fallback_chunk(coord)
            }
        };
        self.chunks.insert(coord, chunk);
        self.states.insert(coord, ChunkState::Loaded);
        self.rebuild_mesh(coord);
        debug!("loaded chunk {coord}");
    }

    fn generate_chunk(&self, coord: ChunkCoord) -> Result<Chunk, WorldError> {
        let mut chunk = Chunk::new(coord);
        let origin = coord.world_origin();
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let (wx, wz) = (origin.x + x, origin.z + z);
                let column = self.generator.sample_column(wx, wz);
                for y in 0..CHUNK_SIZE {
                    let wy = origin.y + y;
                    let block = self.generator.block_at(wx, wy, wz, &column);
                    if !block.is_solid() {
                        continue;
                    }
                    if self
                        .generator
                        .is_cave_with_surface(wx, wy, wz, column.height)
                    {
                        continue;
                    }
                    chunk.set(x, y, z, block)?;
                }
            }
        }
        Ok(chunk)
    }

    /// Minimal fallback: bedrock floor topped by flat stone up to the
    /// configured minimum height.
    fn fallback_chunk(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);
        let origin = coord.world_origin();
        let min_height = self.generator.config().min_height;
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..CHUNK_SIZE {
                    let wy = origin.y + y;
                    let block = if wy <= WORLD_FLOOR + 1 {
                        BlockType::Bedrock
                    } else if wy <= min_height {
                        BlockType::Stone
                    } else {
                        continue;
                    };
                    // Loop bounds keep the coordinates in range.
                    let _ = chunk.set(x, y, z, block);
                }
            }
        }
        chunk
    }

    fn rebuild_mesh(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.chunks.get(&coord) else {
            return;
        };
        let mesh = build_chunk_mesh(chunk, &self.atlas, |p| self.solid_at(p));
        self.meshes.insert(coord, mesh);
    }

    /// Solidity at a world position; unloaded space reads non-solid, which
    /// leaves seam faces visible until the neighbor materializes and the
    /// boundary resync culls them.
    pub fn solid_at(&self, world_pos: IVec3) -> bool {
        let (coord, local) = ChunkCoord::split_world(world_pos);
        self.chunks
            .get(&coord)
            .map_or(false, |chunk| chunk.is_solid_local(local))
    }

    /// Block at a world position. Air when the owning chunk is not loaded;
    /// callers must treat that as "unknown", not "confirmed empty". Never
    /// waits for a pending load.
    pub fn get_block(&self, world_pos: IVec3) -> BlockType {
        let (coord, local) = ChunkCoord::split_world(world_pos);
        self.chunks
            .get(&coord)
            .map_or(BlockType::Air, |chunk| chunk.local(local))
    }

    /// Replaces the block at a world position and remeshes the chunk. An
    /// edit on a chunk-boundary face also remeshes the loaded neighbor(s)
    /// sharing that boundary, so seam faces stay correct on both sides.
    pub fn set_block(&mut self, world_pos: IVec3, block: BlockType) -> Result<(), WorldError> {
        let (coord, local) = ChunkCoord::split_world(world_pos);
        let chunk = self
            .chunks
            .get_mut(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))?;
        chunk.set(local.x, local.y, local.z, block)?;
        self.rebuild_mesh(coord);

        for (on_edge, neighbor) in [
            (local.x == 0, coord.offset(-1, 0, 0)),
            (local.x == CHUNK_SIZE - 1, coord.offset(1, 0, 0)),
            (local.y == 0, coord.offset(0, -1, 0)),
            (local.y == CHUNK_SIZE - 1, coord.offset(0, 1, 0)),
            (local.z == 0, coord.offset(0, 0, -1)),
            (local.z == CHUNK_SIZE - 1, coord.offset(0, 0, 1)),
        ] {
            if on_edge && self.chunk_state(neighbor) == ChunkState::Loaded {
                self.rebuild_mesh(neighbor);
            }
        }
        Ok(())
    }

    /// Published geometry for a loaded chunk.
    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.meshes.get(&coord)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (ChunkCoord, &ChunkMesh)> {
        self.meshes.iter().map(|(c, m)| (*c, m))
    }

    // Generator pass-throughs for the interaction/UI collaborators.

    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        self.generator.height(x, z)
    }

    pub fn biome_at(&self, x: i32, z: i32) -> BiomeType {
        self.generator.biome_at(x, z)
    }

    pub fn biome_weights(&self, x: i32, z: i32) -> BiomeWeights {
        self.generator.biome_weights(x, z)
    }

    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        self.generator.is_cave(x, y, z)
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn queued_load_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == ChunkState::QueuedForLoad)
            .count()
    }

    pub fn queued_unload_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == ChunkState::QueuedForUnload)
            .count()
    }
}
