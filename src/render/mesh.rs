use glam::{IVec3, Vec2, Vec3};

use crate::world::chunk::{Chunk, CHUNK_SIZE};

use super::atlas::TextureAtlas;

/// The six cube faces. The order here, the normals, and the corner table
/// below must agree with each other: the solidity probe for a face uses
/// `normal()`, and the emitted quad uses `corners()`. Winding is
/// counter-clockwise seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFace {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl BlockFace {
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Front,
        BlockFace::Back,
        BlockFace::Left,
        BlockFace::Right,
        BlockFace::Top,
        BlockFace::Bottom,
    ];

    pub fn index(self) -> usize {
        match self {
            BlockFace::Front => 0,
            BlockFace::Back => 1,
            BlockFace::Left => 2,
            BlockFace::Right => 3,
            BlockFace::Top => 4,
            BlockFace::Bottom => 5,
        }
    }

    /// Outward unit offset to the neighbor this face looks at.
    pub fn normal(self) -> IVec3 {
        match self {
            BlockFace::Front => IVec3::Z,
            BlockFace::Back => IVec3::NEG_Z,
            BlockFace::Left => IVec3::NEG_X,
            BlockFace::Right => IVec3::X,
            BlockFace::Top => IVec3::Y,
            BlockFace::Bottom => IVec3::NEG_Y,
        }
    }

    /// Quad corners relative to the block origin, wound to match the
    /// (0, 1, 2)(2, 3, 0) triangulation.
    fn corners(self) -> [Vec3; 4] {
        match self {
            BlockFace::Front => [
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
            ],
            BlockFace::Back => [
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            BlockFace::Left => [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            BlockFace::Right => [
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 1.0),
            ],
            BlockFace::Top => [
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            BlockFace::Bottom => [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
        }
    }
}

const BASE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Geometry buffers for one chunk. Positions are chunk-local; the texture
/// layer rides as a flat per-vertex index selecting into a texture array.
#[derive(Debug, Clone, Default)]
pub struct ChunkMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub layers: Vec<u32>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one quad: four vertices and two triangles.
    pub fn add_face(&mut self, origin: Vec3, face: BlockFace, layer: u32) {
        let base = self.positions.len() as u32;
        let normal = face.normal().as_vec3();
        for (corner, uv) in face.corners().iter().zip(BASE_UVS) {
            self.positions.push(origin + *corner);
            self.normals.push(normal);
            self.uvs.push(uv);
            self.layers.push(layer);
        }
        self.indices
            .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }
}

/// Extracts the visible surface of a chunk: one quad per solid-voxel face
/// whose neighbor is non-solid. In-grid neighbors are answered locally;
/// out-of-grid neighbors go through `solid_at`, which the streaming
/// manager backs with the adjacent chunks (absent chunks read non-solid).
/// No greedy merging; the face count is exactly the exposed-face count.
pub fn build_chunk_mesh(
    chunk: &Chunk,
    atlas: &TextureAtlas,
    solid_at: impl Fn(IVec3) -> bool,
) -> ChunkMesh {
    let mut mesh = ChunkMesh::new();
    if chunk.is_empty() {
        return mesh;
    }

    let world_origin = chunk.coord().world_origin();
    for x in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let local = IVec3::new(x, y, z);
                let block = chunk.local(local);
                if !block.is_solid() {
                    continue;
                }
                for face in BlockFace::ALL {
                    let neighbor = local + face.normal();
                    let in_grid = neighbor.min_element() >= 0
                        && neighbor.max_element() < CHUNK_SIZE;
                    let blocked = if in_grid {
                        chunk.is_solid_local(neighbor)
                    } else {
                        solid_at(world_origin + neighbor)
                    };
                    if !blocked {
                        mesh.add_face(local.as_vec3(), face, atlas.layer(block, face));
                    }
                }
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::block::BlockType;
    use crate::world::chunk_coord::ChunkCoord;

    fn solid_cube() -> Chunk {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    chunk.set(x, y, z, BlockType::Stone).unwrap();
                }
            }
        }
        chunk
    }

    #[test]
    fn test_empty_chunk_has_empty_mesh() {
        let chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        let mesh = build_chunk_mesh(&chunk, &TextureAtlas::default(), |_| false);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_solid_cube_keeps_only_shell_faces() {
        let mesh = build_chunk_mesh(&solid_cube(), &TextureAtlas::default(), |_| false);
        // 6 sides, 16x16 quads each; every interior face culled.
        let n = CHUNK_SIZE as usize;
        assert_eq!(mesh.quad_count(), 6 * n * n);
        assert_eq!(mesh.positions.len(), mesh.quad_count() * 4);
        assert_eq!(mesh.indices.len(), mesh.quad_count() * 6);
    }

    #[test]
    fn test_solid_neighbors_cull_everything() {
        // If the whole world outside the grid is solid too, the cube has
        // no exposed face at all.
        let mesh = build_chunk_mesh(&solid_cube(), &TextureAtlas::default(), |_| true);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_single_block_emits_six_faces() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        chunk.set(8, 8, 8, BlockType::Grass).unwrap();
        let atlas = TextureAtlas::default();
        let mesh = build_chunk_mesh(&chunk, &atlas, |_| false);
        assert_eq!(mesh.quad_count(), 6);
        // The grass cap layer must appear on exactly one quad (4 vertices).
        let cap = atlas.layer(BlockType::Grass, BlockFace::Top);
        let cap_vertices = mesh.layers.iter().filter(|&&l| l == cap).count();
        assert_eq!(cap_vertices, 4);
    }

    #[test]
    fn test_mesher_is_idempotent() {
        let chunk = solid_cube();
        let atlas = TextureAtlas::default();
        let a = build_chunk_mesh(&chunk, &atlas, |_| false);
        let b = build_chunk_mesh(&chunk, &atlas, |_| false);
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.layers, b.layers);
    }

    #[test]
    fn test_boundary_face_consults_neighbor_lookup() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        chunk.set(15, 8, 8, BlockType::Stone).unwrap();
        let atlas = TextureAtlas::default();

        // Neighbor chunk solid at (16, 8, 8): the +X face is culled.
        let mesh = build_chunk_mesh(&chunk, &atlas, |p| p == IVec3::new(16, 8, 8));
        assert_eq!(mesh.quad_count(), 5);

        let mesh = build_chunk_mesh(&chunk, &atlas, |_| false);
        assert_eq!(mesh.quad_count(), 6);
    }

    #[test]
    fn test_winding_matches_normals() {
        // For every face of a lone block, the triangle winding must face
        // outward: cross(v1 - v0, v2 - v0) points along the face normal.
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        chunk.set(4, 4, 4, BlockType::Stone).unwrap();
        let mesh = build_chunk_mesh(&chunk, &TextureAtlas::default(), |_| false);
        for quad in 0..mesh.quad_count() {
            let i = quad * 6;
            let v0 = mesh.positions[mesh.indices[i] as usize];
            let v1 = mesh.positions[mesh.indices[i + 1] as usize];
            let v2 = mesh.positions[mesh.indices[i + 2] as usize];
            let cross = (v1 - v0).cross(v2 - v0);
            let normal = mesh.normals[mesh.indices[i] as usize];
            assert!(
                cross.dot(normal) > 0.0,
                "inverted winding on quad {quad}: cross {cross:?} vs normal {normal:?}"
            );
        }
    }
}
