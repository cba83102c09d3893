use glam::{IVec3, Vec3};
use std::fmt;

use super::chunk::CHUNK_SIZE;

/// Position of a chunk in chunk-grid units. A plain value key with
/// structural equality and hashing, so chunk maps need no string keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord(pub IVec3);

impl ChunkCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    /// Chunk containing the given world block position.
    pub fn of_world(pos: IVec3) -> Self {
        Self(IVec3::new(
            pos.x.div_euclid(CHUNK_SIZE),
            pos.y.div_euclid(CHUNK_SIZE),
            pos.z.div_euclid(CHUNK_SIZE),
        ))
    }

    /// Chunk containing a continuous world position (observer tracking).
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self::new(
            (pos.x / CHUNK_SIZE as f32).floor() as i32,
            (pos.y / CHUNK_SIZE as f32).floor() as i32,
            (pos.z / CHUNK_SIZE as f32).floor() as i32,
        )
    }

    /// Splits a world block position into its chunk and the local offset
    /// inside that chunk, each local component in [0, CHUNK_SIZE).
    pub fn split_world(pos: IVec3) -> (Self, IVec3) {
        let local = IVec3::new(
            pos.x.rem_euclid(CHUNK_SIZE),
            pos.y.rem_euclid(CHUNK_SIZE),
            pos.z.rem_euclid(CHUNK_SIZE),
        );
        (Self::of_world(pos), local)
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    pub fn z(&self) -> i32 {
        self.0.z
    }

    /// World position of this chunk's (0, 0, 0) voxel.
    pub fn world_origin(&self) -> IVec3 {
        self.0 * CHUNK_SIZE
    }

    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self(self.0 + IVec3::new(dx, dy, dz))
    }
}

impl From<IVec3> for ChunkCoord {
    fn from(vec: IVec3) -> Self {
        Self(vec)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_world_positive() {
        let (coord, local) = ChunkCoord::split_world(IVec3::new(17, 0, 31));
        assert_eq!(coord, ChunkCoord::new(1, 0, 1));
        assert_eq!(local, IVec3::new(1, 0, 15));
    }

    #[test]
    fn test_split_world_negative() {
        let (coord, local) = ChunkCoord::split_world(IVec3::new(-1, -16, -17));
        assert_eq!(coord, ChunkCoord::new(-1, -1, -2));
        assert_eq!(local, IVec3::new(15, 0, 15));
    }

    #[test]
    fn test_world_origin_round_trip() {
        let coord = ChunkCoord::new(-3, 2, 5);
        let (back, local) = ChunkCoord::split_world(coord.world_origin());
        assert_eq!(back, coord);
        assert_eq!(local, IVec3::ZERO);
    }

    #[test]
    fn test_from_world_pos_floors() {
        assert_eq!(
            ChunkCoord::from_world_pos(Vec3::new(-0.5, 15.9, 16.0)),
            ChunkCoord::new(-1, 0, 1)
        );
    }
}
