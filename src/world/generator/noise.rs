use noise::{NoiseFn, Perlin};
use rand::Rng;
use rand_chacha::ChaCha12Rng;

/// A seeded 2D Perlin field. Every field instance carries its own offset
/// drawn from the world RNG so that independent fields (temperature,
/// humidity, caves, ...) decorrelate even though they share the one
/// underlying permutation.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perlin: Perlin,
    offset: [f64; 2],
    scale: f64,
}

impl NoiseField {
    pub fn new(seed: u32, rng: &mut ChaCha12Rng, scale: f64) -> Self {
        Self {
            perlin: Perlin::new(seed),
            offset: [rng.gen_range(0.0..10_000.0), rng.gen_range(0.0..10_000.0)],
            scale,
        }
    }

    /// Sample normalized to [0, 1].
    pub fn sample01(&self, x: f64, z: f64) -> f64 {
        let v = self.perlin.get([
            x * self.scale + self.offset[0],
            z * self.scale + self.offset[1],
        ]);
        (v + 1.0) * 0.5
    }

    /// Sample at a frequency multiple of the field's base scale. Lets one
    /// field serve biomes with different noise scales deterministically.
    pub fn sample01_scaled(&self, x: f64, z: f64, scale_mul: f64) -> f64 {
        let v = self.perlin.get([
            x * self.scale * scale_mul + self.offset[0],
            z * self.scale * scale_mul + self.offset[1],
        ]);
        (v + 1.0) * 0.5
    }
}

/// Pseudo-3D noise: the mean of three 2D samples taken on the orthogonal
/// coordinate planes. Approximates 3D Perlin without a 3D primitive, which
/// keeps every sample in the crate on the same 2D path.
#[derive(Debug, Clone)]
pub struct NoiseField3 {
    perlin: Perlin,
    offset: [f64; 3],
    scale: f64,
}

impl NoiseField3 {
    pub fn new(seed: u32, rng: &mut ChaCha12Rng, scale: f64) -> Self {
        Self {
            perlin: Perlin::new(seed),
            offset: [
                rng.gen_range(0.0..1_000.0),
                rng.gen_range(0.0..1_000.0),
                rng.gen_range(0.0..1_000.0),
            ],
            scale,
        }
    }

    /// Sample normalized to [0, 1].
    pub fn sample01(&self, x: f64, y: f64, z: f64) -> f64 {
        let x = x * self.scale + self.offset[0];
        let y = y * self.scale + self.offset[1];
        let z = z * self.scale + self.offset[2];
        let xy = self.perlin.get([x, y]);
        let xz = self.perlin.get([x, z]);
        let yz = self.perlin.get([y, z]);
        ((xy + xz + yz) / 3.0 + 1.0) * 0.5
    }
}

/// Hermite smoothstep, used for threshold-with-transition-band masks.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng(seed: u64) -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_samples_are_deterministic() {
        let a = NoiseField::new(9, &mut rng(9), 0.02);
        let b = NoiseField::new(9, &mut rng(9), 0.02);
        for (x, z) in [(0.0, 0.0), (12.5, -40.0), (-999.0, 3.0)] {
            assert_eq!(a.sample01(x, z), b.sample01(x, z));
        }
    }

    #[test]
    fn test_samples_stay_in_unit_range() {
        let field = NoiseField::new(1, &mut rng(1), 0.05);
        let field3 = NoiseField3::new(1, &mut rng(2), 0.05);
        for i in -50..50 {
            let v = field.sample01(i as f64 * 1.7, i as f64 * -0.9);
            assert!((0.0..=1.0).contains(&v));
            let w = field3.sample01(i as f64, i as f64 * 0.3, i as f64 * -1.1);
            assert!((0.0..=1.0).contains(&w));
        }
    }

    #[test]
    fn test_distinct_offsets_decorrelate_fields() {
        let mut r = rng(7);
        let a = NoiseField::new(7, &mut r, 0.02);
        let b = NoiseField::new(7, &mut r, 0.02);
        let differs = (0..100).any(|i| {
            let x = i as f64 * 3.3;
            (a.sample01(x, x) - b.sample01(x, x)).abs() > 1e-9
        });
        assert!(differs, "fields sharing one offset stream should differ");
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.2, 0.8, 0.0), 0.0);
        assert_eq!(smoothstep(0.2, 0.8, 1.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-12);
    }
}
