//! Noise fields sampled over sphere directions.
//!
//! Using OpenSimplex noise for smooth, artifact-free surface displacement.

use noise::{NoiseFn, OpenSimplex};

/// Deterministic scalar field over 3D directions, roughly in [-1, 1].
pub trait NoiseField {
    fn sample_3d(&self, x: f32, y: f32, z: f32) -> f32;
}

/// Seeded 3D simplex noise
pub struct SimplexField {
    simplex: OpenSimplex,
}

impl SimplexField {
    /// Create new noise field with seed
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
        }
    }
}

impl NoiseField for SimplexField {
    fn sample_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        self.simplex.get([x as f64, y as f64, z as f64]) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_is_deterministic() {
        let a = SimplexField::new(42);
        let b = SimplexField::new(42);

        for i in 0..32 {
            let t = i as f32 * 0.13;
            let (x, y, z) = (t.cos(), t.sin(), 0.5 - t * 0.01);
            assert_eq!(a.sample_3d(x, y, z), b.sample_3d(x, y, z));
        }
    }

    #[test]
    fn test_samples_stay_bounded_on_unit_sphere() {
        let field = SimplexField::new(7);

        for i in 0..200 {
            let theta = i as f32 * 0.071;
            let phi = i as f32 * 0.173;
            let (x, y, z) = (
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let n = field.sample_3d(x, y, z);
            assert!(n.is_finite());
            assert!(n.abs() <= 1.5);
        }
    }
}
