//! Random angle generation.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::batch::{AngleBatches, Batch};
use crate::error::Result;

/// Derives a PRNG seed from the wall clock.
///
/// Every run draws new angles; tests pin a seed through
/// [`BenchConfig::with_seed`](crate::config::BenchConfig::with_seed) instead.
pub fn seed_from_wall_clock() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or_else(|| now.timestamp() as u64)
}

/// Fills `out` with angles drawn uniformly from `[0, 2π)`.
pub fn fill_angles<R: Rng + ?Sized>(rng: &mut R, out: &mut [f32]) {
    for angle in out.iter_mut() {
        *angle = rng.random_range(0.0..TAU);
    }
}

/// Generates the cosine and sine angle batches from one seeded generator.
///
/// The cosine batch is drawn first, then the sine batch, so the two are
/// independent streams of the same sequence.
pub fn generate(count: usize, seed: u64) -> Result<AngleBatches> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut cos = Batch::zeroed(count)?;
    let mut sin = Batch::zeroed(count)?;

    fill_angles(&mut rng, &mut cos);
    fill_angles(&mut rng, &mut sin);

    AngleBatches::new(cos, sin)
}
