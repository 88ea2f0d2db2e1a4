//! Compiled-in run parameters.
//!
//! The tool takes no arguments and reads no environment; everything a run
//! needs is fixed here. Tests build smaller configurations with the setters.

use crate::error::{validation_error, Result};
use crate::{DEFAULT_COUNT, DEFAULT_TOLERANCE};

/// Parameters of one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchConfig {
    /// Number of angles in each batch.
    pub count: usize,
    /// Largest accepted `vector - reference` difference in the verifier.
    pub tolerance: f32,
    /// Fixed PRNG seed; `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration before any buffer is allocated.
    ///
    /// A count that is not a multiple of 8 is accepted: the packed passes
    /// leave the trailing remainder uncomputed, which is logged.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(validation_error("angle count must be positive"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(validation_error(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if self.count % 8 != 0 {
            log::warn!(
                "count {} is not a multiple of 8; packed passes skip the last {} (4-lane) and {} (8-lane) elements",
                self.count,
                self.count % 4,
                self.count % 8
            );
        }
        Ok(())
    }
}
