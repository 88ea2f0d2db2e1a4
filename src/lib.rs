//! Times vectorised sine and cosine against scalar library calls.
//!
//! A run fills two batches with random angles, computes cosine of one and
//! sine of the other four ways (4-lane SIMD, 8-lane SIMD, one lane of the
//! 4-lane instruction at a time, and scalar `f64` calls), times each pass,
//! and checks the 4-lane results against the scalar library.
//!
//! ```rust
//! use fasttrig::{bench, config::BenchConfig, simd::Backend};
//!
//! let config = BenchConfig::default().with_count(1_024).with_seed(7);
//! let mut console = Vec::new();
//! let report = bench::run(&config, &Backend::detect(), &mut console).unwrap();
//!
//! assert_eq!(report.timings.len(), 4);
//! assert!(report.timings.iter().all(|t| t.ms >= 0.0));
//! ```

pub mod angles;
pub mod batch;
pub mod bench;
pub mod config;
pub mod error;
pub mod eval;
pub mod simd;
pub mod timer;
pub mod verify;

pub use error::{FasttrigError, Result};

/// Number of angles per batch in a default run.
pub const DEFAULT_COUNT: usize = 1_600_000;

/// Largest `vector - reference` difference the verifier accepts by default.
pub const DEFAULT_TOLERANCE: f32 = 1e-6;
