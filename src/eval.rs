//! The four timed evaluation strategies.
//!
//! | Strategy | Writes | Lanes per instruction |
//! |----------|--------|-----------------------|
//! | [`Strategy::Simd4`] | overwrite | 4 |
//! | [`Strategy::Simd8`] | overwrite | 8 |
//! | [`Strategy::Simd1`] | accumulate | 1 of 4 |
//! | [`Strategy::Scalar`] | accumulate | scalar |
//!
//! The accumulating strategies add onto what the overwriting ones stored.
//! They must run after `Simd4`/`Simd8`, and their output depends on that
//! order.

use std::fmt;

use crate::batch::{AngleBatches, ResultBatches};
use crate::simd::Backend;

/// How a pass combines its values with the result batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    /// `out[i] = f(angle[i])`
    Overwrite,
    /// `out[i] += f(angle[i])`
    Accumulate,
}

/// One way of computing a batch of cosines and sines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// 4-lane vector instructions, overwriting.
    Simd4,
    /// 8-lane vector instructions, overwriting.
    Simd8,
    /// The 4-lane instruction fed one element at a time, accumulating.
    Simd1,
    /// Scalar `f64` library calls narrowed to `f32`, accumulating.
    Scalar,
}

impl Strategy {
    /// Strategies in the order the driver times them.
    pub const TIMED_ORDER: [Strategy; 4] = [
        Strategy::Simd4,
        Strategy::Simd8,
        Strategy::Simd1,
        Strategy::Scalar,
    ];

    /// Console label of the strategy.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Simd4 => "SIMD (4 channel)",
            Strategy::Simd8 => "SIMD (8 channel)",
            Strategy::Simd1 => "SIMD (1 channel)",
            Strategy::Scalar => "Scalar",
        }
    }

    /// Values computed per instruction, `None` for the scalar strategy.
    pub fn lane_count(self) -> Option<usize> {
        match self {
            Strategy::Simd4 => Some(4),
            Strategy::Simd8 => Some(8),
            Strategy::Simd1 => Some(1),
            Strategy::Scalar => None,
        }
    }

    pub fn store(self) -> Store {
        match self {
            Strategy::Simd4 | Strategy::Simd8 => Store::Overwrite,
            Strategy::Simd1 | Strategy::Scalar => Store::Accumulate,
        }
    }

    /// Whether this strategy goes through the vector backend.
    pub fn uses_backend(self) -> bool {
        self != Strategy::Scalar
    }

    /// Runs the strategy over the full batches.
    ///
    /// # Panics
    ///
    /// Panics if `angles` and `out` differ in length.
    pub fn run(self, backend: &Backend, angles: &AngleBatches, out: &mut ResultBatches) {
        match self {
            Strategy::Simd4 => simd4(backend, angles, out),
            Strategy::Simd8 => simd8(backend, angles, out),
            Strategy::Simd1 => simd1_accumulate(backend, angles, out),
            Strategy::Scalar => scalar(angles, out, Store::Accumulate),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn check_batches(angles: &AngleBatches, out: &ResultBatches) {
    assert_eq!(
        angles.len(),
        out.len(),
        "angle and result batches must have the same length"
    );
}

/// 4-lane pass. The last `len % 4` results are left untouched.
pub fn simd4(backend: &Backend, angles: &AngleBatches, out: &mut ResultBatches) {
    check_batches(angles, out);
    let (cos_out, sin_out) = out.split_mut();
    backend.cos_sin_x4(angles.cos(), angles.sin(), cos_out, sin_out);
}

/// 8-lane pass. The last `len % 8` results are left untouched.
pub fn simd8(backend: &Backend, angles: &AngleBatches, out: &mut ResultBatches) {
    check_batches(angles, out);
    let (cos_out, sin_out) = out.split_mut();
    backend.cos_sin_x8(angles.cos(), angles.sin(), cos_out, sin_out);
}

/// Single-lane vector pass, adding onto the existing results.
pub fn simd1_accumulate(backend: &Backend, angles: &AngleBatches, out: &mut ResultBatches) {
    check_batches(angles, out);
    let (cos_out, sin_out) = out.split_mut();
    backend.cos_sin_x1_accumulate(angles.cos(), angles.sin(), cos_out, sin_out);
}

/// Scalar reference cosine: `f64` library call narrowed to `f32`.
#[inline(always)]
pub fn scalar_cos(angle: f32) -> f32 {
    (angle as f64).cos() as f32
}

/// Scalar reference sine: `f64` library call narrowed to `f32`.
#[inline(always)]
pub fn scalar_sin(angle: f32) -> f32 {
    (angle as f64).sin() as f32
}

/// Scalar pass, one element at a time.
pub fn scalar(angles: &AngleBatches, out: &mut ResultBatches, store: Store) {
    check_batches(angles, out);
    let (cos_out, sin_out) = out.split_mut();

    let cos_pairs = angles.cos().iter().zip(cos_out.iter_mut());
    let sin_pairs = angles.sin().iter().zip(sin_out.iter_mut());

    match store {
        Store::Overwrite => {
            for ((&a, c), (&b, s)) in cos_pairs.zip(sin_pairs) {
                *c = scalar_cos(a);
                *s = scalar_sin(b);
            }
        }
        Store::Accumulate => {
            for ((&a, c), (&b, s)) in cos_pairs.zip(sin_pairs) {
                *c += scalar_cos(a);
                *s += scalar_sin(b);
            }
        }
    }
}
