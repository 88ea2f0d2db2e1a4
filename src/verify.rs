//! Cross-check of vector results against the scalar library.
//!
//! Discrepancies are advisory: they are handed to a callback (the driver
//! prints them) and counted, and the run carries on.

use std::fmt;

use num::Float;

use crate::batch::{AngleBatches, ResultBatches};
use crate::eval::{scalar_cos, scalar_sin};

/// Closeness test used by the verifier.
///
/// Returns `false` if either value is NaN, otherwise `(a - b) <= delta`.
///
/// The difference is **not** taken in absolute value: any `a` below `b`
/// passes, and only `a` exceeding `b` by more than `delta` fails.
#[inline]
pub fn is_close<T: Float>(a: T, b: T, delta: T) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }

    (a - b) <= delta
}

/// Which function a [`Discrepancy`] was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFn {
    Cos,
    Sin,
}

impl TrigFn {
    pub fn name(self) -> &'static str {
        match self {
            TrigFn::Cos => "cos",
            TrigFn::Sin => "sin",
        }
    }
}

/// One element whose vector result failed [`is_close`] against the scalar
/// reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discrepancy {
    pub function: TrigFn,
    pub index: usize,
    pub input: f32,
    pub simd: f32,
    pub reference: f32,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning: Discrepancy in {} calculation!\n\tInput:  {:.6}\n\tSIMD:   {:.6}\n\tScalar: {:.6}",
            self.function.name(),
            self.input,
            self.simd,
            self.reference
        )
    }
}

/// Compares every stored cosine/sine with a freshly computed scalar value.
///
/// `results` must hold the output of an overwriting vector pass. Each
/// failure is passed to `on_discrepancy`; the return value is how many
/// there were.
///
/// # Panics
///
/// Panics if `angles` and `results` differ in length.
pub fn verify<F>(
    angles: &AngleBatches,
    results: &ResultBatches,
    tolerance: f32,
    mut on_discrepancy: F,
) -> usize
where
    F: FnMut(&Discrepancy),
{
    assert_eq!(
        angles.len(),
        results.len(),
        "angle and result batches must have the same length"
    );

    let mut count = 0;

    let rows = angles
        .cos()
        .iter()
        .zip(angles.sin())
        .zip(results.cos().iter().zip(results.sin()))
        .enumerate();

    for (index, ((&a, &b), (&c, &s))) in rows {
        let cos_ref = scalar_cos(a);
        let sin_ref = scalar_sin(b);

        if !is_close(c, cos_ref, tolerance) {
            count += 1;
            on_discrepancy(&Discrepancy {
                function: TrigFn::Cos,
                index,
                input: a,
                simd: c,
                reference: cos_ref,
            });
        }

        if !is_close(s, sin_ref, tolerance) {
            count += 1;
            on_discrepancy(&Discrepancy {
                function: TrigFn::Sin,
                index,
                input: b,
                simd: s,
                reference: sin_ref,
            });
        }
    }

    count
}
