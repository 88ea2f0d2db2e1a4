//! Vector results against the scalar library over a full-size random batch.
//!
//! The tolerance check is the verifier's one-sided `simd - scalar <= 1e-6`.

use fasttrig::angles;
use fasttrig::batch::ResultBatches;
use fasttrig::eval::{self, scalar_cos, scalar_sin};
use fasttrig::simd::Backend;
use fasttrig::verify::{is_close, verify};
use fasttrig::{DEFAULT_COUNT, DEFAULT_TOLERANCE};

#[test]
fn test_simd4_within_tolerance_for_full_batch() {
    let backend = Backend::detect();
    let angles = angles::generate(DEFAULT_COUNT, 12345).unwrap();
    let mut out = ResultBatches::zeroed(DEFAULT_COUNT).unwrap();

    eval::simd4(&backend, &angles, &mut out);

    let mut max_abs_error = 0.0f32;
    for i in 0..DEFAULT_COUNT {
        let c_ref = scalar_cos(angles.cos()[i]);
        let s_ref = scalar_sin(angles.sin()[i]);

        assert!(
            is_close(out.cos()[i], c_ref, DEFAULT_TOLERANCE),
            "cos({}) = {} vs {}",
            angles.cos()[i],
            out.cos()[i],
            c_ref
        );
        assert!(
            is_close(out.sin()[i], s_ref, DEFAULT_TOLERANCE),
            "sin({}) = {} vs {}",
            angles.sin()[i],
            out.sin()[i],
            s_ref
        );

        max_abs_error = max_abs_error
            .max((out.cos()[i] - c_ref).abs())
            .max((out.sin()[i] - s_ref).abs());
    }

    println!("{} backend, max absolute error {max_abs_error:.2e}", backend.name());
    assert!(max_abs_error <= DEFAULT_TOLERANCE);
}

#[test]
fn test_simd8_within_tolerance_for_full_batch() {
    let backend = Backend::detect();
    let angles = angles::generate(DEFAULT_COUNT, 54321).unwrap();
    let mut out = ResultBatches::zeroed(DEFAULT_COUNT).unwrap();

    eval::simd8(&backend, &angles, &mut out);

    let discrepancies = verify(&angles, &out, DEFAULT_TOLERANCE, |d| println!("{d}"));
    assert_eq!(discrepancies, 0);
}

#[test]
fn test_verifier_flags_perturbed_results() {
    let backend = Backend::detect();
    let angles = angles::generate(64, 8).unwrap();
    let mut out = ResultBatches::zeroed(64).unwrap();
    eval::simd4(&backend, &angles, &mut out);

    {
        let (cos, sin) = out.split_mut();
        cos[10] += 1e-3; // above the reference: flagged
        sin[20] -= 1e-3; // below the reference: accepted by the one-sided check
    }

    let mut flagged = Vec::new();
    let count = verify(&angles, &out, DEFAULT_TOLERANCE, |d| flagged.push(d.index));

    assert_eq!(count, 1);
    assert_eq!(flagged, vec![10]);
}
