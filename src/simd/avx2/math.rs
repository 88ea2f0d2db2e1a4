//! x86 sine and cosine kernels for 4-lane (SSE2) and 8-lane (AVX2 + FMA)
//! registers.
//!
//! # Method
//!
//! Both widths use the same Cody-Waite scheme:
//!
//! 1. Work on `|x|`; sine keeps the input sign aside, cosine is even.
//! 2. `j = trunc(|x| * 4/π)`, rounded up to the next even integer, selects the
//!    octant. `r = |x| - j * π/4` is computed with π/4 split in three parts
//!    (`DP1 + DP2 + DP3`) so the subtraction stays exact for the angles this
//!    tool feeds in.
//! 3. Bit 1 of `j` picks the sine or cosine polynomial on `[-π/4, π/4]`,
//!    bit 2 flips the sign.
//! 4. NaN and ±∞ lanes produce NaN.
//!
//! | Function | Width | Features | Max abs error on `[0, 2π)` |
//! |----------|-------|----------|-----------------------------|
//! | `_mm_cos_ps` / `_mm_sin_ps` | 4 | `sse2` | ~1e-7 |
//! | `_mm256_cos_ps` / `_mm256_sin_ps` | 8 | `avx,avx2,fma` | ~1e-7 |
//!
//! Accuracy degrades for `|x|` beyond a few thousand radians, where the
//! three-part reduction is no longer exact.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// 4/π, converts an angle to octants.
const FOUR_OVER_PI: f32 = 1.273_239_5;

// π/4 = DP1 + DP2 + DP3. DP1 and DP2 have short mantissas so `j * DP1` and
// `j * DP2` are exact for small j.
const DP1: f32 = 0.785_156_25;
const DP2: f32 = 2.418_756_484_985_351_562_5e-4;
const DP3: f32 = 3.774_895e-8;

// sin(r) ≈ r + r³ (S0 r⁴ + S1 r² + S2) on [-π/4, π/4]
const S0: f32 = -1.951_529_6e-4;
const S1: f32 = 8.332_161e-3;
const S2: f32 = -1.666_665_5e-1;

// cos(r) ≈ 1 - r²/2 + r⁴ (C0 r⁴ + C1 r² + C2) on [-π/4, π/4]
const C0: f32 = 2.443_315_7e-5;
const C1: f32 = -1.388_731_6e-3;
const C2: f32 = 4.166_664_6e-2;

// ============================================================================
// 4 lanes (SSE2)
// ============================================================================

/// Octant reduction of non-negative `x`: returns `(r, j)` with `j` even.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn reduce_ps(x: __m128) -> (__m128, __m128i) {
    let j = _mm_cvttps_epi32(_mm_mul_ps(x, _mm_set1_ps(FOUR_OVER_PI)));
    let j = _mm_and_si128(_mm_add_epi32(j, _mm_set1_epi32(1)), _mm_set1_epi32(!1));
    let y = _mm_cvtepi32_ps(j);

    let mut r = _mm_sub_ps(x, _mm_mul_ps(y, _mm_set1_ps(DP1)));
    r = _mm_sub_ps(r, _mm_mul_ps(y, _mm_set1_ps(DP2)));
    r = _mm_sub_ps(r, _mm_mul_ps(y, _mm_set1_ps(DP3)));

    (r, j)
}

/// Evaluates both polynomials on the reduced argument and keeps, per lane,
/// the sine one where `use_sin` is set.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn eval_poly_ps(r: __m128, use_sin: __m128) -> __m128 {
    let z = _mm_mul_ps(r, r);

    let mut cos_p = _mm_add_ps(_mm_mul_ps(_mm_set1_ps(C0), z), _mm_set1_ps(C1));
    cos_p = _mm_add_ps(_mm_mul_ps(cos_p, z), _mm_set1_ps(C2));
    cos_p = _mm_mul_ps(cos_p, _mm_mul_ps(z, z));
    cos_p = _mm_sub_ps(cos_p, _mm_mul_ps(z, _mm_set1_ps(0.5)));
    cos_p = _mm_add_ps(cos_p, _mm_set1_ps(1.0));

    let mut sin_p = _mm_add_ps(_mm_mul_ps(_mm_set1_ps(S0), z), _mm_set1_ps(S1));
    sin_p = _mm_add_ps(_mm_mul_ps(sin_p, z), _mm_set1_ps(S2));
    sin_p = _mm_add_ps(_mm_mul_ps(sin_p, _mm_mul_ps(z, r)), r);

    _mm_or_ps(_mm_and_ps(use_sin, sin_p), _mm_andnot_ps(use_sin, cos_p))
}

/// Replaces lanes whose input was NaN or ±∞ with NaN.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn mask_invalid_ps(result: __m128, abs_x: __m128) -> __m128 {
    // "not less than +∞" holds for +∞ and for unordered (NaN) lanes.
    let invalid = _mm_cmpnlt_ps(abs_x, _mm_set1_ps(f32::INFINITY));
    _mm_or_ps(
        _mm_andnot_ps(invalid, result),
        _mm_and_ps(invalid, _mm_set1_ps(f32::NAN)),
    )
}

/// Cosine of 4 packed `f32` values.
///
/// # Safety
///
/// Requires SSE2.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn _mm_cos_ps(x: __m128) -> __m128 {
    let abs_x = _mm_andnot_ps(_mm_set1_ps(-0.0), x);

    let (r, j) = reduce_ps(abs_x);

    // cos(x) = sin(x + π/2): shift the octant by two.
    let j = _mm_sub_epi32(j, _mm_set1_epi32(2));
    let sign = _mm_castsi128_ps(_mm_slli_epi32(_mm_andnot_si128(j, _mm_set1_epi32(4)), 29));
    let use_sin = _mm_castsi128_ps(_mm_cmpeq_epi32(
        _mm_and_si128(j, _mm_set1_epi32(2)),
        _mm_setzero_si128(),
    ));

    let y = _mm_xor_ps(eval_poly_ps(r, use_sin), sign);
    mask_invalid_ps(y, abs_x)
}

/// Sine of 4 packed `f32` values.
///
/// # Safety
///
/// Requires SSE2.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn _mm_sin_ps(x: __m128) -> __m128 {
    let sign_mask = _mm_set1_ps(-0.0);
    let input_sign = _mm_and_ps(x, sign_mask);
    let abs_x = _mm_andnot_ps(sign_mask, x);

    let (r, j) = reduce_ps(abs_x);

    let swap_sign = _mm_castsi128_ps(_mm_slli_epi32(_mm_and_si128(j, _mm_set1_epi32(4)), 29));
    let use_sin = _mm_castsi128_ps(_mm_cmpeq_epi32(
        _mm_and_si128(j, _mm_set1_epi32(2)),
        _mm_setzero_si128(),
    ));

    let y = _mm_xor_ps(eval_poly_ps(r, use_sin), _mm_xor_ps(input_sign, swap_sign));
    mask_invalid_ps(y, abs_x)
}

// ============================================================================
// 8 lanes (AVX2 + FMA)
// ============================================================================

#[inline]
#[target_feature(enable = "avx,avx2,fma")]
unsafe fn reduce256_ps(x: __m256) -> (__m256, __m256i) {
    let j = _mm256_cvttps_epi32(_mm256_mul_ps(x, _mm256_set1_ps(FOUR_OVER_PI)));
    let j = _mm256_and_si256(
        _mm256_add_epi32(j, _mm256_set1_epi32(1)),
        _mm256_set1_epi32(!1),
    );
    let y = _mm256_cvtepi32_ps(j);

    let mut r = _mm256_fnmadd_ps(y, _mm256_set1_ps(DP1), x);
    r = _mm256_fnmadd_ps(y, _mm256_set1_ps(DP2), r);
    r = _mm256_fnmadd_ps(y, _mm256_set1_ps(DP3), r);

    (r, j)
}

#[inline]
#[target_feature(enable = "avx,avx2,fma")]
unsafe fn eval_poly256_ps(r: __m256, use_sin: __m256) -> __m256 {
    let z = _mm256_mul_ps(r, r);

    let mut cos_p = _mm256_fmadd_ps(_mm256_set1_ps(C0), z, _mm256_set1_ps(C1));
    cos_p = _mm256_fmadd_ps(cos_p, z, _mm256_set1_ps(C2));
    cos_p = _mm256_mul_ps(cos_p, _mm256_mul_ps(z, z));
    cos_p = _mm256_fnmadd_ps(z, _mm256_set1_ps(0.5), cos_p);
    cos_p = _mm256_add_ps(cos_p, _mm256_set1_ps(1.0));

    let mut sin_p = _mm256_fmadd_ps(_mm256_set1_ps(S0), z, _mm256_set1_ps(S1));
    sin_p = _mm256_fmadd_ps(sin_p, z, _mm256_set1_ps(S2));
    sin_p = _mm256_fmadd_ps(sin_p, _mm256_mul_ps(z, r), r);

    _mm256_blendv_ps(cos_p, sin_p, use_sin)
}

#[inline]
#[target_feature(enable = "avx,avx2,fma")]
unsafe fn mask_invalid256_ps(result: __m256, abs_x: __m256) -> __m256 {
    let invalid = _mm256_cmp_ps(abs_x, _mm256_set1_ps(f32::INFINITY), _CMP_NLT_UQ);
    _mm256_blendv_ps(result, _mm256_set1_ps(f32::NAN), invalid)
}

/// Cosine of 8 packed `f32` values.
///
/// # Safety
///
/// Requires AVX2 and FMA.
#[inline]
#[target_feature(enable = "avx,avx2,fma")]
pub unsafe fn _mm256_cos_ps(x: __m256) -> __m256 {
    let abs_x = _mm256_andnot_ps(_mm256_set1_ps(-0.0), x);

    let (r, j) = reduce256_ps(abs_x);

    let j = _mm256_sub_epi32(j, _mm256_set1_epi32(2));
    let sign = _mm256_castsi256_ps(_mm256_slli_epi32(
        _mm256_andnot_si256(j, _mm256_set1_epi32(4)),
        29,
    ));
    let use_sin = _mm256_castsi256_ps(_mm256_cmpeq_epi32(
        _mm256_and_si256(j, _mm256_set1_epi32(2)),
        _mm256_setzero_si256(),
    ));

    let y = _mm256_xor_ps(eval_poly256_ps(r, use_sin), sign);
    mask_invalid256_ps(y, abs_x)
}

/// Sine of 8 packed `f32` values.
///
/// # Safety
///
/// Requires AVX2 and FMA.
#[inline]
#[target_feature(enable = "avx,avx2,fma")]
pub unsafe fn _mm256_sin_ps(x: __m256) -> __m256 {
    let sign_mask = _mm256_set1_ps(-0.0);
    let input_sign = _mm256_and_ps(x, sign_mask);
    let abs_x = _mm256_andnot_ps(sign_mask, x);

    let (r, j) = reduce256_ps(abs_x);

    let swap_sign = _mm256_castsi256_ps(_mm256_slli_epi32(
        _mm256_and_si256(j, _mm256_set1_epi32(4)),
        29,
    ));
    let use_sin = _mm256_castsi256_ps(_mm256_cmpeq_epi32(
        _mm256_and_si256(j, _mm256_set1_epi32(2)),
        _mm256_setzero_si256(),
    ));

    let y = _mm256_xor_ps(
        eval_poly256_ps(r, use_sin),
        _mm256_xor_ps(input_sign, swap_sign),
    );
    mask_invalid256_ps(y, abs_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

    fn has_avx2_fma() -> bool {
        is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
    }

    fn cos4(values: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), _mm_cos_ps(_mm_loadu_ps(values.as_ptr()))) };
        out
    }

    fn sin4(values: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), _mm_sin_ps(_mm_loadu_ps(values.as_ptr()))) };
        out
    }

    fn cos8(values: [f32; 8]) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        unsafe {
            _mm256_storeu_ps(
                out.as_mut_ptr(),
                _mm256_cos_ps(_mm256_loadu_ps(values.as_ptr())),
            )
        };
        out
    }

    fn sin8(values: [f32; 8]) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        unsafe {
            _mm256_storeu_ps(
                out.as_mut_ptr(),
                _mm256_sin_ps(_mm256_loadu_ps(values.as_ptr())),
            )
        };
        out
    }

    fn assert_close(actual: &[f32], input: &[f32], reference: fn(f64) -> f64, tol: f32) {
        for (&x, &got) in input.iter().zip(actual) {
            let expected = reference(x as f64) as f32;
            assert!(
                (got - expected).abs() <= tol,
                "input {x}: got {got}, expected {expected}"
            );
        }
    }

    const QUADRANTS: [f32; 8] = [
        0.0,
        FRAC_PI_4,
        FRAC_PI_2,
        3.0 * FRAC_PI_4,
        PI,
        5.0 * FRAC_PI_4,
        3.0 * FRAC_PI_2,
        7.0 * FRAC_PI_4,
    ];

    #[test]
    fn test_sse_cos_sin_quadrants() {
        for half in QUADRANTS.chunks_exact(4) {
            let input: [f32; 4] = half.try_into().unwrap();
            assert_close(&cos4(input), &input, f64::cos, 2e-7);
            assert_close(&sin4(input), &input, f64::sin, 2e-7);
        }
    }

    #[test]
    fn test_sse_exact_values() {
        assert_eq!(cos4([0.0; 4]), [1.0; 4]);
        assert_eq!(sin4([0.0; 4]), [0.0; 4]);
        assert_eq!(cos4([PI; 4]), [-1.0; 4]);
    }

    #[test]
    fn test_sse_negative_inputs() {
        let input = [-0.5f32, -1.0, -FRAC_PI_2, -3.0];
        assert_close(&cos4(input), &input, f64::cos, 2e-7);
        assert_close(&sin4(input), &input, f64::sin, 2e-7);
    }

    #[test]
    fn test_sse_special_values() {
        let input = [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 1.0];
        let c = cos4(input);
        let s = sin4(input);
        assert!(c[..3].iter().all(|v| v.is_nan()));
        assert!(s[..3].iter().all(|v| v.is_nan()));
        assert!(!c[3].is_nan() && !s[3].is_nan());
    }

    #[test]
    fn test_sse_dense_sweep_over_full_turn() {
        let n = 4096;
        let input: Vec<f32> = (0..n).map(|i| i as f32 * TAU / n as f32).collect();
        for chunk in input.chunks_exact(4) {
            let group: [f32; 4] = chunk.try_into().unwrap();
            assert_close(&cos4(group), &group, f64::cos, 3e-7);
            assert_close(&sin4(group), &group, f64::sin, 3e-7);
        }
    }

    #[test]
    fn test_avx_cos_sin_quadrants() {
        if !has_avx2_fma() {
            return;
        }
        assert_close(&cos8(QUADRANTS), &QUADRANTS, f64::cos, 2e-7);
        assert_close(&sin8(QUADRANTS), &QUADRANTS, f64::sin, 2e-7);
    }

    #[test]
    fn test_avx_dense_sweep_over_full_turn() {
        if !has_avx2_fma() {
            return;
        }
        let n = 4096;
        let input: Vec<f32> = (0..n).map(|i| i as f32 * TAU / n as f32).collect();
        for chunk in input.chunks_exact(8) {
            let group: [f32; 8] = chunk.try_into().unwrap();
            assert_close(&cos8(group), &group, f64::cos, 3e-7);
            assert_close(&sin8(group), &group, f64::sin, 3e-7);
        }
    }

    #[test]
    fn test_avx_special_values() {
        if !has_avx2_fma() {
            return;
        }
        let input = [
            f32::NAN,
            f32::INFINITY,
            f32::NEG_INFINITY,
            0.0,
            -0.0,
            1.0,
            -1.0,
            2.0,
        ];
        let c = cos8(input);
        let s = sin8(input);
        assert!(c[..3].iter().all(|v| v.is_nan()));
        assert!(s[..3].iter().all(|v| v.is_nan()));
        assert_eq!(c[3], 1.0);
        assert_eq!(s[3], 0.0);
        assert_close(&c[3..], &input[3..], f64::cos, 2e-7);
        assert_close(&s[3..], &input[3..], f64::sin, 2e-7);
    }
}
