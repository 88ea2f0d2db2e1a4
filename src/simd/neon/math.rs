//! NEON sine and cosine kernels on `float32x4_t`.
//!
//! Same octant reduction and polynomials as the x86 kernels in
//! `simd::avx2::math`, expressed with AArch64 NEON intrinsics and fused
//! multiply-add throughout.

use std::arch::aarch64::*;

const FOUR_OVER_PI: f32 = 1.273_239_5;

const DP1: f32 = 0.785_156_25;
const DP2: f32 = 2.418_756_484_985_351_562_5e-4;
const DP3: f32 = 3.774_895e-8;

const S0: f32 = -1.951_529_6e-4;
const S1: f32 = 8.332_161e-3;
const S2: f32 = -1.666_665_5e-1;

const C0: f32 = 2.443_315_7e-5;
const C1: f32 = -1.388_731_6e-3;
const C2: f32 = 4.166_664_6e-2;

/// Octant reduction of non-negative `x`: returns `(r, j)` with `j` even.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn reduce(x: float32x4_t) -> (float32x4_t, int32x4_t) {
    // vcvtq_s32_f32 truncates toward zero.
    let j = vcvtq_s32_f32(vmulq_f32(x, vdupq_n_f32(FOUR_OVER_PI)));
    let j = vandq_s32(vaddq_s32(j, vdupq_n_s32(1)), vdupq_n_s32(!1));
    let y = vcvtq_f32_s32(j);

    let mut r = vfmsq_f32(x, y, vdupq_n_f32(DP1));
    r = vfmsq_f32(r, y, vdupq_n_f32(DP2));
    r = vfmsq_f32(r, y, vdupq_n_f32(DP3));

    (r, j)
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn eval_poly(r: float32x4_t, use_sin: uint32x4_t) -> float32x4_t {
    let z = vmulq_f32(r, r);

    let mut cos_p = vfmaq_f32(vdupq_n_f32(C1), vdupq_n_f32(C0), z);
    cos_p = vfmaq_f32(vdupq_n_f32(C2), cos_p, z);
    cos_p = vmulq_f32(cos_p, vmulq_f32(z, z));
    cos_p = vfmsq_f32(cos_p, z, vdupq_n_f32(0.5));
    cos_p = vaddq_f32(cos_p, vdupq_n_f32(1.0));

    let mut sin_p = vfmaq_f32(vdupq_n_f32(S1), vdupq_n_f32(S0), z);
    sin_p = vfmaq_f32(vdupq_n_f32(S2), sin_p, z);
    sin_p = vfmaq_f32(r, sin_p, vmulq_f32(z, r));

    vbslq_f32(use_sin, sin_p, cos_p)
}

/// Applies `sign` (a sign-bit mask) and turns NaN/±∞ input lanes into NaN.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn finish(y: float32x4_t, sign: uint32x4_t, abs_x: float32x4_t) -> float32x4_t {
    let y = vreinterpretq_f32_u32(veorq_u32(vreinterpretq_u32_f32(y), sign));
    // Not (|x| < +∞): true for +∞ and for NaN.
    let invalid = vmvnq_u32(vcltq_f32(abs_x, vdupq_n_f32(f32::INFINITY)));
    vbslq_f32(invalid, vdupq_n_f32(f32::NAN), y)
}

/// Cosine of 4 packed `f32` values.
///
/// # Safety
///
/// Requires NEON.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn vcosq_f32(x: float32x4_t) -> float32x4_t {
    let abs_x = vabsq_f32(x);

    let (r, j) = reduce(abs_x);

    let j = vsubq_s32(j, vdupq_n_s32(2));
    let sign = vshlq_n_u32::<29>(vreinterpretq_u32_s32(vbicq_s32(vdupq_n_s32(4), j)));
    let use_sin = vceqq_s32(vandq_s32(j, vdupq_n_s32(2)), vdupq_n_s32(0));

    finish(eval_poly(r, use_sin), sign, abs_x)
}

/// Sine of 4 packed `f32` values.
///
/// # Safety
///
/// Requires NEON.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn vsinq_f32(x: float32x4_t) -> float32x4_t {
    let input_sign = vandq_u32(vreinterpretq_u32_f32(x), vdupq_n_u32(0x8000_0000));
    let abs_x = vabsq_f32(x);

    let (r, j) = reduce(abs_x);

    let swap_sign = vshlq_n_u32::<29>(vreinterpretq_u32_s32(vandq_s32(j, vdupq_n_s32(4))));
    let use_sin = vceqq_s32(vandq_s32(j, vdupq_n_s32(2)), vdupq_n_s32(0));

    finish(eval_poly(r, use_sin), veorq_u32(input_sign, swap_sign), abs_x)
}
