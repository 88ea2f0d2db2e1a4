//! Batch passes compiled with AVX2 and FMA enabled.
//!
//! Each function instantiates a generic pass from
//! [`simd::slice`](crate::simd::slice) inside a `#[target_feature]` context
//! so the kernels inline into the loop.

use crate::simd::{
    avx2::{f32x4::F32x4, f32x8::F32x8},
    slice::{packed_pass, single_lane_accumulate},
};

/// # Safety
///
/// Requires AVX2 and FMA on the running CPU.
#[target_feature(enable = "avx,avx2,fma")]
pub(crate) unsafe fn cos_sin_x4(
    cos_in: &[f32],
    sin_in: &[f32],
    cos_out: &mut [f32],
    sin_out: &mut [f32],
) {
    packed_pass::<F32x4>(cos_in, sin_in, cos_out, sin_out)
}

/// # Safety
///
/// Requires AVX2 and FMA on the running CPU.
#[target_feature(enable = "avx,avx2,fma")]
pub(crate) unsafe fn cos_sin_x8(
    cos_in: &[f32],
    sin_in: &[f32],
    cos_out: &mut [f32],
    sin_out: &mut [f32],
) {
    packed_pass::<F32x8>(cos_in, sin_in, cos_out, sin_out)
}

/// # Safety
///
/// Requires AVX2 and FMA on the running CPU.
#[target_feature(enable = "avx,avx2,fma")]
pub(crate) unsafe fn cos_sin_x1_accumulate(
    cos_in: &[f32],
    sin_in: &[f32],
    cos_out: &mut [f32],
    sin_out: &mut [f32],
) {
    single_lane_accumulate::<F32x4>(cos_in, sin_in, cos_out, sin_out)
}
