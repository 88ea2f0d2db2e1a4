//! Batch passes compiled with NEON enabled.

use crate::simd::{
    neon::f32x4::{F32x4, F32x4x2},
    slice::{packed_pass, single_lane_accumulate},
};

/// # Safety
///
/// Requires NEON on the running CPU.
#[target_feature(enable = "neon")]
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
/// Requires NEON on the running CPU.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn cos_sin_x8(
    cos_in: &[f32],
    sin_in: &[f32],
    cos_out: &mut [f32],
    sin_out: &mut [f32],
) {
    packed_pass::<F32x4x2>(cos_in, sin_in, cos_out, sin_out)
}

/// # Safety
///
/// Requires NEON on the running CPU.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn cos_sin_x1_accumulate(
    cos_in: &[f32],
    sin_in: &[f32],
    cos_out: &mut [f32],
    sin_out: &mut [f32],
) {
    single_lane_accumulate::<F32x4>(cos_in, sin_in, cos_out, sin_out)
}
