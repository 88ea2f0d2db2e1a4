//! Batch passes written once against [`SimdTrig`].
//!
//! These are `#[inline(always)]` so each instruction-set module can
//! instantiate them inside a `#[target_feature]` function and get the kernels
//! inlined with the right features enabled.

use crate::simd::traits::SimdTrig;

/// Overwrites `cos_out`/`sin_out` group by group, `V::LANE_COUNT` values at a
/// time. The trailing `len % V::LANE_COUNT` slots are left untouched.
///
/// # Safety
///
/// The instruction set of `V` must be available on the running CPU.
#[inline(always)]
pub(crate) unsafe fn packed_pass<V: SimdTrig>(
    cos_in: &[f32],
    sin_in: &[f32],
    cos_out: &mut [f32],
    sin_out: &mut [f32],
) {
    let step = V::LANE_COUNT;

    let cos_groups = cos_in.chunks_exact(step).zip(cos_out.chunks_exact_mut(step));
    let sin_groups = sin_in.chunks_exact(step).zip(sin_out.chunks_exact_mut(step));

    for ((a, c), (b, s)) in cos_groups.zip(sin_groups) {
        V::load(a.as_ptr()).cos().store_at(c.as_mut_ptr());
        V::load(b.as_ptr()).sin().store_at(s.as_mut_ptr());
    }
}

/// Adds the vector cosine/sine of every element onto the outputs, one element
/// per instruction with only lane 0 populated.
///
/// Must run after a pass that initialised the outputs: the result depends on
/// what is already stored there.
///
/// # Safety
///
/// The instruction set of `V` must be available on the running CPU.
#[inline(always)]
pub(crate) unsafe fn single_lane_accumulate<V: SimdTrig>(
    cos_in: &[f32],
    sin_in: &[f32],
    cos_out: &mut [f32],
    sin_out: &mut [f32],
) {
    let cos_pairs = cos_in.iter().zip(cos_out.iter_mut());
    let sin_pairs = sin_in.iter().zip(sin_out.iter_mut());

    for ((&a, c), (&b, s)) in cos_pairs.zip(sin_pairs) {
        *c += V::load_first(a).cos().first();
        *s += V::load_first(b).sin().first();
    }
}
