//! Per-lane scalar stand-in for the vector registers.
//!
//! Used when the CPU lacks the instructions the vector backends need. The
//! output shape is identical, but every "lane" is a separate scalar call, so
//! timings taken on this path say nothing about SIMD throughput.

use crate::simd::traits::SimdTrig;

/// `N` values processed one after the other with `f64` cosine and sine,
/// narrowed to `f32`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lanes<const N: usize>(pub [f32; N]);

impl<const N: usize> SimdTrig for Lanes<N> {
    const LANE_COUNT: usize = N;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self(std::array::from_fn(|i| *ptr.add(i)))
    }

    #[inline(always)]
    unsafe fn load_first(value: f32) -> Self {
        let mut lanes = [0.0f32; N];
        lanes[0] = value;
        Self(lanes)
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        for (i, &value) in self.0.iter().enumerate() {
            *ptr.add(i) = value;
        }
    }

    #[inline(always)]
    unsafe fn first(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    unsafe fn cos(&self) -> Self {
        Self(self.0.map(|x| (x as f64).cos() as f32))
    }

    #[inline(always)]
    unsafe fn sin(&self) -> Self {
        Self(self.0.map(|x| (x as f64).sin() as f32))
    }
}
