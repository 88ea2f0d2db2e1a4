//! 4-lane `f32` register on NEON, and the register pair used for 8 lanes.

use std::arch::aarch64::*;

use crate::simd::{
    neon::math::{vcosq_f32, vsinq_f32},
    traits::SimdTrig,
};

/// Number of f32 elements in a 128-bit NEON register.
pub(crate) const LANE_COUNT: usize = 4;

/// Four packed `f32` values in a `float32x4_t`.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: float32x4_t,
}

impl SimdTrig for F32x4 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self {
            elements: vld1q_f32(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_first(value: f32) -> Self {
        Self {
            elements: vsetq_lane_f32::<0>(value, vdupq_n_f32(0.0)),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        vst1q_f32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn first(&self) -> f32 {
        vgetq_lane_f32::<0>(self.elements)
    }

    #[inline(always)]
    unsafe fn cos(&self) -> Self {
        Self {
            elements: vcosq_f32(self.elements),
        }
    }

    #[inline(always)]
    unsafe fn sin(&self) -> Self {
        Self {
            elements: vsinq_f32(self.elements),
        }
    }
}

/// Eight `f32` values held in two NEON registers.
///
/// NEON has no 256-bit register; the 8-lane pass issues both halves back to
/// back, which is what a compiler does for an 8-wide vector type on AArch64.
#[derive(Copy, Clone, Debug)]
pub struct F32x4x2 {
    pub lo: float32x4_t,
    pub hi: float32x4_t,
}

impl SimdTrig for F32x4x2 {
    const LANE_COUNT: usize = 2 * LANE_COUNT;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self {
            lo: vld1q_f32(ptr),
            hi: vld1q_f32(ptr.add(LANE_COUNT)),
        }
    }

    #[inline(always)]
    unsafe fn load_first(value: f32) -> Self {
        Self {
            lo: vsetq_lane_f32::<0>(value, vdupq_n_f32(0.0)),
            hi: vdupq_n_f32(0.0),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        vst1q_f32(ptr, self.lo);
        vst1q_f32(ptr.add(LANE_COUNT), self.hi);
    }

    #[inline(always)]
    unsafe fn first(&self) -> f32 {
        vgetq_lane_f32::<0>(self.lo)
    }

    #[inline(always)]
    unsafe fn cos(&self) -> Self {
        Self {
            lo: vcosq_f32(self.lo),
            hi: vcosq_f32(self.hi),
        }
    }

    #[inline(always)]
    unsafe fn sin(&self) -> Self {
        Self {
            lo: vsinq_f32(self.lo),
            hi: vsinq_f32(self.hi),
        }
    }
}
