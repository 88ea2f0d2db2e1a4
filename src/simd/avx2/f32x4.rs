//! 4-lane `f32` register on SSE2.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::{
    avx2::math::{_mm_cos_ps, _mm_sin_ps},
    traits::SimdTrig,
};

/// Number of f32 elements in a 128-bit register.
pub(crate) const LANE_COUNT: usize = 4;

/// Four packed `f32` values in an `__m128`.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: __m128,
}

impl SimdTrig for F32x4 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self {
            elements: _mm_loadu_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_first(value: f32) -> Self {
        Self {
            elements: _mm_set_ss(value),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        _mm_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn first(&self) -> f32 {
        _mm_cvtss_f32(self.elements)
    }

    #[inline(always)]
    unsafe fn cos(&self) -> Self {
        Self {
            elements: _mm_cos_ps(self.elements),
        }
    }

    #[inline(always)]
    unsafe fn sin(&self) -> Self {
        Self {
            elements: _mm_sin_ps(self.elements),
        }
    }
}
