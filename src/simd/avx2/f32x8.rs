//! 8-lane `f32` register on AVX2.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::{
    avx2::math::{_mm256_cos_ps, _mm256_sin_ps},
    traits::SimdTrig,
};

/// Number of f32 elements in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 8;

/// Eight packed `f32` values in an `__m256`.
///
/// All methods require AVX2 and FMA at runtime; the
/// [`Backend`](crate::simd::Backend) only selects this type after detecting
/// both.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    pub elements: __m256,
}

impl SimdTrig for F32x8 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_first(value: f32) -> Self {
        Self {
            elements: _mm256_setr_ps(value, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn first(&self) -> f32 {
        _mm256_cvtss_f32(self.elements)
    }

    #[inline(always)]
    unsafe fn cos(&self) -> Self {
        Self {
            elements: _mm256_cos_ps(self.elements),
        }
    }

    #[inline(always)]
    unsafe fn sin(&self) -> Self {
        Self {
            elements: _mm256_sin_ps(self.elements),
        }
    }
}
