//! x86 backend: 4-lane SSE2 and 8-lane AVX2 + FMA kernels.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+) for the
//!   8-lane path; the 4-lane path only needs SSE2
//! - **Target Architecture**: x86 or x86_64
//! - **Runtime Detection**: [`Backend::detect`](crate::simd::Backend::detect)
//!   selects this module only when both `avx2` and `fma` are reported
//!
//! # Available Types
//!
//! - [`f32x4::F32x4`]: 128-bit register, 4 × f32
//! - [`f32x8::F32x8`]: 256-bit register, 8 × f32

pub mod f32x4;

pub mod f32x8;

#[allow(clippy::excessive_precision)]
pub mod math;

pub(crate) mod slice;
