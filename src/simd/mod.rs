//! Vector cosine/sine primitives and runtime backend selection.
//!
//! ```text
//! simd/
//! ├── mod.rs       - Backend detection and dispatch (this file)
//! ├── traits.rs    - SimdTrig register abstraction
//! ├── slice.rs     - Generic batch passes over SimdTrig
//! ├── avx2/        - SSE2 4-lane and AVX2+FMA 8-lane kernels (x86, x86_64)
//! ├── neon/        - NEON kernels (aarch64)
//! └── fallback.rs  - Per-lane scalar stand-in
//! ```
//!
//! ## Safety
//!
//! The instruction-set kernels are `unsafe` and `#[target_feature]`-gated.
//! [`Backend`] is the only safe entry point: it can only be built by
//! [`Backend::detect`], which checks the CPU at runtime, or by
//! [`Backend::fallback`], which needs no special instructions.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;

#[cfg(target_arch = "aarch64")]
pub mod neon;

pub mod fallback;

pub(crate) mod slice;

pub mod traits;

use fallback::Lanes;

/// Instruction set behind a [`Backend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isa {
    /// SSE2 4-lane and AVX2 + FMA 8-lane kernels.
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Avx2,
    /// NEON 4-lane kernels, paired for 8 lanes.
    #[cfg(target_arch = "aarch64")]
    Neon,
    /// Per-lane scalar loop with the vector output shape.
    Fallback,
}

/// The vector cosine/sine capability used by the packed passes.
///
/// Every method takes the two angle slices and the two output slices, which
/// must all have the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backend {
    isa: Isa,
}

impl Backend {
    /// Picks the best backend the running CPU supports.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
                log::debug!("vector backend: avx2 (sse2 x4, avx2+fma x8)");
                return Self { isa: Isa::Avx2 };
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                log::debug!("vector backend: neon");
                return Self { isa: Isa::Neon };
            }
        }

        log::info!("no supported vector instruction set detected, using scalar fallback");
        Self::fallback()
    }

    /// The per-lane scalar fallback, regardless of CPU support.
    pub fn fallback() -> Self {
        Self {
            isa: Isa::Fallback,
        }
    }

    pub fn isa(&self) -> Isa {
        self.isa
    }

    pub fn name(&self) -> &'static str {
        match self.isa {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Isa::Avx2 => "avx2",
            #[cfg(target_arch = "aarch64")]
            Isa::Neon => "neon",
            Isa::Fallback => "scalar fallback",
        }
    }

    /// Whether timings on this backend reflect real vector instructions.
    pub fn is_representative(&self) -> bool {
        self.isa != Isa::Fallback
    }

    /// Cosine of `cos_in` and sine of `sin_in`, 4 lanes per instruction.
    /// Elements past the last full group of 4 are left untouched.
    pub fn cos_sin_x4(
        &self,
        cos_in: &[f32],
        sin_in: &[f32],
        cos_out: &mut [f32],
        sin_out: &mut [f32],
    ) {
        check_lengths(cos_in, sin_in, cos_out, sin_out);

        match self.isa {
            // SAFETY: `Isa::Avx2` is only set after detecting avx2 and fma.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Isa::Avx2 => unsafe { avx2::slice::cos_sin_x4(cos_in, sin_in, cos_out, sin_out) },
            // SAFETY: `Isa::Neon` is only set after detecting neon.
            #[cfg(target_arch = "aarch64")]
            Isa::Neon => unsafe { neon::slice::cos_sin_x4(cos_in, sin_in, cos_out, sin_out) },
            // SAFETY: the fallback uses no special instructions.
            Isa::Fallback => unsafe {
                slice::packed_pass::<Lanes<4>>(cos_in, sin_in, cos_out, sin_out)
            },
        }
    }

    /// Cosine of `cos_in` and sine of `sin_in`, 8 lanes per instruction.
    /// Elements past the last full group of 8 are left untouched.
    pub fn cos_sin_x8(
        &self,
        cos_in: &[f32],
        sin_in: &[f32],
        cos_out: &mut [f32],
        sin_out: &mut [f32],
    ) {
        check_lengths(cos_in, sin_in, cos_out, sin_out);

        match self.isa {
            // SAFETY: `Isa::Avx2` is only set after detecting avx2 and fma.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Isa::Avx2 => unsafe { avx2::slice::cos_sin_x8(cos_in, sin_in, cos_out, sin_out) },
            // SAFETY: `Isa::Neon` is only set after detecting neon.
            #[cfg(target_arch = "aarch64")]
            Isa::Neon => unsafe { neon::slice::cos_sin_x8(cos_in, sin_in, cos_out, sin_out) },
            // SAFETY: the fallback uses no special instructions.
            Isa::Fallback => unsafe {
                slice::packed_pass::<Lanes<8>>(cos_in, sin_in, cos_out, sin_out)
            },
        }
    }

    /// Adds the 4-lane kernel's cosine/sine of every element onto the
    /// outputs, one element per instruction.
    pub fn cos_sin_x1_accumulate(
        &self,
        cos_in: &[f32],
        sin_in: &[f32],
        cos_out: &mut [f32],
        sin_out: &mut [f32],
    ) {
        check_lengths(cos_in, sin_in, cos_out, sin_out);

        match self.isa {
            // SAFETY: `Isa::Avx2` is only set after detecting avx2 and fma.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Isa::Avx2 => unsafe {
                avx2::slice::cos_sin_x1_accumulate(cos_in, sin_in, cos_out, sin_out)
            },
            // SAFETY: `Isa::Neon` is only set after detecting neon.
            #[cfg(target_arch = "aarch64")]
            Isa::Neon => unsafe {
                neon::slice::cos_sin_x1_accumulate(cos_in, sin_in, cos_out, sin_out)
            },
            // SAFETY: the fallback uses no special instructions.
            Isa::Fallback => unsafe {
                slice::single_lane_accumulate::<Lanes<4>>(cos_in, sin_in, cos_out, sin_out)
            },
        }
    }
}

#[inline(always)]
fn check_lengths(cos_in: &[f32], sin_in: &[f32], cos_out: &[f32], sin_out: &[f32]) {
    let n = cos_in.len();
    assert!(
        sin_in.len() == n && cos_out.len() == n && sin_out.len() == n,
        "batch lengths differ (cos_in: {n}, sin_in: {}, cos_out: {}, sin_out: {})",
        sin_in.len(),
        cos_out.len(),
        sin_out.len()
    );
}
