//! ARM NEON backend for AArch64.
//!
//! NEON registers are 128 bits wide, so the 4-lane path maps onto one
//! `float32x4_t` and the 8-lane path onto a register pair.
//!
//! # Platform Support
//!
//! - **Apple Silicon**: M1, M2, M3 processors (macOS, iOS)
//! - **AWS Graviton**: Graviton2, Graviton3 processors
//! - **Embedded**: ARM Cortex-A series processors

#[allow(clippy::excessive_precision)]
pub mod math;

pub mod f32x4;

pub(crate) mod slice;
