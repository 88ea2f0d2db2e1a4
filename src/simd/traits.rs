/// A fixed-width register of `f32` lanes with vector cosine and sine.
///
/// Implemented once per instruction set ([`avx2`](super::avx2),
/// [`neon`](super::neon)) and once by the per-lane scalar
/// [`fallback`](super::fallback). The batch passes in [`slice`](super::slice)
/// are written against this trait only.
pub trait SimdTrig: Copy {
    /// Number of `f32` values processed by one instruction.
    const LANE_COUNT: usize;

    /// Loads `LANE_COUNT` contiguous values.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for `LANE_COUNT` reads, and the instruction set of
    /// the implementing type must be available on the running CPU.
    unsafe fn load(ptr: *const f32) -> Self;

    /// Places `value` in lane 0; the remaining lanes are zero.
    ///
    /// # Safety
    ///
    /// The instruction set of the implementing type must be available.
    unsafe fn load_first(value: f32) -> Self;

    /// Stores all lanes to `LANE_COUNT` contiguous slots.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for `LANE_COUNT` writes, and the instruction set
    /// must be available.
    unsafe fn store_at(&self, ptr: *mut f32);

    /// Reads lane 0.
    ///
    /// # Safety
    ///
    /// The instruction set of the implementing type must be available.
    unsafe fn first(&self) -> f32;

    /// Lane-wise cosine.
    ///
    /// # Safety
    ///
    /// The instruction set of the implementing type must be available.
    unsafe fn cos(&self) -> Self;

    /// Lane-wise sine.
    ///
    /// # Safety
    ///
    /// The instruction set of the implementing type must be available.
    unsafe fn sin(&self) -> Self;
}
