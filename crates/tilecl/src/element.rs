use core::marker::PhantomData;

use bytemuck::Pod;
use half::{bf16, f16};

/// Scalar element types that can back a tile.
///
/// The closed set mirrors what the kernels consume: single precision, half
/// precision and bfloat16. The float conversions exist for host-side
/// diagnostics only; device math is the consumers' concern.
pub trait Element: Pod + PartialEq + Send + Sync + 'static {
    /// Width of one element in bits.
    const BITS: usize;

    fn to_f32(self) -> f32;
    fn from_f32(value: f32) -> Self;
}

impl Element for f32 {
    const BITS: usize = 32;

    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

impl Element for f16 {
    const BITS: usize = 16;

    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    fn from_f32(value: f32) -> Self {
        f16::from_f32(value)
    }
}

impl Element for bf16 {
    const BITS: usize = 16;

    fn to_f32(self) -> f32 {
        bf16::to_f32(self)
    }

    fn from_f32(value: f32) -> Self {
        bf16::from_f32(value)
    }
}

/// Architecture access widths for an element type.
///
/// Loads are issued as 128-bit vectorized accesses, and the L1 fetches whole
/// 1024-bit (128-byte) transactions; contiguous threads reading contiguous
/// elements of one transaction make full use of the cache line.
pub struct AccessWidth<E: Element>(PhantomData<E>);

impl<E: Element> AccessWidth<E> {
    /// Maximal width of one vectorized access, in bits.
    pub const ACCESS_BITS: usize = 128;
    /// Elements moved by one vectorized access.
    pub const NUM_PER_ACCESS: usize = Self::ACCESS_BITS / E::BITS;
    /// Width of one memory transaction, in bits.
    pub const TRANSACTION_BITS: usize = 1024;
    /// Contiguous columns that fill one memory transaction.
    pub const EXPECTED_COLS: usize = Self::TRANSACTION_BITS / E::BITS;
}

/// The warp-level base tile every larger tile decomposes into.
pub struct BaseTile<E: Element>(PhantomData<E>);

impl<E: Element> BaseTile<E> {
    pub const SIZE: usize = 16;
    pub const ROWS: usize = Self::SIZE;
    pub const COLS: usize = Self::SIZE;
    pub const NUMEL: usize = Self::ROWS * Self::COLS;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_widths() {
        assert_eq!(AccessWidth::<f32>::NUM_PER_ACCESS, 4);
        assert_eq!(AccessWidth::<f16>::NUM_PER_ACCESS, 8);
        assert_eq!(AccessWidth::<bf16>::NUM_PER_ACCESS, 8);
        assert_eq!(AccessWidth::<f32>::EXPECTED_COLS, 32);
        assert_eq!(AccessWidth::<f16>::EXPECTED_COLS, 64);
    }

    #[test]
    fn base_tile_is_16x16() {
        assert_eq!(BaseTile::<f16>::NUMEL, 256);
    }

    #[test]
    fn float_round_trips() {
        assert_eq!(f16::from_f32(1.5).to_f32(), 1.5);
        assert_eq!(bf16::from_f32(-2.0).to_f32(), -2.0);
        assert_eq!(<f32 as Element>::from_f32(0.25), 0.25);
    }
}
