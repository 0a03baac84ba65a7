//! Bit-level model of the LED bank.

/// On/off state of every output line at once; bit `i` drives line `i`.
///
/// `N` is the number of output lines. The stored value is always within
/// `0..=2^N - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMask<const N: usize>(u32);

impl<const N: usize> OutputMask<N> {
    const FULL_BITS: u32 = {
        assert!(N >= 1 && N <= 32, "an output bank holds 1..=32 lines");
        ((1u64 << N) - 1) as u32
    };

    /// Every output driven high.
    pub const fn all_on() -> Self {
        Self(Self::FULL_BITS)
    }

    /// Every output driven low.
    pub const fn all_off() -> Self {
        Self(0)
    }

    /// Build a mask from raw bits, truncated to the N-bit range.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::FULL_BITS)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Level of line `index`.
    pub const fn bit(self, index: usize) -> bool {
        (self.0 >> index) & 1 == 1
    }

    /// N-bit complement: the toggled state of the whole bank.
    pub const fn toggled(self) -> Self {
        Self(!self.0 & Self::FULL_BITS)
    }

    /// Map the mask onto per-line writes.
    ///
    /// Pure with respect to the mask; the caller supplies the hardware side
    /// effect. Writes are issued in index order, one per line.
    pub fn apply_to(self, mut write: impl FnMut(usize, bool)) {
        for index in 0..N {
            write(index, self.bit(index));
        }
    }
}
