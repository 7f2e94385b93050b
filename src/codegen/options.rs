//! Byte transforms applied by the generator before rendering.

use serde::{Deserialize, Serialize};

/// Order of the bits inside each output byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BitOrder {
    /// Leftmost pixel in the most significant bit.
    #[default]
    Normal,
    /// Leftmost pixel in the least significant bit.
    Reverse,
}

/// Whether output bytes are complemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Inversion {
    #[default]
    None,
    Invert,
}

/// Per-byte transforms. Bit reversal runs first, then inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodingOptions {
    pub bit_order: BitOrder,
    pub inversion: Inversion,
}

impl EncodingOptions {
    pub fn new(bit_order: BitOrder, inversion: Inversion) -> Self {
        Self {
            bit_order,
            inversion,
        }
    }

    /// Apply the configured transforms to one byte.
    #[inline]
    pub fn apply(&self, byte: u8) -> u8 {
        let byte = match self.bit_order {
            BitOrder::Normal => byte,
            BitOrder::Reverse => reverse_bits(byte),
        };
        match self.inversion {
            Inversion::None => byte,
            Inversion::Invert => invert(byte),
        }
    }
}

/// Swap bit 0 with bit 7, 1 with 6, 2 with 5 and 3 with 4.
#[inline]
pub fn reverse_bits(byte: u8) -> u8 {
    let mut reversed = 0u8;
    for i in 0..8 {
        if byte & (1 << i) != 0 {
            reversed |= 1 << (7 - i);
        }
    }
    reversed
}

#[inline]
pub fn invert(byte: u8) -> u8 {
    !byte
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bits() {
        assert_eq!(reverse_bits(0x00), 0x00);
        assert_eq!(reverse_bits(0x01), 0x80);
        assert_eq!(reverse_bits(0x3c), 0x3c);
        assert_eq!(reverse_bits(0x06), 0x60);
        assert_eq!(reverse_bits(0xF0), 0x0F);
        assert_eq!(reverse_bits(0b1011_0001), 0b1000_1101);
    }

    #[test]
    fn test_reverse_bits_matches_std() {
        for b in 0..=255u8 {
            assert_eq!(reverse_bits(b), b.reverse_bits());
        }
    }

    #[test]
    fn test_transforms_are_self_inverse() {
        for b in 0..=255u8 {
            assert_eq!(reverse_bits(reverse_bits(b)), b);
            assert_eq!(invert(invert(b)), b);
        }
    }

    #[test]
    fn test_apply_order() {
        // Reverse first, then invert: 0x01 -> 0x80 -> 0x7f
        let opts = EncodingOptions::new(BitOrder::Reverse, Inversion::Invert);
        assert_eq!(opts.apply(0x01), 0x7f);

        let opts = EncodingOptions::new(BitOrder::Normal, Inversion::Invert);
        assert_eq!(opts.apply(0x3c), 0xc3);

        let opts = EncodingOptions::default();
        assert_eq!(opts.apply(0x66), 0x66);
    }
}
