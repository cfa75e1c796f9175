//! Codec configuration

/// Mapping of a field's logical position to physical bit indices
///
/// The register layout table describes every field by its offset in
/// [`BitOrder::Native`] order. [`BitOrder::Reversed`] mirrors each field
/// across the 32-bit word: a field at native offset `o` of width `w` occupies
/// bits `32 - o - w ..= 31 - o`. Bits inside a field keep their significance,
/// so both orders decode the same word contents to the same values as long as
/// encoder and decoder agree on the order.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// First-named field at the least significant bit
    #[default]
    Native,
    /// First-named field at the most significant bit
    Reversed,
}

impl BitOrder {
    /// Order used by bitfield layouts on the compilation target.
    pub const fn target() -> Self {
        if cfg!(target_endian = "big") {
            Self::Reversed
        } else {
            Self::Native
        }
    }

    /// Physical offset of the least significant bit of a field.
    pub const fn physical_offset(self, offset: u8, width: u8) -> u8 {
        match self {
            Self::Native => offset,
            Self::Reversed => 32 - offset - width,
        }
    }
}

/// Handling of reserved bits when merging into a prior word
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReservedBits {
    /// Reserved bits are always written as zero
    #[default]
    Zero,
    /// Reserved bits of the prior word are written back unchanged
    ///
    /// Only useful for hardware revisions that assign meaning to bits this
    /// crate considers reserved.
    Preserve,
}

/// Configuration for encoding and decoding register words
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CodecConfig {
    /// Bit ordering of the register words
    pub order: BitOrder,
    /// Reserved bit policy for read-modify-write
    pub reserved: ReservedBits,
}

impl CodecConfig {
    /// Create an instance
    ///
    /// Reserved bits default to [`ReservedBits::Zero`].
    pub const fn new(order: BitOrder) -> Self {
        Self {
            order,
            reserved: ReservedBits::Zero,
        }
    }

    /// Configuration matching the compilation target, see
    /// [`BitOrder::target`].
    pub const fn target() -> Self {
        Self::new(BitOrder::target())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reversed_mirrors_across_the_word() {
        assert_eq!(BitOrder::Native.physical_offset(0, 6), 0);
        assert_eq!(BitOrder::Reversed.physical_offset(0, 6), 26);
        assert_eq!(BitOrder::Reversed.physical_offset(0, 32), 0);
        assert_eq!(BitOrder::Reversed.physical_offset(31, 1), 0);
    }

    #[test]
    fn defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.order, BitOrder::Native);
        assert_eq!(config.reserved, ReservedBits::Zero);
    }
}
