//! Register layout table
//!
//! A [`WordLayout`] lists the bit-fields of one 32-bit word of the register
//! window. Up to four registers of the address map share a word; the word is
//! identified by the lowest of them.
//!
//! Field positions are given in [`BitOrder::Native`] order. Positions for
//! [`BitOrder::Reversed`] are derived, never declared separately, which keeps
//! both orders consistent by construction. [`WordLayout::check`] still
//! verifies it, together with the other layout invariants.

use crate::catalog::{LookupError, RegisterAddress};
use crate::config::BitOrder;
use core::fmt;

/// How software may access a field
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Driven by hardware; writes are ignored
    ReadOnly,
    /// Latched by hardware on write; reads are undefined
    WriteOnly,
    /// Software owned configuration
    ReadWrite,
    /// Strobe: writing 1 triggers an action, the bit clears itself
    SelfClearing,
}

impl Access {
    /// `true` if software may supply a value for the field.
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::ReadOnly)
    }
}

/// One named bit range of a register word
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Offset of the least significant bit, native order
    pub offset: u8,
    /// Number of bits
    pub width: u8,
    /// Access class
    pub access: Access,
}

impl FieldSpec {
    /// Create an instance
    pub const fn new(name: &'static str, offset: u8, width: u8, access: Access) -> Self {
        Self {
            name,
            offset,
            width,
            access,
        }
    }

    /// Read-only field
    pub const fn ro(name: &'static str, offset: u8, width: u8) -> Self {
        Self::new(name, offset, width, Access::ReadOnly)
    }

    /// Write-only field
    pub const fn wo(name: &'static str, offset: u8, width: u8) -> Self {
        Self::new(name, offset, width, Access::WriteOnly)
    }

    /// Read-write field
    pub const fn rw(name: &'static str, offset: u8, width: u8) -> Self {
        Self::new(name, offset, width, Access::ReadWrite)
    }

    /// Single-bit self-clearing strobe
    pub const fn strobe(name: &'static str, offset: u8) -> Self {
        Self::new(name, offset, 1, Access::SelfClearing)
    }

    /// Largest value the field can hold.
    pub const fn max(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    /// Physical offset of the least significant bit.
    pub const fn shift(&self, order: BitOrder) -> u8 {
        order.physical_offset(self.offset, self.width)
    }

    /// Physical bits occupied by the field.
    pub const fn mask(&self, order: BitOrder) -> u32 {
        self.max() << self.shift(order)
    }

    const fn end(&self) -> u16 {
        self.offset as u16 + self.width as u16
    }
}

/// Register layout table is malformed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Field declares zero bits
    ZeroWidth {
        /// Offending field
        field: &'static str,
    },
    /// Field runs past bit 31, or the fields of a word add up to more than
    /// 32 bits
    CoverageExceeded {
        /// Field that does not fit any more
        field: &'static str,
    },
    /// Two fields claim the same bit
    OverlappingFields {
        /// Field declared first
        first: &'static str,
        /// Field declared second
        second: &'static str,
    },
    /// Two fields of one word share a name
    DuplicateField {
        /// Repeated name
        field: &'static str,
    },
    /// Field occupies a different number of bits in one of the bit orders,
    /// or collides with another field there
    OrderingMismatch {
        /// Offending field
        field: &'static str,
    },
    /// Field is not contained in exactly one register of its word
    StraddlesRegisters {
        /// Offending field
        field: &'static str,
    },
    /// Word is not anchored at a word-aligned register
    Misaligned {
        /// Anchor register of the word
        base: RegisterAddress,
    },
    /// Two layouts describe the same word
    DuplicateWord {
        /// Anchor register of the repeated word
        base: RegisterAddress,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWidth { field } => write!(f, "field `{}` has no bits", field),
            Self::CoverageExceeded { field } => {
                write!(f, "field `{}` does not fit in a 32-bit word", field)
            }
            Self::OverlappingFields { first, second } => {
                write!(f, "fields `{}` and `{}` overlap", first, second)
            }
            Self::DuplicateField { field } => write!(f, "field `{}` is declared twice", field),
            Self::OrderingMismatch { field } => {
                write!(f, "field `{}` differs between bit orders", field)
            }
            Self::StraddlesRegisters { field } => {
                write!(f, "field `{}` is not inside a single register", field)
            }
            Self::Misaligned { base } => write!(f, "word anchored at unaligned {}", base),
            Self::DuplicateWord { base } => write!(f, "word {} is described twice", base),
        }
    }
}

/// Fields sharing one 32-bit word
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WordLayout {
    base: RegisterAddress,
    fields: &'static [FieldSpec],
}

impl WordLayout {
    /// Create an instance
    ///
    /// No validation is performed here; see [`Self::check`].
    pub const fn new(base: RegisterAddress, fields: &'static [FieldSpec]) -> Self {
        Self { base, fields }
    }

    /// Lowest register of the word.
    pub const fn base(&self) -> RegisterAddress {
        self.base
    }

    /// Byte offset of the word.
    pub const fn offset(&self) -> u16 {
        self.base.word_offset()
    }

    /// Declared fields, in declaration order.
    pub const fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Index of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Field called `name`.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields = self.fields;
        fields.iter().find(|field| field.name == name)
    }

    /// Bits covered by declared fields.
    pub const fn field_mask(&self, order: BitOrder) -> u32 {
        let mut mask = 0;
        let mut i = 0;
        while i < self.fields.len() {
            mask |= self.fields[i].mask(order);
            i += 1;
        }
        mask
    }

    /// Bits not covered by any field.
    pub const fn reserved_mask(&self, order: BitOrder) -> u32 {
        !self.field_mask(order)
    }

    /// Bits of write-only and self-clearing fields, whose read value carries
    /// no meaning.
    pub const fn write_only_mask(&self, order: BitOrder) -> u32 {
        let mut mask = 0;
        let mut i = 0;
        while i < self.fields.len() {
            if matches!(
                self.fields[i].access,
                Access::WriteOnly | Access::SelfClearing
            ) {
                mask |= self.fields[i].mask(order);
            }
            i += 1;
        }
        mask
    }

    /// Registers of the address map sharing this word.
    pub fn registers(&self) -> impl Iterator<Item = RegisterAddress> {
        self.base.word_members()
    }

    /// Register of the address map the field belongs to.
    pub fn register_of(&self, field: &FieldSpec) -> Option<RegisterAddress> {
        RegisterAddress::resolve(self.offset() + u16::from(field.offset / 8)).ok()
    }

    /// Fields belonging to register `reg`.
    pub fn fields_of(&self, reg: RegisterAddress) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        let fields = self.fields;
        fields
            .iter()
            .filter(move |field| self.register_of(field) == Some(reg))
    }

    /// Verifies the layout invariants:
    /// - every field has at least one bit and ends at or below bit 32
    /// - the fields add up to at most 32 bits and do not overlap
    /// - field names are unique
    /// - each field occupies the same number of bits, disjoint from the
    ///   others, in both bit orders
    /// - each field lies within the span of one register of this word
    pub const fn check(&self) -> Result<(), LayoutError> {
        if !self.base.is_word_aligned() {
            return Err(LayoutError::Misaligned { base: self.base });
        }
        let fields = self.fields;
        let mut total: u16 = 0;
        let mut i = 0;
        while i < fields.len() {
            let field = &fields[i];
            if field.width == 0 {
                return Err(LayoutError::ZeroWidth { field: field.name });
            }
            total += field.width as u16;
            if field.end() > 32 || total > 32 {
                return Err(LayoutError::CoverageExceeded { field: field.name });
            }
            i += 1;
        }

        let mut i = 0;
        while i < fields.len() {
            let mut j = i + 1;
            while j < fields.len() {
                if same_name(fields[i].name, fields[j].name) {
                    return Err(LayoutError::DuplicateField {
                        field: fields[j].name,
                    });
                }
                if fields[i].mask(BitOrder::Native) & fields[j].mask(BitOrder::Native) != 0 {
                    return Err(LayoutError::OverlappingFields {
                        first: fields[i].name,
                        second: fields[j].name,
                    });
                }
                if fields[i].mask(BitOrder::Reversed) & fields[j].mask(BitOrder::Reversed) != 0 {
                    return Err(LayoutError::OrderingMismatch {
                        field: fields[j].name,
                    });
                }
                j += 1;
            }
            i += 1;
        }

        let mut i = 0;
        while i < fields.len() {
            let field = &fields[i];
            let native = field.mask(BitOrder::Native).count_ones();
            let reversed = field.mask(BitOrder::Reversed).count_ones();
            if native != field.width as u32 || reversed != field.width as u32 {
                return Err(LayoutError::OrderingMismatch { field: field.name });
            }

            let word = self.offset();
            let first = covering(word + field.offset as u16 / 8);
            let last = covering(word + (field.end() - 1) / 8);
            match (first, last) {
                (Some(first), Some(last))
                    if first as u16 == last as u16 && first.word_offset() == word => {}
                _ => return Err(LayoutError::StraddlesRegisters { field: field.name }),
            }
            i += 1;
        }
        Ok(())
    }
}

const fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Register whose span holds byte `offset`, usable in constant evaluation.
const fn covering(offset: u16) -> Option<RegisterAddress> {
    let all = RegisterAddress::ALL;
    let mut i = 0;
    while i < all.len() {
        let reg = all[i];
        if reg.offset() <= offset && offset < reg.offset() + reg.span() {
            return Some(reg);
        }
        i += 1;
    }
    None
}

/// Panics during constant evaluation if any layout is malformed.
pub(crate) const fn assert_valid(words: &[WordLayout]) {
    let mut i = 0;
    while i < words.len() {
        if words[i].check().is_err() {
            panic!("malformed register word layout");
        }
        i += 1;
    }
}

/// Validated set of word layouts
///
/// The built-in table, [`crate::reg::WORDS`], is additionally validated at
/// compile time; a malformed entry fails the build.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutTable<'a> {
    words: &'a [WordLayout],
}

impl LayoutTable<'static> {
    /// Layout table of the CTU CAN FD register window.
    pub fn new() -> Result<Self, LayoutError> {
        Self::with_words(crate::reg::WORDS)
    }
}

impl<'a> LayoutTable<'a> {
    /// Validates `words` and builds a table from them.
    pub fn with_words(words: &'a [WordLayout]) -> Result<Self, LayoutError> {
        for (index, word) in words.iter().enumerate() {
            word.check()?;
            if words[..index]
                .iter()
                .any(|other| other.offset() == word.offset())
            {
                return Err(LayoutError::DuplicateWord { base: word.base() });
            }
        }
        Ok(Self { words })
    }

    /// Every word of the table.
    pub fn words(&self) -> &'a [WordLayout] {
        self.words
    }

    /// Word holding register `reg`.
    pub fn word(&self, reg: RegisterAddress) -> Option<&'a WordLayout> {
        let words = self.words;
        words
            .iter()
            .find(|word| word.offset() == reg.word_offset())
    }

    /// Word holding the byte at `offset`.
    ///
    /// Any byte inside a register's span resolves, so `0x14`, `0x16` and
    /// `0x17` all yield the EWL / ERP / FAULT_STATE word. Bytes in gaps of
    /// the address map fail.
    pub fn word_at(&self, offset: u16) -> Result<&'a WordLayout, LookupError> {
        let reg = RegisterAddress::resolve(offset)?;
        self.word(reg).ok_or(LookupError::UnknownAddress(offset))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::RegisterAddress as Reg;

    const TOO_WIDE: &[FieldSpec] = &[FieldSpec::rw("a", 20, 13)];
    const OVERLAP: &[FieldSpec] = &[FieldSpec::rw("a", 0, 4), FieldSpec::rw("b", 3, 2)];
    const TWICE: &[FieldSpec] = &[FieldSpec::rw("a", 0, 4), FieldSpec::rw("a", 4, 2)];
    const EMPTY_FIELD: &[FieldSpec] = &[FieldSpec::rw("a", 0, 0)];
    const ACROSS_BYTES: &[FieldSpec] = &[FieldSpec::rw("ewl_and_erp", 4, 8)];
    const INTO_GAP: &[FieldSpec] = &[FieldSpec::ro("long", 0, 16)];

    #[test]
    fn built_in_table_is_valid() {
        let table = LayoutTable::new().unwrap();
        assert_eq!(table.words().len(), crate::reg::WORDS.len());
    }

    #[test]
    fn rejects_field_past_bit_31() {
        assert_eq!(
            WordLayout::new(Reg::YOLO_REG, TOO_WIDE).check(),
            Err(LayoutError::CoverageExceeded { field: "a" })
        );
    }

    #[test]
    fn rejects_overlap() {
        assert_eq!(
            WordLayout::new(Reg::YOLO_REG, OVERLAP).check(),
            Err(LayoutError::OverlappingFields {
                first: "a",
                second: "b"
            })
        );
    }

    #[test]
    fn rejects_duplicate_names_and_zero_width() {
        assert_eq!(
            WordLayout::new(Reg::YOLO_REG, TWICE).check(),
            Err(LayoutError::DuplicateField { field: "a" })
        );
        assert_eq!(
            WordLayout::new(Reg::YOLO_REG, EMPTY_FIELD).check(),
            Err(LayoutError::ZeroWidth { field: "a" })
        );
    }

    #[test]
    fn rejects_fields_outside_one_register() {
        assert_eq!(
            WordLayout::new(Reg::EWL, ACROSS_BYTES).check(),
            Err(LayoutError::StraddlesRegisters {
                field: "ewl_and_erp"
            })
        );
        // ERR_CAPT only answers to its first byte
        assert_eq!(
            WordLayout::new(Reg::ERR_CAPT, INTO_GAP).check(),
            Err(LayoutError::StraddlesRegisters { field: "long" })
        );
    }

    #[test]
    fn rejects_unaligned_anchor() {
        assert_eq!(
            WordLayout::new(Reg::COMMAND, &[]).check(),
            Err(LayoutError::Misaligned { base: Reg::COMMAND })
        );
    }

    #[test]
    fn rejects_duplicate_words() {
        let words = [crate::reg::RX_DATA, crate::reg::RX_DATA];
        assert_eq!(
            LayoutTable::with_words(&words).unwrap_err(),
            LayoutError::DuplicateWord { base: Reg::RX_DATA }
        );
    }

    #[test]
    fn reserved_mask_follows_order() {
        let btr = &crate::reg::BTR_BTR_FD;
        let native: u32 = (1 << 26) | (1 << 31);
        assert_eq!(btr.reserved_mask(BitOrder::Native), native);
        assert_eq!(btr.reserved_mask(BitOrder::Reversed), native.reverse_bits());
    }

    #[test]
    fn lookup_by_name_and_offset() {
        let table = LayoutTable::new().unwrap();
        let ewl = table.word(Reg::EWL).unwrap();
        assert_eq!(ewl.base(), Reg::EWL);
        assert_eq!(table.word(Reg::FAULT_STATE), Some(ewl));
        assert_eq!(table.word_at(0x14), Ok(ewl));
        assert_eq!(table.word_at(0x16), Ok(ewl));
        assert_eq!(table.word_at(0x17), Ok(ewl));
        assert!(ewl.field("era").is_some());
        assert_eq!(
            table.word_at(0x65),
            Err(LookupError::UnknownAddress(0x65))
        );
        assert_eq!(table.word_at(0x200), Err(LookupError::OutOfRange(0x200)));
    }

    #[test]
    fn fields_are_grouped_by_register() {
        let word = &crate::reg::MODE_COMMAND_STATUS_SETTINGS;
        assert_eq!(word.registers().count(), 4);
        assert_eq!(word.fields_of(Reg::MODE).count(), 8);
        assert_eq!(word.fields_of(Reg::COMMAND).count(), 3);
        assert_eq!(word.fields_of(Reg::STATUS).count(), 8);
        assert_eq!(word.fields_of(Reg::SETTINGS).count(), 5);
        let rst = word.field("rst").unwrap();
        assert_eq!(word.register_of(rst), Some(Reg::MODE));
    }
}
