//! Packing and unpacking of register words
//!
//! [`Codec::decode`] turns a raw 32-bit word into one value per declared
//! field. It never fails: reserved bits may carry anything and are dropped.
//!
//! [`Codec::encode`] and [`Codec::encode_over`] go the other way and enforce
//! the access contract of every field that is given a value:
//! - read-only fields must not be written at all
//! - strobes only accept 0 and 1
//! - values must fit the field
//!
//! Nothing is truncated or silently dropped; a rejected value fails the whole
//! encode.

use crate::catalog::RegisterAddress;
use crate::config::{CodecConfig, ReservedBits};
use crate::layout::{Access, FieldSpec, WordLayout};
use core::fmt;

/// Upper bound on the number of fields of one word; every field has at least
/// one bit.
pub const MAX_FIELDS: usize = 32;

/// A value could not be encoded
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Value does not fit the field
    Overflow {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: u32,
        /// Field width in bits
        width: u8,
    },
    /// Field is read-only
    WriteToReadOnly {
        /// Field name
        field: &'static str,
    },
    /// Strobe given something other than 0 or 1
    InvalidStrobeValue {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: u32,
    },
    /// The word has no field of the requested name
    UnknownField {
        /// Anchor register of the word
        word: RegisterAddress,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow {
                field,
                value,
                width,
            } => write!(
                f,
                "value {:#x} does not fit the {}-bit field `{}`",
                value, width, field
            ),
            Self::WriteToReadOnly { field } => write!(f, "field `{}` is read-only", field),
            Self::InvalidStrobeValue { field, value } => {
                write!(f, "strobe `{}` accepts 0 or 1, got {}", field, value)
            }
            Self::UnknownField { word } => write!(f, "no such field in word {}", word),
        }
    }
}

/// Field values of one word
///
/// Produced by [`Codec::decode`] with every field present, or filled by the
/// caller with the fields to be written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldValues<'l> {
    layout: &'l WordLayout,
    values: [Option<u32>; MAX_FIELDS],
}

impl<'l> FieldValues<'l> {
    /// Empty set of values for `layout`.
    pub fn new(layout: &'l WordLayout) -> Self {
        Self {
            layout,
            values: [None; MAX_FIELDS],
        }
    }

    /// Layout the values belong to.
    pub fn layout(&self) -> &'l WordLayout {
        self.layout
    }

    /// Value of field `name`, if present.
    pub fn get(&self, name: &str) -> Option<u32> {
        let index = self.layout.position(name)?;
        self.values.get(index).copied().flatten()
    }

    /// Value of single-bit field `name`, if present.
    pub fn bit(&self, name: &str) -> Option<bool> {
        self.get(name).map(|value| value != 0)
    }

    /// Sets field `name` to `value`.
    ///
    /// Only the name is checked here. Width and access class are checked by
    /// the encoder so that a decoded word can be inspected and edited freely.
    pub fn set(&mut self, name: &str, value: u32) -> Result<&mut Self, EncodeError> {
        let word = self.layout.base();
        let slot = self
            .layout
            .position(name)
            .and_then(|index| self.values.get_mut(index))
            .ok_or(EncodeError::UnknownField { word })?;
        *slot = Some(value);
        Ok(self)
    }

    /// Sets single-bit field `name`.
    pub fn set_bit(&mut self, name: &str, bit: bool) -> Result<&mut Self, EncodeError> {
        self.set(name, u32::from(bit))
    }

    /// Removes field `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<u32> {
        let index = self.layout.position(name)?;
        self.values.get_mut(index)?.take()
    }

    /// Keeps only the fields for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&FieldSpec, u32) -> bool) {
        let fields = self.layout.fields();
        for (field, slot) in fields.iter().zip(self.values.iter_mut()) {
            if let Some(value) = *slot {
                if !keep(field, value) {
                    *slot = None;
                }
            }
        }
    }

    /// Drops every field software may not write.
    pub fn writable(mut self) -> Self {
        self.retain(|field, _| field.access.is_writable());
        self
    }

    /// Present fields with their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'l FieldSpec, u32)> + '_ {
        let fields = self.layout.fields();
        fields
            .iter()
            .zip(self.values.iter())
            .filter_map(|(field, value)| value.map(|value| (field, value)))
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Register word encoder / decoder
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create an instance
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> CodecConfig {
        self.config
    }

    /// Unpacks `raw` into one value per field of `layout`.
    pub fn decode<'l>(&self, layout: &'l WordLayout, raw: u32) -> FieldValues<'l> {
        let order = self.config.order;
        let mut values = FieldValues::new(layout);
        for (field, slot) in layout.fields().iter().zip(values.values.iter_mut()) {
            *slot = Some((raw >> field.shift(order)) & field.max());
        }
        values
    }

    /// Packs `values` into a word. Absent fields and reserved bits are 0.
    pub fn encode(&self, values: &FieldValues<'_>) -> Result<u32, EncodeError> {
        self.pack(values, 0)
    }

    /// Packs `values` over `prior`, the word as last read from hardware.
    ///
    /// Absent read-write and read-only fields keep their bits from `prior`.
    /// Absent write-only fields and strobes are written as 0, their read
    /// value is not echoed back. Reserved bits are cleared unless
    /// [`ReservedBits::Preserve`] is configured.
    pub fn encode_over(&self, values: &FieldValues<'_>, prior: u32) -> Result<u32, EncodeError> {
        let order = self.config.order;
        let layout = values.layout();
        let kept = prior & !layout.write_only_mask(order);
        let base = match self.config.reserved {
            ReservedBits::Zero => kept & layout.field_mask(order),
            ReservedBits::Preserve => kept,
        };
        self.pack(values, base)
    }

    fn pack(&self, values: &FieldValues<'_>, mut raw: u32) -> Result<u32, EncodeError> {
        let order = self.config.order;
        for (field, value) in values.iter() {
            check(field, value)?;
            raw = (raw & !field.mask(order)) | (value << field.shift(order));
        }
        Ok(raw)
    }
}

fn check(field: &FieldSpec, value: u32) -> Result<(), EncodeError> {
    match field.access {
        Access::ReadOnly => {
            return Err(EncodeError::WriteToReadOnly { field: field.name });
        }
        Access::SelfClearing if value > 1 => {
            return Err(EncodeError::InvalidStrobeValue {
                field: field.name,
                value,
            });
        }
        _ => {}
    }
    if value > field.max() {
        return Err(EncodeError::Overflow {
            field: field.name,
            value,
            width: field.width,
        });
    }
    Ok(())
}
