//! Typed register access over a [`RegisterBus`]
//!
//! [`Registers`] ties a bus to the layout table and a codec. Every access goes
//! through the word holding the requested register, so reading ERP reads the
//! whole EWL / ERP / FAULT_STATE word and writing TX_SETTINGS writes
//! TX_COMMAND as well. Use [`Registers::modify`] to change a few fields and
//! keep the rest of the word.

use core::fmt;
use ctucanfd_core::RegisterBus;

use crate::catalog::{LookupError, RegisterAddress};
use crate::codec::{Codec, EncodeError, FieldValues};
use crate::config::CodecConfig;
use crate::interrupt::InterruptSet;
use crate::layout::{LayoutError, LayoutTable, WordLayout};

/// Errors that may occur during register access
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus failed to move the word
    Bus(E),
    /// The address does not resolve to a register
    Lookup(LookupError),
    /// Field values violate the access contract of the word
    Encode(EncodeError),
}

impl<E> From<LookupError> for Error<E> {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

impl<E> From<EncodeError> for Error<E> {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus error: {}", e),
            Self::Lookup(e) => e.fmt(f),
            Self::Encode(e) => e.fmt(f),
        }
    }
}

/// Register window of one controller
pub struct Registers<B> {
    bus: B,
    codec: Codec,
    table: LayoutTable<'static>,
}

impl<B: RegisterBus> Registers<B> {
    /// Create an instance
    pub fn new(bus: B, config: CodecConfig) -> Result<Self, LayoutError> {
        Ok(Self {
            bus,
            codec: Codec::new(config),
            table: LayoutTable::new()?,
        })
    }

    /// Releases the bus.
    pub fn free(self) -> B {
        self.bus
    }

    /// Codec used for every access.
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Layout table used for every access.
    pub fn table(&self) -> &LayoutTable<'static> {
        &self.table
    }

    fn layout(&self, reg: RegisterAddress) -> Result<&'static WordLayout, LookupError> {
        self.table
            .word(reg)
            .ok_or(LookupError::UnknownAddress(reg.offset()))
    }

    fn load(&mut self, layout: &WordLayout) -> Result<u32, Error<B::Error>> {
        let raw = self.bus.read(layout.offset()).map_err(Error::Bus)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("read {} = {=u32:#x}", layout.base(), raw);
        Ok(raw)
    }

    fn store(&mut self, layout: &WordLayout, raw: u32) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("write {} = {=u32:#x}", layout.base(), raw);
        self.bus.write(layout.offset(), raw).map_err(Error::Bus)
    }

    fn rejected(error: EncodeError) -> Error<B::Error> {
        #[cfg(feature = "defmt")]
        defmt::warn!("encode rejected: {}", error);
        Error::Encode(error)
    }

    /// Reads and decodes the word holding `reg`.
    ///
    /// Every field of the word is present in the result, not only those of
    /// `reg`.
    pub fn read(&mut self, reg: RegisterAddress) -> Result<FieldValues<'static>, Error<B::Error>> {
        let layout = self.layout(reg)?;
        let raw = self.load(layout)?;
        Ok(self.codec.decode(layout, raw))
    }

    /// Writes the word holding `reg`.
    ///
    /// Fields not set by `f` are written as 0, reserved bits as well. Nothing
    /// is written if `f` fails or a value breaks the access contract.
    pub fn write<F>(&mut self, reg: RegisterAddress, f: F) -> Result<(), Error<B::Error>>
    where
        for<'w> F:
            FnOnce(&'w mut FieldValues<'static>) -> Result<&'w mut FieldValues<'static>, EncodeError>,
    {
        let layout = self.layout(reg)?;
        let mut values = FieldValues::new(layout);
        f(&mut values).map_err(Self::rejected)?;
        let raw = self.codec.encode(&values).map_err(Self::rejected)?;
        self.store(layout, raw)
    }

    /// Read-modify-write of the word holding `reg`.
    ///
    /// `f` receives the decoded word and an empty set of values to write.
    /// Read-write fields it leaves unset keep the bits read from hardware,
    /// write-only fields and strobes it leaves unset are written as 0.
    /// Reserved bits follow [`CodecConfig::reserved`].
    pub fn modify<F>(&mut self, reg: RegisterAddress, f: F) -> Result<(), Error<B::Error>>
    where
        for<'w> F: FnOnce(
            &FieldValues<'static>,
            &'w mut FieldValues<'static>,
        ) -> Result<&'w mut FieldValues<'static>, EncodeError>,
    {
        let layout = self.layout(reg)?;
        let prior = self.load(layout)?;
        let current = self.codec.decode(layout, prior);
        let mut values = FieldValues::new(layout);
        f(&current, &mut values).map_err(Self::rejected)?;
        let raw = self
            .codec
            .encode_over(&values, prior)
            .map_err(Self::rejected)?;
        self.store(layout, raw)
    }

    /// Reads the raw word holding the byte at `offset`.
    pub fn read_raw(&mut self, offset: u16) -> Result<u32, Error<B::Error>> {
        let layout = self.table.word_at(offset)?;
        self.load(layout)
    }

    /// Writes `bits` to the word holding the byte at `offset`.
    ///
    /// # Safety
    /// `bits` bypasses the codec. It must not set reserved bits, and strobe
    /// bits set in it fire their commands.
    pub unsafe fn write_raw(&mut self, offset: u16, bits: u32) -> Result<(), Error<B::Error>> {
        let layout = self.table.word_at(offset)?;
        self.store(layout, bits)
    }

    /// Soft reset of the controller.
    ///
    /// Clears MODE and SETTINGS, so the controller is disabled afterwards.
    pub fn reset(&mut self) -> Result<(), Error<B::Error>> {
        self.write(RegisterAddress::MODE, |w| w.set_bit("rst", true))
    }

    /// Interrupts currently flagged in INT.
    pub fn interrupts(&mut self) -> Result<InterruptSet, Error<B::Error>> {
        let values = self.read(RegisterAddress::INT)?;
        Ok(InterruptSet::from_status(&values))
    }

    /// Interrupts currently enabled in INT_ENA.
    pub fn interrupt_enable(&mut self) -> Result<InterruptSet, Error<B::Error>> {
        let values = self.read(RegisterAddress::INT_ENA)?;
        Ok(InterruptSet::from_enable(&values))
    }

    /// Enables exactly the interrupts in `set`.
    ///
    /// The INT half of the word is written as 0 so no flag is touched.
    pub fn set_interrupt_enable(&mut self, set: InterruptSet) -> Result<(), Error<B::Error>> {
        self.write(RegisterAddress::INT_ENA, |w| {
            set.apply_enable(w)?;
            Ok(w)
        })
    }
}
