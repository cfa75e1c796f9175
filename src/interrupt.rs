//! Interrupt vector and interrupt enables
//!
//! INT and INT_ENA share one layout of interrupt sources. [`InterruptSet`]
//! holds that layout as a plain bitmask, independent of the bit ordering of
//! the register word, and converts from and to the decoded field values of
//! [`crate::reg::INT_INT_ENA`].

use crate::codec::{EncodeError, FieldValues};
use bitfield::bitfield;

bitfield! {
    /// A set of CAN interrupts.
    #[derive(Copy, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct InterruptSet(u16);

    /// Bus status changed
    pub bsi, set_bsi: 10;
    /// Recessive bit detected during the first bit of a frame
    pub rfi, set_rfi: 9;
    /// Event logger finished
    pub lfi, set_lfi: 8;
    /// Bus error
    pub bei, set_bei: 7;
    /// Arbitration lost
    pub ali, set_ali: 6;
    /// Error passive or error active reached
    pub epi, set_epi: 5;
    /// Data overrun
    pub doi, set_doi: 3;
    /// Error warning limit reached
    pub ei, set_ei: 2;
    /// Frame transmitted
    pub ti, set_ti: 1;
    /// Frame received
    pub ri, set_ri: 0;
}

/// Bits of [`InterruptSet`] that name an interrupt.
const VALID: u16 = 0x07ef;

impl InterruptSet {
    /// Set holding every interrupt source.
    pub const fn all() -> Self {
        Self(VALID)
    }

    /// `true` if no interrupt is in the set.
    pub const fn is_empty(&self) -> bool {
        self.0 & VALID == 0
    }

    /// An iterator visiting all elements in ascending bit order.
    pub fn iter(&self) -> Iter {
        Iter {
            flags: *self,
            index: 0,
        }
    }

    /// Flags of the INT half of a decoded INT / INT_ENA word.
    ///
    /// Fields missing from `values` count as not set.
    pub fn from_status(values: &FieldValues<'_>) -> Self {
        Interrupt::ALL
            .iter()
            .filter(|int| values.bit(int.status_field()) == Some(true))
            .copied()
            .collect()
    }

    /// Enables of the INT_ENA half of a decoded INT / INT_ENA word.
    pub fn from_enable(values: &FieldValues<'_>) -> Self {
        Interrupt::ALL
            .iter()
            .filter(|int| values.bit(int.enable_field()) == Some(true))
            .copied()
            .collect()
    }

    /// Writes the set into the INT_ENA fields of `values`, one field per
    /// interrupt source, clearing the enables of sources not in the set.
    pub fn apply_enable(&self, values: &mut FieldValues<'_>) -> Result<(), EncodeError> {
        for int in Interrupt::ALL {
            values.set_bit(int.enable_field(), self.0 & u16::from(*int) != 0)?;
        }
        Ok(())
    }
}

impl FromIterator<Interrupt> for InterruptSet {
    fn from_iter<T: IntoIterator<Item = Interrupt>>(iter: T) -> Self {
        let mut set = 0_u16;
        for int in iter.into_iter() {
            set |= u16::from(int);
        }
        InterruptSet(set)
    }
}

impl core::fmt::Debug for InterruptSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "InterruptSet {{ ")?;
        for int in self.iter() {
            write!(f, "{} ", int.mnemonic())?;
        }
        write!(f, "}}")
    }
}

/// A single interrupt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interrupt {
    /// RI
    FrameReceived = 0,
    /// TI
    FrameTransmitted = 1,
    /// EI
    ErrorWarning = 2,
    /// DOI
    DataOverrun = 3,
    /// EPI
    FaultStateChanged = 5,
    /// ALI
    ArbitrationLost = 6,
    /// BEI
    BusError = 7,
    /// LFI
    LoggerFinished = 8,
    /// RFI
    RecessiveFirstBit = 9,
    /// BSI
    BusStatusChanged = 10,
}

impl Interrupt {
    /// Every interrupt source, in bit order.
    pub const ALL: &'static [Interrupt] = &[
        Interrupt::FrameReceived,
        Interrupt::FrameTransmitted,
        Interrupt::ErrorWarning,
        Interrupt::DataOverrun,
        Interrupt::FaultStateChanged,
        Interrupt::ArbitrationLost,
        Interrupt::BusError,
        Interrupt::LoggerFinished,
        Interrupt::RecessiveFirstBit,
        Interrupt::BusStatusChanged,
    ];

    /// Short register name of the source.
    pub const fn mnemonic(self) -> &'static str {
        use Interrupt::*;
        match self {
            FrameReceived => "RI",
            FrameTransmitted => "TI",
            ErrorWarning => "EI",
            DataOverrun => "DOI",
            FaultStateChanged => "EPI",
            ArbitrationLost => "ALI",
            BusError => "BEI",
            LoggerFinished => "LFI",
            RecessiveFirstBit => "RFI",
            BusStatusChanged => "BSI",
        }
    }

    /// Field of INT flagging the source.
    pub const fn status_field(self) -> &'static str {
        use Interrupt::*;
        match self {
            FrameReceived => "ri",
            FrameTransmitted => "ti",
            ErrorWarning => "ei",
            DataOverrun => "doi",
            FaultStateChanged => "epi",
            ArbitrationLost => "ali",
            BusError => "bei",
            LoggerFinished => "lfi",
            RecessiveFirstBit => "rfi",
            BusStatusChanged => "bsi",
        }
    }

    /// Field of INT_ENA enabling the source.
    pub const fn enable_field(self) -> &'static str {
        use Interrupt::*;
        match self {
            FrameReceived => "rie",
            FrameTransmitted => "tie",
            ErrorWarning => "eie",
            DataOverrun => "doie",
            FaultStateChanged => "epie",
            ArbitrationLost => "alie",
            BusError => "beie",
            LoggerFinished => "lfie",
            RecessiveFirstBit => "rfie",
            BusStatusChanged => "bsie",
        }
    }
}

impl From<Interrupt> for u16 {
    fn from(x: Interrupt) -> Self {
        1 << x as u16
    }
}

/// Bit index does not name an interrupt
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidInterruptNumber(pub u8);

impl TryFrom<u8> for Interrupt {
    type Error = InvalidInterruptNumber;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Interrupt::*;
        let ret = match value {
            0 => FrameReceived,
            1 => FrameTransmitted,
            2 => ErrorWarning,
            3 => DataOverrun,
            5 => FaultStateChanged,
            6 => ArbitrationLost,
            7 => BusError,
            8 => LoggerFinished,
            9 => RecessiveFirstBit,
            10 => BusStatusChanged,
            _ => Err(InvalidInterruptNumber(value))?,
        };
        Ok(ret)
    }
}

/// An iterator over the items of an [`InterruptSet`].
///
/// This `struct` is created by [`InterruptSet::iter`].
pub struct Iter {
    flags: InterruptSet,
    index: u8,
}

impl Iterator for Iter {
    type Item = Interrupt;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < 16 {
            let i = self.index;
            self.index += 1;
            if self.flags.0 & (1 << i) == 0 {
                continue;
            }
            // bit 4 and bits above 10 are reserved
            if let Ok(int) = Interrupt::try_from(i) {
                return Some(int);
            }
        }
        None
    }
}
