//! Register address map
//!
//! Every register of the controller has a fixed byte offset into the register
//! window. Several registers share one 32-bit word; the word is always
//! accessed as a whole, see [`crate::layout`].
//!
//! The map is not contiguous. Offsets that are not covered by any register
//! (for example `0x68..0xAC` or `0xDC..0x100`) must never be accessed.

use core::fmt;

/// One past the last byte of the register window.
pub const WINDOW_END: u16 = 0x150;

/// Number of TX data words.
pub const TX_DATA_WORDS: u8 = 20;

/// Address lookup failed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LookupError {
    /// Offset lies inside the register window but does not name a register
    /// (a gap, or a byte that is not a register start).
    UnknownAddress(u16),
    /// Offset lies beyond the top of the register window.
    OutOfRange(u16),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAddress(offset) => write!(f, "no register at offset {:#05x}", offset),
            Self::OutOfRange(offset) => write!(
                f,
                "offset {:#05x} is beyond the register window (ends at {:#05x})",
                offset, WINDOW_END
            ),
        }
    }
}

macro_rules! registers {
    ($($(#[$doc:meta])* $name:ident = $offset:literal, $span:literal;)*) => {
        /// Symbolic register name, with the register's byte offset as
        /// discriminant.
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u16)]
        pub enum RegisterAddress {
            $($(#[$doc])* $name = $offset,)*
        }

        impl RegisterAddress {
            /// Every register, in address order.
            pub const ALL: &'static [RegisterAddress] = &[$(RegisterAddress::$name,)*];

            /// Register name as used in the hardware documentation.
            pub const fn name(self) -> &'static str {
                match self {
                    $(RegisterAddress::$name => stringify!($name),)*
                }
            }

            /// Number of bytes of the address map this register answers to.
            ///
            /// A register that shares its word with others extends up to the
            /// next register of the word, or to the end of the word if it is
            /// the last one. A register alone in its word spans the smallest
            /// power of two bytes holding its fields.
            pub const fn span(self) -> u16 {
                match self {
                    $(RegisterAddress::$name => $span,)*
                }
            }
        }
    };
}

registers! {
    /// Device identifier
    DEVICE_ID = 0x00, 2;
    /// IP core version
    VERSION = 0x02, 2;
    /// Operating mode
    MODE = 0x04, 1;
    /// Command strobes
    COMMAND = 0x05, 1;
    /// Controller status
    STATUS = 0x06, 1;
    /// Controller settings
    SETTINGS = 0x07, 1;
    /// Interrupt vector
    INT = 0x08, 2;
    /// Interrupt enable
    INT_ENA = 0x0a, 2;
    /// Nominal bit timing
    BTR = 0x0c, 2;
    /// Data bit timing
    BTR_FD = 0x0e, 2;
    /// Arbitration lost capture
    ALC = 0x10, 1;
    /// Synchronisation jump width
    SJW = 0x11, 1;
    /// Nominal baud rate prescaler
    BRP = 0x12, 1;
    /// Data baud rate prescaler
    BRP_FD = 0x13, 1;
    /// Error warning limit
    EWL = 0x14, 1;
    /// Error passive limit
    ERP = 0x15, 1;
    /// Fault confinement state
    FAULT_STATE = 0x16, 2;
    /// Receive error counter
    RXC = 0x18, 2;
    /// Transmit error counter
    TXC = 0x1a, 2;
    /// Nominal bit rate error counter
    ERR_NORM = 0x1c, 2;
    /// Data bit rate error counter
    ERR_FD = 0x1e, 2;
    /// Counter preset
    CTR_PRES = 0x20, 2;
    /// Filter A mask
    FILTER_A_MASK = 0x24, 4;
    /// Filter A value
    FILTER_A_VAL = 0x28, 4;
    /// Filter B mask
    FILTER_B_MASK = 0x2c, 4;
    /// Filter B value
    FILTER_B_VAL = 0x30, 4;
    /// Filter C mask
    FILTER_C_MASK = 0x34, 4;
    /// Filter C value
    FILTER_C_VAL = 0x38, 4;
    /// Range filter low bound
    FILTER_RAN_LOW = 0x3c, 4;
    /// Range filter high bound
    FILTER_RAN_HIGH = 0x40, 4;
    /// Filter enables per frame type
    FILTER_CONTROL = 0x44, 2;
    /// Filter presence
    FILTER_STATUS = 0x46, 2;
    /// RX buffer status
    RX_STATUS = 0x48, 1;
    /// RX buffer message count
    RX_MC = 0x49, 1;
    /// RX buffer free words
    RX_MF = 0x4a, 2;
    /// RX buffer size
    RX_BUFF_SIZE = 0x4c, 1;
    /// RX buffer write pointer
    RX_WPP = 0x4d, 1;
    /// RX buffer read pointer
    RX_RPP = 0x4e, 2;
    /// RX buffer data
    RX_DATA = 0x50, 4;
    /// Transceiver delay
    TRV_DELAY = 0x54, 2;
    /// TX buffer status
    TX_STATUS = 0x58, 1;
    /// TX buffer commands
    TX_COMMAND = 0x5c, 2;
    /// TX settings
    TX_SETTINGS = 0x5e, 2;
    /// TX buffer priorities
    TX_PRIORITY = 0x60, 1;
    /// Error capture
    ERR_CAPT = 0x64, 1;
    /// Received frame counter
    RX_COUNTER = 0xac, 4;
    /// Transmitted frame counter
    TX_COUNTER = 0xb0, 4;
    /// Event logger trigger configuration
    LOG_TRIG_CONFIG = 0xb8, 4;
    /// Event logger capture configuration
    LOG_CAPT_CONFIG = 0xc0, 4;
    /// Event logger status
    LOG_STATUS = 0xc4, 2;
    /// Event logger write pointer
    LOG_WPP = 0xc6, 1;
    /// Event logger read pointer
    LOG_RPP = 0xc7, 1;
    /// Event logger commands
    LOG_COMMAND = 0xc8, 1;
    /// Captured event, timestamp bits 47..16
    LOG_CAPT_EVENT_1 = 0xcc, 4;
    /// Captured event, type, details and timestamp bits 15..0
    LOG_CAPT_EVENT_2 = 0xd0, 4;
    /// Protocol control debug state
    DEBUG_REGISTER = 0xd4, 2;
    /// Constant test pattern
    YOLO_REG = 0xd8, 4;
    /// TX data word 1
    TX_DATA_1 = 0x100, 4;
    /// TX data word 2
    TX_DATA_2 = 0x104, 4;
    /// TX data word 3
    TX_DATA_3 = 0x108, 4;
    /// TX data word 4
    TX_DATA_4 = 0x10c, 4;
    /// TX data word 5
    TX_DATA_5 = 0x110, 4;
    /// TX data word 6
    TX_DATA_6 = 0x114, 4;
    /// TX data word 7
    TX_DATA_7 = 0x118, 4;
    /// TX data word 8
    TX_DATA_8 = 0x11c, 4;
    /// TX data word 9
    TX_DATA_9 = 0x120, 4;
    /// TX data word 10
    TX_DATA_10 = 0x124, 4;
    /// TX data word 11
    TX_DATA_11 = 0x128, 4;
    /// TX data word 12
    TX_DATA_12 = 0x12c, 4;
    /// TX data word 13
    TX_DATA_13 = 0x130, 4;
    /// TX data word 14
    TX_DATA_14 = 0x134, 4;
    /// TX data word 15
    TX_DATA_15 = 0x138, 4;
    /// TX data word 16
    TX_DATA_16 = 0x13c, 4;
    /// TX data word 17
    TX_DATA_17 = 0x140, 4;
    /// TX data word 18
    TX_DATA_18 = 0x144, 4;
    /// TX data word 19
    TX_DATA_19 = 0x148, 4;
    /// TX data word 20
    TX_DATA_20 = 0x14c, 4;
}

// Offsets strictly increase, spans stay inside their word and never reach
// into the next register.
const _: () = {
    let all = RegisterAddress::ALL;
    let mut i = 0;
    while i < all.len() {
        let reg = all[i];
        let start = reg.offset();
        let end = start + reg.span();
        assert!(end <= WINDOW_END);
        assert!(end <= reg.word_offset() + 4);
        if i + 1 < all.len() {
            assert!(end <= all[i + 1].offset());
        }
        i += 1;
    }
};

impl RegisterAddress {
    /// Byte offset of the register in the register window.
    pub const fn offset(self) -> u16 {
        self as u16
    }

    /// Byte offset of the 32-bit word holding the register.
    pub const fn word_offset(self) -> u16 {
        self.offset() & !0x3
    }

    /// `true` if the register starts its word.
    pub const fn is_word_aligned(self) -> bool {
        self.offset() & 0x3 == 0
    }

    /// Looks up the register starting exactly at `offset`.
    ///
    /// Bytes inside a register but past its first byte are not register
    /// addresses and fail with [`LookupError::UnknownAddress`]; use
    /// [`Self::resolve`] to find the register covering them.
    pub fn from_offset(offset: u16) -> Result<Self, LookupError> {
        if offset >= WINDOW_END {
            return Err(LookupError::OutOfRange(offset));
        }
        Self::ALL
            .binary_search_by_key(&offset, |reg| reg.offset())
            .map(|index| Self::ALL[index])
            .map_err(|_| LookupError::UnknownAddress(offset))
    }

    /// Looks up the register whose span covers `offset`.
    ///
    /// `0x17` resolves to [`Self::FAULT_STATE`], `0x65` lies in the gap after
    /// [`Self::ERR_CAPT`] and fails with [`LookupError::UnknownAddress`].
    pub fn resolve(offset: u16) -> Result<Self, LookupError> {
        if offset >= WINDOW_END {
            return Err(LookupError::OutOfRange(offset));
        }
        let after = Self::ALL.partition_point(|reg| reg.offset() <= offset);
        match after.checked_sub(1).map(|index| Self::ALL[index]) {
            Some(reg) if offset < reg.offset() + reg.span() => Ok(reg),
            _ => Err(LookupError::UnknownAddress(offset)),
        }
    }

    /// TX data word `n`, counting from 1.
    pub fn tx_data(n: u8) -> Option<Self> {
        if !(1..=TX_DATA_WORDS).contains(&n) {
            return None;
        }
        let offset = Self::TX_DATA_1.offset() + 4 * u16::from(n - 1);
        Self::from_offset(offset).ok()
    }

    /// Registers that share the 32-bit word with this one, including itself,
    /// in address order.
    pub fn word_members(self) -> impl Iterator<Item = RegisterAddress> {
        let word = self.word_offset();
        Self::ALL
            .iter()
            .copied()
            .filter(move |reg| reg.word_offset() == word)
    }
}

impl fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#05x}", self.name(), self.offset())
    }
}

impl TryFrom<u16> for RegisterAddress {
    type Error = LookupError;

    fn try_from(offset: u16) -> Result<Self, Self::Error> {
        Self::from_offset(offset)
    }
}

impl From<RegisterAddress> for u16 {
    fn from(reg: RegisterAddress) -> Self {
        reg.offset()
    }
}
