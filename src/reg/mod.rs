//! Field layouts of every word of the register window
//!
//! Positions are native order: the first field listed for a register sits at
//! its lowest bit. Access classes are assumed from the register names and
//! the usual CTU CAN FD conventions; they are not verified against the
//! datasheet:
//! - status, counters, and the interrupt vector are read-only (INT is
//!   cleared by hardware when read)
//! - command bits (MODE.rst, COMMAND, CTR_PRES presets, TX_COMMAND,
//!   LOG_COMMAND) are self-clearing strobes
//! - the counter preset value, the TX buffer index bits and the TX data words
//!   are write-only
//! - everything else is read-write configuration

mod control;
mod filter;
mod log;
mod rx;
mod tx;

pub use control::*;
pub use filter::*;
pub use log::*;
pub use rx::*;
pub use tx::*;

use crate::layout::{self, WordLayout};

/// Every word of the register window, in address order.
pub const WORDS: &[WordLayout] = &[
    DEVICE_ID_VERSION,
    MODE_COMMAND_STATUS_SETTINGS,
    INT_INT_ENA,
    BTR_BTR_FD,
    ALC_SJW_BRP_BRP_FD,
    EWL_ERP_FAULT_STATE,
    RXC_TXC,
    ERR_NORM_ERR_FD,
    CTR_PRES,
    FILTER_A_MASK,
    FILTER_A_VAL,
    FILTER_B_MASK,
    FILTER_B_VAL,
    FILTER_C_MASK,
    FILTER_C_VAL,
    FILTER_RAN_LOW,
    FILTER_RAN_HIGH,
    FILTER_CONTROL_FILTER_STATUS,
    RX_STATUS_RX_MC_RX_MF,
    RX_BUFF_SIZE_RX_WPP_RX_RPP,
    RX_DATA,
    TRV_DELAY,
    TX_STATUS,
    TX_COMMAND_TX_SETTINGS,
    TX_PRIORITY,
    ERR_CAPT,
    RX_COUNTER,
    TX_COUNTER,
    LOG_TRIG_CONFIG,
    LOG_CAPT_CONFIG,
    LOG_STATUS_LOG_WPP_LOG_RPP,
    LOG_COMMAND,
    LOG_CAPT_EVENT_1,
    LOG_CAPT_EVENT_2,
    DEBUG_REGISTER,
    YOLO_REG,
    TX_DATA_1,
    TX_DATA_2,
    TX_DATA_3,
    TX_DATA_4,
    TX_DATA_5,
    TX_DATA_6,
    TX_DATA_7,
    TX_DATA_8,
    TX_DATA_9,
    TX_DATA_10,
    TX_DATA_11,
    TX_DATA_12,
    TX_DATA_13,
    TX_DATA_14,
    TX_DATA_15,
    TX_DATA_16,
    TX_DATA_17,
    TX_DATA_18,
    TX_DATA_19,
    TX_DATA_20,
];

const _: () = layout::assert_valid(WORDS);
