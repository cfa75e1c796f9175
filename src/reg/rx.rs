//! Receive buffer words

use crate::catalog::RegisterAddress as Reg;
use crate::layout::{FieldSpec as F, WordLayout};

/// RX_STATUS / RX_MC / RX_MF
pub const RX_STATUS_RX_MC_RX_MF: WordLayout = WordLayout::new(
    Reg::RX_STATUS,
    &[
        F::ro("rx_empty", 0, 1),
        F::ro("rx_full", 1, 1),
        F::ro("rx_mc_value", 8, 8),
        F::ro("rx_mf_value", 16, 8),
    ],
);

/// RX_BUFF_SIZE / RX_WPP / RX_RPP
pub const RX_BUFF_SIZE_RX_WPP_RX_RPP: WordLayout = WordLayout::new(
    Reg::RX_BUFF_SIZE,
    &[
        F::ro("rx_buff_size_value", 0, 8),
        F::ro("rx_wpp_value", 8, 8),
        F::ro("rx_rpp_val", 16, 8),
    ],
);

/// RX_DATA
///
/// Every read pops one word of the oldest frame in the RX buffer.
pub const RX_DATA: WordLayout = WordLayout::new(Reg::RX_DATA, &[F::ro("rx_data", 0, 32)]);

/// TRV_DELAY, measured transceiver loop delay
pub const TRV_DELAY: WordLayout =
    WordLayout::new(Reg::TRV_DELAY, &[F::ro("trv_delay_value", 0, 16)]);

/// RX_COUNTER
pub const RX_COUNTER: WordLayout =
    WordLayout::new(Reg::RX_COUNTER, &[F::ro("rx_counter_val", 0, 32)]);
