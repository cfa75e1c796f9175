//! Transmit buffer words

use crate::catalog::RegisterAddress as Reg;
use crate::layout::{FieldSpec as F, WordLayout};

/// TX_STATUS, state of the two TX buffers
pub const TX_STATUS: WordLayout = WordLayout::new(
    Reg::TX_STATUS,
    &[F::ro("tx1s", 0, 4), F::ro("tx2s", 4, 4)],
);

/// TX_COMMAND / TX_SETTINGS
///
/// `txce`, `txcr` and `txca` (set empty, set ready, set abort) apply to
/// every buffer whose `txi*` bit is written as 1 in the same access.
pub const TX_COMMAND_TX_SETTINGS: WordLayout = WordLayout::new(
    Reg::TX_COMMAND,
    &[
        F::strobe("txce", 0),
        F::strobe("txcr", 1),
        F::strobe("txca", 2),
        F::wo("txi1", 8, 1),
        F::wo("txi2", 9, 1),
        F::rw("bdir", 18, 1),
        F::rw("frsw", 19, 1),
    ],
);

/// TX_PRIORITY
pub const TX_PRIORITY: WordLayout = WordLayout::new(
    Reg::TX_PRIORITY,
    &[F::rw("txt1p", 0, 3), F::rw("txt2p", 4, 3)],
);

/// ERR_CAPT, position and type of the last bus error
pub const ERR_CAPT: WordLayout = WordLayout::new(
    Reg::ERR_CAPT,
    &[F::ro("err_pos", 0, 5), F::ro("err_type", 5, 3)],
);

/// TX_COUNTER
pub const TX_COUNTER: WordLayout =
    WordLayout::new(Reg::TX_COUNTER, &[F::ro("tx_counter_val", 0, 32)]);

macro_rules! tx_data {
    ($($reg:ident: $field:literal),* $(,)?) => {
        $(
            #[doc = concat!(stringify!($reg), ", frame buffer word")]
            pub const $reg: WordLayout = WordLayout::new(Reg::$reg, &[F::wo($field, 0, 32)]);
        )*
    };
}

tx_data! {
    TX_DATA_1: "tx_data_1",
    TX_DATA_2: "tx_data_2",
    TX_DATA_3: "tx_data_3",
    TX_DATA_4: "tx_data_4",
    TX_DATA_5: "tx_data_5",
    TX_DATA_6: "tx_data_6",
    TX_DATA_7: "tx_data_7",
    TX_DATA_8: "tx_data_8",
    TX_DATA_9: "tx_data_9",
    TX_DATA_10: "tx_data_10",
    TX_DATA_11: "tx_data_11",
    TX_DATA_12: "tx_data_12",
    TX_DATA_13: "tx_data_13",
    TX_DATA_14: "tx_data_14",
    TX_DATA_15: "tx_data_15",
    TX_DATA_16: "tx_data_16",
    TX_DATA_17: "tx_data_17",
    TX_DATA_18: "tx_data_18",
    TX_DATA_19: "tx_data_19",
    TX_DATA_20: "tx_data_20",
}
