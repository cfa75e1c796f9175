//! Event logger and debug words

use crate::catalog::RegisterAddress as Reg;
use crate::layout::{FieldSpec as F, WordLayout};

/// LOG_TRIG_CONFIG, events that start the logger
pub const LOG_TRIG_CONFIG: WordLayout = WordLayout::new(
    Reg::LOG_TRIG_CONFIG,
    &[
        F::rw("t_sof", 0, 1),
        F::rw("t_arbl", 1, 1),
        F::rw("t_rev", 2, 1),
        F::rw("t_trv", 3, 1),
        F::rw("t_ovl", 4, 1),
        F::rw("t_err", 5, 1),
        F::rw("t_brs", 6, 1),
        F::rw("t_usrw", 7, 1),
        F::rw("t_arbs", 8, 1),
        F::rw("t_ctrs", 9, 1),
        F::rw("t_dats", 10, 1),
        F::rw("t_crcs", 11, 1),
        F::rw("t_ackr", 12, 1),
        F::rw("t_acknr", 13, 1),
        F::rw("t_ewlr", 14, 1),
        F::rw("t_erpc", 15, 1),
        F::rw("t_trs", 16, 1),
        F::rw("t_res", 17, 1),
    ],
);

/// LOG_CAPT_CONFIG, events recorded while the logger runs
pub const LOG_CAPT_CONFIG: WordLayout = WordLayout::new(
    Reg::LOG_CAPT_CONFIG,
    &[
        F::rw("c_sof", 0, 1),
        F::rw("c_arbl", 1, 1),
        F::rw("c_rev", 2, 1),
        F::rw("c_trv", 3, 1),
        F::rw("c_ovl", 4, 1),
        F::rw("c_err", 5, 1),
        F::rw("c_brs", 6, 1),
        F::rw("c_arbs", 7, 1),
        F::rw("c_ctrs", 8, 1),
        F::rw("c_dats", 9, 1),
        F::rw("c_crcs", 10, 1),
        F::rw("c_ackr", 11, 1),
        F::rw("c_acknr", 12, 1),
        F::rw("c_ewlr", 13, 1),
        F::rw("c_erc", 14, 1),
        F::rw("c_trs", 15, 1),
        F::rw("c_res", 16, 1),
        F::rw("c_syne", 17, 1),
        F::rw("c_stuff", 18, 1),
        F::rw("c_destuff", 19, 1),
        F::rw("c_ovr", 20, 1),
    ],
);

/// LOG_STATUS / LOG_WPP / LOG_RPP
pub const LOG_STATUS_LOG_WPP_LOG_RPP: WordLayout = WordLayout::new(
    Reg::LOG_STATUS,
    &[
        F::ro("log_cfg", 0, 1),
        F::ro("log_rdy", 1, 1),
        F::ro("log_run", 2, 1),
        F::ro("log_exist", 7, 1),
        F::ro("log_size", 8, 8),
        F::ro("log_wpp_val", 16, 8),
        F::ro("log_rpp_val", 24, 8),
    ],
);

/// LOG_COMMAND
pub const LOG_COMMAND: WordLayout = WordLayout::new(
    Reg::LOG_COMMAND,
    &[
        F::strobe("log_str", 0),
        F::strobe("log_abt", 1),
        F::strobe("log_up", 2),
        F::strobe("log_down", 3),
    ],
);

/// LOG_CAPT_EVENT_1
pub const LOG_CAPT_EVENT_1: WordLayout = WordLayout::new(
    Reg::LOG_CAPT_EVENT_1,
    &[F::ro("event_time_stamp_47_to_16", 0, 32)],
);

/// LOG_CAPT_EVENT_2
pub const LOG_CAPT_EVENT_2: WordLayout = WordLayout::new(
    Reg::LOG_CAPT_EVENT_2,
    &[
        F::ro("event_type", 0, 8),
        F::ro("event_details", 8, 8),
        F::ro("event_ts_15_0", 16, 16),
    ],
);

/// DEBUG_REGISTER
pub const DEBUG_REGISTER: WordLayout = WordLayout::new(
    Reg::DEBUG_REGISTER,
    &[
        F::ro("stuff_count", 0, 3),
        F::ro("destuff_count", 3, 3),
        F::ro("pc_arb", 6, 1),
        F::ro("pc_con", 7, 1),
        F::ro("pc_dat", 8, 1),
        F::ro("pc_crc", 9, 1),
        F::ro("pc_eof", 10, 1),
        F::ro("pc_ovr", 11, 1),
        F::ro("pc_int", 12, 1),
    ],
);

/// YOLO_REG
pub const YOLO_REG: WordLayout = WordLayout::new(Reg::YOLO_REG, &[F::ro("yolo_val", 0, 32)]);
