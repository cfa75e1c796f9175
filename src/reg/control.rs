//! Identification, mode, interrupt, bit timing and fault confinement words

use crate::catalog::RegisterAddress as Reg;
use crate::layout::{FieldSpec as F, WordLayout};

/// DEVICE_ID / VERSION
pub const DEVICE_ID_VERSION: WordLayout = WordLayout::new(
    Reg::DEVICE_ID,
    &[
        // DEVICE_ID, reads 0xCAFD
        F::ro("device_id", 0, 16),
        // VERSION
        F::ro("ver_minor", 16, 8),
        F::ro("ver_major", 24, 8),
    ],
);

/// MODE / COMMAND / STATUS / SETTINGS
///
/// Four byte-wide registers in one word. Writing this word writes all four:
/// STATUS ignores the write, COMMAND strobes fire for every 1 written.
pub const MODE_COMMAND_STATUS_SETTINGS: WordLayout = WordLayout::new(
    Reg::MODE,
    &[
        // MODE
        F::strobe("rst", 0),
        F::rw("lom", 1, 1),
        F::rw("stm", 2, 1),
        F::rw("afm", 3, 1),
        F::rw("fde", 4, 1),
        F::rw("rtr_pref", 5, 1),
        F::rw("tsm", 6, 1),
        F::rw("acf", 7, 1),
        // COMMAND, bit 8 reserved
        F::strobe("at", 9),
        F::strobe("rrb", 10),
        F::strobe("cdo", 11),
        // STATUS, bits 12..16 reserved
        F::ro("rbs", 16, 1),
        F::ro("dos", 17, 1),
        F::ro("tbs", 18, 1),
        F::ro("et", 19, 1),
        F::ro("rs", 20, 1),
        F::ro("ts", 21, 1),
        F::ro("es", 22, 1),
        F::ro("bs", 23, 1),
        // SETTINGS
        F::rw("rtrle", 24, 1),
        F::rw("rtr_th", 25, 4),
        F::rw("int_loop", 29, 1),
        F::rw("ena", 30, 1),
        F::rw("fd_type", 31, 1),
    ],
);

/// INT / INT_ENA
///
/// Source bit `n` of INT is enabled by bit `16 + n` of INT_ENA. Bit 4 of
/// both halves is reserved.
pub const INT_INT_ENA: WordLayout = WordLayout::new(
    Reg::INT,
    &[
        F::ro("ri", 0, 1),
        F::ro("ti", 1, 1),
        F::ro("ei", 2, 1),
        F::ro("doi", 3, 1),
        F::ro("epi", 5, 1),
        F::ro("ali", 6, 1),
        F::ro("bei", 7, 1),
        F::ro("lfi", 8, 1),
        F::ro("rfi", 9, 1),
        F::ro("bsi", 10, 1),
        F::rw("rie", 16, 1),
        F::rw("tie", 17, 1),
        F::rw("eie", 18, 1),
        F::rw("doie", 19, 1),
        F::rw("epie", 21, 1),
        F::rw("alie", 22, 1),
        F::rw("beie", 23, 1),
        F::rw("lfie", 24, 1),
        F::rw("rfie", 25, 1),
        F::rw("bsie", 26, 1),
    ],
);

/// BTR / BTR_FD
pub const BTR_BTR_FD: WordLayout = WordLayout::new(
    Reg::BTR,
    &[
        F::rw("prop", 0, 6),
        F::rw("ph1", 6, 5),
        F::rw("ph2", 11, 5),
        F::rw("prop_fd", 16, 6),
        F::rw("ph1_fd", 22, 4),
        F::rw("ph2_fd", 27, 4),
    ],
);

/// ALC / SJW / BRP / BRP_FD
pub const ALC_SJW_BRP_BRP_FD: WordLayout = WordLayout::new(
    Reg::ALC,
    &[
        F::ro("alc_val", 0, 5),
        F::rw("sjw", 8, 4),
        F::rw("sjw_fd", 12, 4),
        F::rw("brp", 16, 6),
        F::rw("brp_fd", 24, 6),
    ],
);

/// EWL / ERP / FAULT_STATE
pub const EWL_ERP_FAULT_STATE: WordLayout = WordLayout::new(
    Reg::EWL,
    &[
        F::rw("ewl_limit", 0, 8),
        F::rw("erp_limit", 8, 8),
        // Error active / error passive / bus off
        F::ro("era", 16, 1),
        F::ro("erp", 17, 1),
        F::ro("bof", 18, 1),
    ],
);

/// RXC / TXC
pub const RXC_TXC: WordLayout = WordLayout::new(
    Reg::RXC,
    &[F::ro("rxc_val", 0, 16), F::ro("txc_val", 16, 16)],
);

/// ERR_NORM / ERR_FD
pub const ERR_NORM_ERR_FD: WordLayout = WordLayout::new(
    Reg::ERR_NORM,
    &[F::ro("err_norm_val", 0, 16), F::ro("err_fd_val", 16, 16)],
);

/// CTR_PRES
///
/// `ctpv` is loaded into every counter whose strobe is written in the same
/// access.
pub const CTR_PRES: WordLayout = WordLayout::new(
    Reg::CTR_PRES,
    &[
        F::wo("ctpv", 0, 9),
        F::strobe("ptx", 9),
        F::strobe("prx", 10),
        F::strobe("enorm", 11),
        F::strobe("efd", 12),
    ],
);
