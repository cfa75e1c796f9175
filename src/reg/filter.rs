//! Acceptance filter words

use crate::catalog::RegisterAddress as Reg;
use crate::layout::{FieldSpec as F, WordLayout};

/// FILTER_A_MASK, 29-bit identifier mask
pub const FILTER_A_MASK: WordLayout =
    WordLayout::new(Reg::FILTER_A_MASK, &[F::rw("bit_mask_a_val", 0, 29)]);

/// FILTER_A_VAL
pub const FILTER_A_VAL: WordLayout =
    WordLayout::new(Reg::FILTER_A_VAL, &[F::rw("bit_val_a_val", 0, 29)]);

/// FILTER_B_MASK
pub const FILTER_B_MASK: WordLayout =
    WordLayout::new(Reg::FILTER_B_MASK, &[F::rw("bit_mask_b_val", 0, 29)]);

/// FILTER_B_VAL
pub const FILTER_B_VAL: WordLayout =
    WordLayout::new(Reg::FILTER_B_VAL, &[F::rw("bit_val_b_val", 0, 29)]);

/// FILTER_C_MASK
pub const FILTER_C_MASK: WordLayout =
    WordLayout::new(Reg::FILTER_C_MASK, &[F::rw("bit_mask_c_val", 0, 29)]);

/// FILTER_C_VAL
pub const FILTER_C_VAL: WordLayout =
    WordLayout::new(Reg::FILTER_C_VAL, &[F::rw("bit_val_c_val", 0, 29)]);

/// FILTER_RAN_LOW, lowest identifier accepted by the range filter
pub const FILTER_RAN_LOW: WordLayout =
    WordLayout::new(Reg::FILTER_RAN_LOW, &[F::rw("bit_ran_low_val", 0, 29)]);

/// FILTER_RAN_HIGH, highest identifier accepted by the range filter
pub const FILTER_RAN_HIGH: WordLayout =
    WordLayout::new(Reg::FILTER_RAN_HIGH, &[F::rw("bit_ran_high_val", 0, 29)]);

/// FILTER_CONTROL / FILTER_STATUS
///
/// For each filter (A, B, C, range) four enables: base-format CAN, extended
/// CAN, base-format FD, extended FD. FILTER_STATUS reports which filters the
/// synthesized core actually contains.
pub const FILTER_CONTROL_FILTER_STATUS: WordLayout = WordLayout::new(
    Reg::FILTER_CONTROL,
    &[
        F::rw("fanb", 0, 1),
        F::rw("fane", 1, 1),
        F::rw("fafb", 2, 1),
        F::rw("fafe", 3, 1),
        F::rw("fbnb", 4, 1),
        F::rw("fbne", 5, 1),
        F::rw("fbfb", 6, 1),
        F::rw("fbfe", 7, 1),
        F::rw("fcnb", 8, 1),
        F::rw("fcne", 9, 1),
        F::rw("fcfb", 10, 1),
        F::rw("fcfe", 11, 1),
        F::rw("frnb", 12, 1),
        F::rw("frne", 13, 1),
        F::rw("frfb", 14, 1),
        F::rw("frfe", 15, 1),
        F::ro("sfa", 16, 1),
        F::ro("sfb", 17, 1),
        F::ro("sfc", 18, 1),
        F::ro("sfr", 19, 1),
    ],
);
