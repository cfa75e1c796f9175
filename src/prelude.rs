//! Traits needed to drive [`crate::Registers`] and its buses
pub use crate::core::RegisterBus as _;
