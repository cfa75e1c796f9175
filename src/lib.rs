#![no_std]
#![warn(missing_docs)]
//! # CTU CAN FD
//!
//! ## Overview
//! This crate describes the register window of the CTU CAN FD controller and
//! provides checked access to it.
//!
//! It provides the following features:
//!
//! - the complete address map with per-register byte spans, see
//!   [`catalog`]
//! - bit-exact field layouts of every register word, validated at compile
//!   time, see [`reg`] and [`layout`]
//! - a codec turning raw 32-bit words into named field values and back,
//!   enforcing read-only fields, strobe values and field widths, see
//!   [`codec`]
//! - both bit orderings of the register words, see [`config`]
//! - typed read / write / modify accessors over any [`RegisterBus`], see
//!   [`Registers`]
//!
//! Frame transmission, reception, bit timing computation and filter logic
//! are not part of this crate. They are meant to be built on top of
//! [`Registers`].
//!
//! ## Register words
//!
//! The controller groups up to four registers into one 32-bit word. MODE,
//! COMMAND, STATUS and SETTINGS for example all live in the word at 0x4.
//! Every access of this crate transfers the whole word, so writing COMMAND
//! also writes MODE and SETTINGS. [`Registers::modify`] keeps the fields it
//! is not told to change.
//!
//! ## Transport
//!
//! The crate never touches hardware itself. Words are moved by an
//! implementation of [`RegisterBus`] from [`ctucanfd_core`]. Two are
//! provided:
//!
//! - [`mmio::Mmio`] for a controller mapped at a fixed address
//!   ([`CanId`])
//! - [`mmio::Window`] for a window borrowed as a slice of volatile words
//!
//! ## Usage example
//!
//! ```no_run
//! use ctucanfd::catalog::RegisterAddress as Reg;
//! use ctucanfd::config::CodecConfig;
//! use ctucanfd::interrupt::Interrupt;
//! use ctucanfd::mmio::Mmio;
//! use ctucanfd::Registers;
//! # use ctucanfd::core::CanId;
//! # pub enum Can0 {}
//! # unsafe impl CanId for Can0 {
//! #     const ADDRESS: *const () = 0x43C3_0000 as *const _;
//! # }
//!
//! // Safety: the register window of `Can0` is not used anywhere else.
//! let bus = unsafe { Mmio::<Can0>::new() };
//! let mut regs = Registers::new(bus, CodecConfig::target()).unwrap();
//!
//! let id = regs.read(Reg::DEVICE_ID).unwrap();
//! assert_eq!(id.get("device_id"), Some(0xCAFD));
//!
//! regs.reset().unwrap();
//! regs.modify(Reg::BTR, |_, w| w.set("prop", 5)?.set("ph1", 3)?.set("ph2", 3))
//!     .unwrap();
//! regs.set_interrupt_enable(
//!     [Interrupt::FrameReceived, Interrupt::BusError]
//!         .into_iter()
//!         .collect(),
//! )
//! .unwrap();
//! regs.modify(Reg::SETTINGS, |_, w| w.set_bit("ena", true))
//!     .unwrap();
//! ```
//!
//! [`RegisterBus`]: ctucanfd_core::RegisterBus
//! [`CanId`]: ctucanfd_core::CanId

pub mod catalog;
pub mod codec;
pub mod config;
pub mod interrupt;
pub mod layout;
pub mod mmio;
pub mod prelude;
pub mod reg;
pub mod register;

pub use ctucanfd_core as core;

pub use register::{Error, Registers};
