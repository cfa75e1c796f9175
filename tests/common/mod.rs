//! Common test utilities and mock implementations

pub mod mock_bus;

pub use mock_bus::{MockBus, MockError, Operation};

use ctucanfd::config::CodecConfig;
use ctucanfd::Registers;

/// Registers over a fresh mock bus, plus a handle to inspect the bus
pub fn create_mock_registers() -> (Registers<MockBus>, MockBus) {
    create_mock_registers_with(CodecConfig::default())
}

/// Same as [`create_mock_registers`] with a custom codec configuration
pub fn create_mock_registers_with(config: CodecConfig) -> (Registers<MockBus>, MockBus) {
    let bus = MockBus::new();
    let regs = Registers::new(bus.clone(), config).unwrap();
    (regs, bus)
}
