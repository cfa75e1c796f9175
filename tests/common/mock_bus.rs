//! Mock register bus for testing the register accessors

use ctucanfd::core::RegisterBus;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Records operations performed on the mock bus
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Word read
    Read {
        /// Byte offset of the word
        offset: u16,
        /// Value that was returned
        value: u32,
    },
    /// Word write
    Write {
        /// Byte offset of the word
        offset: u16,
        /// Value that was written
        value: u32,
    },
}

#[derive(Debug, Default)]
struct MockState {
    /// Simulated words, keyed by byte offset
    words: HashMap<u16, u32>,

    /// Bits that read back as 0 after being written, per word
    self_clearing: HashMap<u16, u32>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
}

/// Mock bus; clones share the same state
#[derive(Clone, Default)]
pub struct MockBus {
    state: Rc<RefCell<MockState>>,
}

impl MockBus {
    /// Create a new mock bus with the identification word of the controller
    pub fn new() -> Self {
        let bus = Self::default();
        bus.set_word(0x0, 0x0203_CAFD);
        // MODE.rst and the COMMAND strobes
        bus.set_self_clearing(0x4, 0x0000_0e01);
        bus
    }

    /// Set a word value without recording an operation
    pub fn set_word(&self, offset: u16, value: u32) {
        self.state.borrow_mut().words.insert(offset, value);
    }

    /// Get a word value without recording an operation
    pub fn word(&self, offset: u16) -> u32 {
        self.state
            .borrow()
            .words
            .get(&offset)
            .copied()
            .unwrap_or(0)
    }

    /// Mark bits of a word as self-clearing
    pub fn set_self_clearing(&self, offset: u16, mask: u32) {
        self.state.borrow_mut().self_clearing.insert(offset, mask);
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Values written, in order
    pub fn writes(&self) -> Vec<(u16, u32)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Write { offset, value } => Some((offset, value)),
                Operation::Read { .. } => None,
            })
            .collect()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }
}

/// Mock error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
    /// Access that is not word aligned
    Unaligned(u16),
}

impl RegisterBus for MockBus {
    type Error = MockError;

    fn read(&mut self, offset: u16) -> Result<u32, Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }
        if offset % 4 != 0 {
            return Err(MockError::Unaligned(offset));
        }
        let value = state.words.get(&offset).copied().unwrap_or(0);
        state.operations.push(Operation::Read { offset, value });
        Ok(value)
    }

    fn write(&mut self, offset: u16, value: u32) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }
        if offset % 4 != 0 {
            return Err(MockError::Unaligned(offset));
        }
        state.operations.push(Operation::Write { offset, value });
        let clearing = state.self_clearing.get(&offset).copied().unwrap_or(0);
        state.words.insert(offset, value & !clearing);
        Ok(())
    }
}
