//! Register buses over memory
//!
//! [`Mmio`] accesses the register window of a controller mapped at a fixed
//! address, [`Window`] accesses a window lent out as a slice of cells, as
//! handed out by a UIO mapping or a simulator.

use core::fmt;
use core::marker::PhantomData;
use ctucanfd_core::{CanId, RegisterBus};
use vcell::VolatileCell;

use crate::catalog::WINDOW_END;

/// Memory mapped register window of controller `Id`
pub struct Mmio<Id> {
    _id: PhantomData<Id>,
}

impl<Id: CanId> Mmio<Id> {
    /// # Safety
    /// This type takes ownership of the whole register window of `Id`. Do not
    /// access the window through other means and do not instantiate more than
    /// once per controller.
    pub unsafe fn new() -> Self {
        Self { _id: PhantomData }
    }

    fn cell(&self, offset: u16) -> Result<&VolatileCell<u32>, OutOfBounds> {
        if offset >= WINDOW_END {
            return Err(OutOfBounds(offset));
        }
        // Safety: `CanId::ADDRESS` points to a 4-byte aligned window of at
        // least `WINDOW_END` bytes and `offset` lies inside it.
        Ok(unsafe { &*(Id::ADDRESS as *const VolatileCell<u32>).add(usize::from(offset / 4)) })
    }
}

impl<Id: CanId> RegisterBus for Mmio<Id> {
    type Error = OutOfBounds;

    fn read(&mut self, offset: u16) -> Result<u32, Self::Error> {
        self.cell(offset).map(VolatileCell::get)
    }

    fn write(&mut self, offset: u16, value: u32) -> Result<(), Self::Error> {
        self.cell(offset).map(|cell| cell.set(value))
    }
}

/// Offset lies past the end of the register window
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfBounds(pub u16);

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {:#x} is outside the register window", self.0)
    }
}

/// Register window borrowed as a slice of volatile words
///
/// Word `n` of the slice holds byte offsets `4 * n ..= 4 * n + 3`.
pub struct Window<'a> {
    memory: &'a [VolatileCell<u32>],
}

impl<'a> Window<'a> {
    /// Create an instance
    pub fn new(memory: &'a [VolatileCell<u32>]) -> Self {
        Self { memory }
    }

    fn cell(&self, offset: u16) -> Result<&'a VolatileCell<u32>, OutOfBounds> {
        let memory = self.memory;
        memory
            .get(usize::from(offset / 4))
            .ok_or(OutOfBounds(offset))
    }
}

impl RegisterBus for Window<'_> {
    type Error = OutOfBounds;

    fn read(&mut self, offset: u16) -> Result<u32, Self::Error> {
        self.cell(offset).map(VolatileCell::get)
    }

    fn write(&mut self, offset: u16, value: u32) -> Result<(), Self::Error> {
        self.cell(offset).map(|cell| cell.set(value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn window_maps_offsets_to_words() {
        let memory: [VolatileCell<u32>; 4] = core::array::from_fn(|_| VolatileCell::new(0));
        let mut window = Window::new(&memory);
        window.write(0x8, 0xCAFD).unwrap();
        assert_eq!(memory[2].get(), 0xCAFD);
        assert_eq!(window.read(0x8), Ok(0xCAFD));
        assert_eq!(window.read(0xb), Ok(0xCAFD));
        assert_eq!(window.read(0x0), Ok(0));
    }

    #[test]
    fn window_rejects_offsets_past_the_end() {
        let memory: [VolatileCell<u32>; 4] = core::array::from_fn(|_| VolatileCell::new(0));
        let mut window = Window::new(&memory);
        assert_eq!(window.read(0x10), Err(OutOfBounds(0x10)));
        assert_eq!(window.write(0x14c, 1), Err(OutOfBounds(0x14c)));
    }

    #[test]
    fn mmio_rejects_offsets_past_the_window() {
        // never dereferenced, every access below is rejected
        enum Unmapped {}

        unsafe impl CanId for Unmapped {
            const ADDRESS: *const () = 0x4000_0000 as *const _;
        }

        let mut bus = unsafe { Mmio::<Unmapped>::new() };
        assert_eq!(bus.write(0x200, 0xDEAD_BEEF), Err(OutOfBounds(0x200)));
        assert_eq!(bus.write(WINDOW_END, 1), Err(OutOfBounds(WINDOW_END)));
        assert_eq!(bus.read(0xffff), Err(OutOfBounds(0xffff)));
    }
}
