#![no_std]
#![warn(missing_docs)]

//! `ctucanfd-core` provides the thin integration layer between the platform
//! independent [`ctucanfd`] register core and whatever actually moves 32-bit
//! words to and from the controller (a memory mapping, a device file, a
//! simulator, a test double).
//!
//! Traits from this crate are implemented by integrators, not by application
//! developers. Integrators are responsible for soundness of their
//! implementations and for conforming to the safety prerequisites below.
//!
//! [`ctucanfd`]: <https://docs.rs/crate/ctucanfd/>

/// Trait representing CTU CAN FD controller identity
///
/// Types implementing this trait are expected to be marker types identifying
/// a specific controller instance on the platform (there may be more than
/// one). It only conveys *where* the register window is located, not that it
/// can be accessed.
///
/// # Safety
/// `CanId::ADDRESS` points to the start of the register window of a CTU CAN
/// FD controller, at least 0x150 bytes long and 4-byte aligned.
///
/// # Examples
/// ```no_run
/// use ctucanfd_core::CanId;
///
/// pub enum Can0 {}
///
/// unsafe impl CanId for Can0 {
///     const ADDRESS: *const () = 0x43C3_0000 as *const _;
/// }
/// ```
pub unsafe trait CanId {
    /// Static address of the register window of the controller
    const ADDRESS: *const ();
}

/// Word-granular access to a controller register window
///
/// This is the seam between register interpretation and the transport. The
/// register core never touches hardware itself; it hands word-aligned byte
/// offsets and raw 32-bit values to an implementation of this trait.
///
/// Implementations decide on timeout and retry policy and are responsible for
/// serializing accesses to the same word if they are shared between
/// contexts. The register core never retries a failed access.
///
/// # Examples
/// ```
/// use ctucanfd_core::RegisterBus;
///
/// struct Shadow([u32; 84]);
///
/// impl RegisterBus for Shadow {
///     type Error = ();
///
///     fn read(&mut self, offset: u16) -> Result<u32, ()> {
///         self.0.get(usize::from(offset / 4)).copied().ok_or(())
///     }
///
///     fn write(&mut self, offset: u16, value: u32) -> Result<(), ()> {
///         let word = self.0.get_mut(usize::from(offset / 4)).ok_or(())?;
///         *word = value;
///         Ok(())
///     }
/// }
/// ```
pub trait RegisterBus {
    /// Failure reported by the transport
    type Error;

    /// Reads the 32-bit word at `offset`.
    ///
    /// `offset` is a byte offset into the register window and is always a
    /// multiple of 4 when called by the register core.
    fn read(&mut self, offset: u16) -> Result<u32, Self::Error>;

    /// Writes the 32-bit word at `offset`.
    ///
    /// `offset` is a byte offset into the register window and is always a
    /// multiple of 4 when called by the register core.
    fn write(&mut self, offset: u16, value: u32) -> Result<(), Self::Error>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    type Error = B::Error;

    fn read(&mut self, offset: u16) -> Result<u32, Self::Error> {
        (**self).read(offset)
    }

    fn write(&mut self, offset: u16, value: u32) -> Result<(), Self::Error> {
        (**self).write(offset, value)
    }
}
