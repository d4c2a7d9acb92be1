//
// lc3-vm, a virtual machine for the LC-3 (Little Computer 3) architecture.
// Copyright (C) 2024  Fares A. Bakhit
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

//! Error type for [`crate::Machine`] operations.
//!
//! The only failure that escapes this core to a caller is an I/O error
//! from the host device; every other guest-visible condition (unmapped
//! trap, reserved opcode, arithmetic/memory wraparound) is absorbed by
//! the defined semantics and never surfaces as an `Err`.

#[cfg(feature = "std")]
use thiserror::Error;

/// Error type for [`crate::Machine`] functions, parameterized over the
/// [`crate::IoDevice`] implementation's own error type.
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum Error<IO> {
    /// A host I/O device (stdin/stdout or an [`crate::ImageFile`]) failed.
    #[error(transparent)]
    Io(IO),
}

#[cfg(not(feature = "std"))]
#[derive(Debug)]
pub enum Error<IO> {
    /// A host I/O device (stdin/stdout or an [`crate::ImageFile`]) failed.
    Io(IO),
}

impl<IO> From<IO> for Error<IO> {
    fn from(value: IO) -> Self {
        Error::Io(value)
    }
}
