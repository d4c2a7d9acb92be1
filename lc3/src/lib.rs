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

//! Fetch-decode-execute core for the [LC-3] (Little Computer 3) architecture.
//! [Specification].
//!
//! This crate is the register machine itself: the 16-bit word, instruction
//! decoder, register file and 64Ki-word memory, the sixteen opcode
//! handlers, and the eight TRAP service routines. The command-line entry
//! point, the image-builder assistant program and debug-print helpers are
//! external collaborators that live in the `lc3vm` binary crate.
//!
//! [LC-3]: https://en.wikipedia.org/wiki/Little_Computer_3
//! [Specification]: https://www.jmeiners.com/lc3-vm/supplies/lc3-isa.pdf

#![cfg_attr(not(feature = "std"), no_std)]

mod condcodes;
mod decode;
mod error;
mod image;
mod io;
mod machine;
mod memory;
mod opcode;
mod registers;
#[cfg(feature = "termios")]
mod termios;
mod trapcode;

pub use condcodes::CondCodes;
pub(crate) use decode::InstructionDecode;
pub use error::Error;
pub use image::ImageFile;
pub use io::IoDevice;
pub use machine::Machine;
pub use memory::Memory;
pub use opcode::OpCode;
pub use registers::{Reg, Registers};
#[cfg(feature = "termios")]
pub use termios::Termios;
pub use trapcode::TrapCode;
