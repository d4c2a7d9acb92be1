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

/// [`TRAP`][`crate::OpCode::Trap`] instruction vectors; bits \[7:0\] of an
/// instruction word, offset by `0x20` to index the 8-slot trap table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TrapCode {
    /// Read a single character from the keyboard. The character is not
    /// echoed onto the console. Its ASCII code is copied into `R0`; the
    /// high eight bits of `R0` are cleared.
    Getc = 0x20,
    /// Write the character in `R0` \[7:0\] to the console display.
    Out = 0x21,
    /// Write a string of ASCII characters to the console, one character per
    /// memory location, starting at the address in `R0`. Terminates at the
    /// first `0x0000` word.
    Puts = 0x22,
    /// Print a prompt, read a single character, echo it, and copy its ASCII
    /// code into `R0`.
    In = 0x23,
    /// Packed two-characters-per-word console output. Out of scope for this
    /// core; decodes but executes as a no-op.
    PutSp = 0x24,
    /// Halt execution.
    Halt = 0x25,
    /// Read a decimal unsigned 16-bit integer from standard input into `R0`.
    InU16 = 0x26,
    /// Write `R0` to standard output as a decimal unsigned 16-bit integer
    /// followed by a newline.
    OutU16 = 0x27,
}

impl TrapCode {
    /// [`TrapCode`] from bits \[7:0\] of a 16-bit value, or `None` for a
    /// vector outside `0x20..=0x27`: unmapped vectors are out of contract
    /// and must be handled without an unchecked index.
    pub const fn from_u16(value: u16) -> Option<TrapCode> {
        match value & 0xFF {
            0x20 => Some(TrapCode::Getc),
            0x21 => Some(TrapCode::Out),
            0x22 => Some(TrapCode::Puts),
            0x23 => Some(TrapCode::In),
            0x24 => Some(TrapCode::PutSp),
            0x25 => Some(TrapCode::Halt),
            0x26 => Some(TrapCode::InU16),
            0x27 => Some(TrapCode::OutU16),
            _ => None,
        }
    }
}
