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

/// Instruction opcodes in LC-3; bits \[15:12\] of an instruction word.
///
/// The discriminants below are the binary contract images are encoded
/// against and must not be reordered.
///
/// - Arithmetics: [`OpCode::Add`], [`OpCode::And`], [`OpCode::Not`]
/// - Control flow: [`OpCode::Br`], [`OpCode::Jmp`], [`OpCode::Jsr`], [`OpCode::Rti`]
/// - Load data: [`OpCode::Ld`], [`OpCode::Ldi`], [`OpCode::Ldr`], [`OpCode::Lea`]
/// - Store data: [`OpCode::St`], [`OpCode::Str`], [`OpCode::Sti`]
/// - Input/Output: [`OpCode::Trap`]
/// - Reserved: [`OpCode::Res`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// Conditional Branch.
    Br = 0,
    /// Addition.
    Add = 1,
    /// Load.
    Ld = 2,
    /// Store.
    St = 3,
    /// Jump to subroutine.
    #[doc(alias = "JSRR")]
    Jsr = 4,
    /// Bitwise Logical AND.
    And = 5,
    /// Load Base+Offset.
    Ldr = 6,
    /// Store Base+Offset.
    Str = 7,
    /// Return from Interrupt. Decoded but executes as a no-op.
    Rti = 8,
    /// Bitwise Complement.
    Not = 9,
    /// Load Indirect.
    Ldi = 10,
    /// Store Indirect.
    Sti = 11,
    /// Jump, or Return from Subroutine.
    #[doc(alias = "RET")]
    Jmp = 12,
    /// Reserved. Decoded but executes as a no-op.
    Res = 13,
    /// Load Effective Address.
    Lea = 14,
    /// System Call.
    Trap = 15,
}

impl OpCode {
    /// Decode the 4-bit opcode field. Total over all 16 values; never fails.
    pub const fn from_u16(value: u16) -> OpCode {
        match value & 0xF {
            0 => OpCode::Br,
            1 => OpCode::Add,
            2 => OpCode::Ld,
            3 => OpCode::St,
            4 => OpCode::Jsr,
            5 => OpCode::And,
            6 => OpCode::Ldr,
            7 => OpCode::Str,
            8 => OpCode::Rti,
            9 => OpCode::Not,
            10 => OpCode::Ldi,
            11 => OpCode::Sti,
            12 => OpCode::Jmp,
            13 => OpCode::Res,
            14 => OpCode::Lea,
            _ => OpCode::Trap,
        }
    }
}
