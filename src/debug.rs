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

//! Debug-print helpers for `--dump`, outside of `lc3`'s public API.
//!
//! Borrows a running or halted [`Machine`] read-only and writes the same
//! binary/hex/decimal rendering the original `vm_debug.c` used, minus the
//! `FILE *` parameter: everything here writes to `stderr` so it never
//! interleaves with the guest program's own standard-output I/O.

use lc3::{IoDevice, Machine, Reg};

/// Print `value` as sixteen bits, space-separated every four digits.
fn write_binary(out: &mut impl std::io::Write, value: u16) {
    for i in (0..16).rev() {
        if (i + 1) % 4 == 0 && i != 15 {
            let _ = write!(out, " ");
        }
        let _ = write!(out, "{}", (value >> i) & 1);
    }
}

/// Dump every non-zero word of `machine`'s memory as `mem[addr|0xADDR]=<binary>`.
pub fn dump_memory_nonzero<IO: IoDevice>(machine: &Machine<IO>) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    for addr in 0u32..=0xFFFF {
        let addr = addr as u16;
        let word = machine.memory.read(addr);
        if word != 0 {
            let _ = write!(out, "mem[{addr}|0x{addr:04x}]=");
            write_binary(&mut out, word);
            let _ = writeln!(out);
        }
    }
}

/// Dump `R0`..`R7` plus `PC` as `reg[n]=0xXXXX`.
pub fn dump_registers<IO: IoDevice>(machine: &Machine<IO>) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    for (i, reg) in [
        Reg::R0,
        Reg::R1,
        Reg::R2,
        Reg::R3,
        Reg::R4,
        Reg::R5,
        Reg::R6,
        Reg::R7,
    ]
    .into_iter()
    .enumerate()
    {
        let _ = writeln!(out, "reg[{i}]=0x{:04x}", machine.registers[reg]);
    }
    let _ = writeln!(out, "pc=0x{:04x}", machine.registers.pc);
}
