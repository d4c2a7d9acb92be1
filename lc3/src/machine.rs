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

use crate::Error;
use crate::ImageFile;
use crate::InstructionDecode;
use crate::IoDevice;
use crate::Memory;
use crate::OpCode;
use crate::TrapCode;
use crate::{CondCodes, Reg, Registers};

/// The LC-3 virtual machine: register file, memory, and the `running`
/// flag that drives the execution loop.
///
/// A `Machine` owns its I/O device explicitly rather than reaching for
/// global or memory-mapped state, so more than one instance can coexist
/// in a process.
pub struct Machine<IO: IoDevice> {
    pub registers: Registers,
    pub memory: Memory,
    running: bool,
    io: IO,
}

impl<IO: IoDevice> Machine<IO> {
    /// Initialize a new LC-3 virtual machine with the given [`IoDevice`].
    /// Registers and memory start zeroed, PC at [`Registers::PC_START`],
    /// CC at Zero, `running` true.
    pub const fn new(io: IO) -> Machine<IO> {
        Machine {
            registers: Registers::new(),
            memory: Memory::new(),
            running: true,
            io,
        }
    }

    /// Load an image from an [`ImageFile`] at `0x3000 + offset`.
    pub fn load_image<F: ImageFile>(&mut self, file: &mut F, offset: u16) -> Result<(), F::Error> {
        file.load_image_into(&mut self.memory, offset)
    }

    /// `true` while the machine should keep fetching instructions.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The I/O device this machine was constructed with.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Run from `0x3000 + offset` until a `HALT` trap clears `running`.
    /// No instruction-count limit; may never terminate if the guest
    /// program never executes `HALT`.
    pub fn run_at(&mut self, offset: u16) -> Result<(), Error<IO::Error>> {
        self.running = true;
        self.registers.pc = Registers::PC_START.wrapping_add(offset);
        while self.running {
            self.step()?;
        }
        Ok(())
    }

    /// Run from [`Registers::PC_START`] until `HALT`.
    pub fn run(&mut self) -> Result<(), Error<IO::Error>> {
        self.run_at(0)
    }

    /// Run from `0x3000 + offset`, stopping either at `HALT` or after
    /// `max_steps` instructions, whichever comes first.
    ///
    /// Kept off by default to preserve ordinary semantics; intended for
    /// bounding guest programs under test that may run off the end of
    /// their code into zero memory.
    pub fn run_bounded(&mut self, offset: u16, max_steps: u64) -> Result<(), Error<IO::Error>> {
        self.running = true;
        self.registers.pc = Registers::PC_START.wrapping_add(offset);
        let mut steps = 0u64;
        while self.running && steps < max_steps {
            self.step()?;
            steps += 1;
        }
        Ok(())
    }

    /// Fetch, increment PC, decode, and dispatch exactly one instruction.
    /// The PC increment happens before the handler runs, so every
    /// PC-relative handler below computes against the address of the
    /// *following* instruction.
    pub fn step(&mut self) -> Result<(), Error<IO::Error>> {
        let inst = self.memory.read(self.registers.pc);
        self.registers.pc = self.registers.pc.wrapping_add(1);

        match inst.opcode() {
            OpCode::Add => self.add(inst),
            OpCode::And => self.and(inst),
            OpCode::Not => self.not(inst),
            OpCode::Br => self.br(inst),
            OpCode::Jmp => self.jmp(inst),
            OpCode::Jsr => self.jsr(inst),
            OpCode::Ld => self.ld(inst),
            OpCode::Ldi => self.ldi(inst),
            OpCode::Ldr => self.ldr(inst),
            OpCode::Lea => self.lea(inst),
            OpCode::St => self.st(inst),
            OpCode::Sti => self.sti(inst),
            OpCode::Str => self.str_(inst),
            OpCode::Trap => self.trap(inst)?,
            OpCode::Rti | OpCode::Res => {
                log::debug!("reserved opcode {:?} decoded; executing as a no-op", inst.opcode());
            }
        }

        Ok(())
    }

    fn add(&mut self, inst: u16) {
        let dr = inst.reg1();
        let sr1 = inst.reg2();
        let value = if inst.isbitset(5) {
            self.registers[sr1].wrapping_add(inst.imm5())
        } else {
            self.registers[sr1].wrapping_add(self.registers[inst.reg3()])
        };
        self.registers[dr] = value;
        self.setcc(dr);
    }

    fn and(&mut self, inst: u16) {
        let dr = inst.reg1();
        let sr1 = inst.reg2();
        let value = if inst.isbitset(5) {
            self.registers[sr1] & inst.imm5()
        } else {
            self.registers[sr1] & self.registers[inst.reg3()]
        };
        self.registers[dr] = value;
        self.setcc(dr);
    }

    fn not(&mut self, inst: u16) {
        let dr = inst.reg1();
        let sr = inst.reg2();
        self.registers[dr] = !self.registers[sr];
        self.setcc(dr);
    }

    fn br(&mut self, inst: u16) {
        if self.registers.cc.intersects(&inst.condcodes()) {
            self.registers.pc = self.registers.pc.wrapping_add(inst.imm9());
        }
    }

    fn jmp(&mut self, inst: u16) {
        self.registers.pc = self.registers[inst.reg2()];
    }

    fn jsr(&mut self, inst: u16) {
        self.registers[Reg::R7] = self.registers.pc;
        self.registers.pc = if inst.isbitset(11) {
            self.registers.pc.wrapping_add(inst.imm11())
        } else {
            self.registers[inst.reg2()]
        };
    }

    fn ld(&mut self, inst: u16) {
        let dr = inst.reg1();
        let addr = self.registers.pc.wrapping_add(inst.imm9());
        self.registers[dr] = self.memory.read(addr);
        self.setcc(dr);
    }

    fn ldi(&mut self, inst: u16) {
        let dr = inst.reg1();
        let addr = self.registers.pc.wrapping_add(inst.imm9());
        let addr = self.memory.read(addr);
        self.registers[dr] = self.memory.read(addr);
        self.setcc(dr);
    }

    fn ldr(&mut self, inst: u16) {
        let dr = inst.reg1();
        let addr = self.registers[inst.reg2()].wrapping_add(inst.imm6());
        self.registers[dr] = self.memory.read(addr);
        self.setcc(dr);
    }

    fn lea(&mut self, inst: u16) {
        let dr = inst.reg1();
        self.registers[dr] = self.registers.pc.wrapping_add(inst.imm9());
        self.setcc(dr);
    }

    fn st(&mut self, inst: u16) {
        let addr = self.registers.pc.wrapping_add(inst.imm9());
        self.memory.write(addr, self.registers[inst.reg1()]);
    }

    fn sti(&mut self, inst: u16) {
        let addr = self.registers.pc.wrapping_add(inst.imm9());
        let addr = self.memory.read(addr);
        self.memory.write(addr, self.registers[inst.reg1()]);
    }

    fn str_(&mut self, inst: u16) {
        let addr = self.registers[inst.reg2()].wrapping_add(inst.imm6());
        self.memory.write(addr, self.registers[inst.reg1()]);
    }

    fn setcc(&mut self, dr: Reg) {
        self.registers.cc = CondCodes::from_signum(self.registers[dr]);
    }

    fn trap(&mut self, inst: u16) -> Result<(), Error<IO::Error>> {
        self.registers[Reg::R7] = self.registers.pc;

        let trapcode = match inst.trapcode() {
            Some(trapcode) => trapcode,
            None => {
                log::warn!("unmapped TRAP vector 0x{:02x}; executing as a no-op", inst & 0xFF);
                return Ok(());
            }
        };

        match trapcode {
            TrapCode::Getc => {
                let mut byte = 0u8;
                self.io.read(core::slice::from_mut(&mut byte))?;
                self.registers[Reg::R0] = byte as u16;
            }
            TrapCode::Out => {
                let byte = self.registers[Reg::R0] as u8;
                self.io.write(core::slice::from_ref(&byte))?;
                self.io.flush()?;
            }
            TrapCode::Puts => {
                let mut addr = self.registers[Reg::R0];
                let mut byte = self.memory.read(addr) as u8;
                while byte != 0 {
                    self.io.write(core::slice::from_ref(&byte))?;
                    addr = addr.wrapping_add(1);
                    byte = self.memory.read(addr) as u8;
                }
                self.io.flush()?;
            }
            TrapCode::In => {
                let mut byte = 0u8;
                self.io.read(core::slice::from_mut(&mut byte))?;
                self.io.write(core::slice::from_ref(&byte))?;
                self.io.flush()?;
                self.registers[Reg::R0] = byte as u16;
            }
            TrapCode::PutSp => {
                log::debug!("PUTSP executed as a no-op");
            }
            TrapCode::Halt => {
                self.running = false;
            }
            TrapCode::InU16 => {
                let value = read_decimal_u16(&mut self.io)?;
                if let Some(value) = value {
                    self.registers[Reg::R0] = value;
                }
                // A parse failure leaves R0 unchanged.
            }
            TrapCode::OutU16 => {
                let value = self.registers[Reg::R0];
                let (digits, len) = decimal_digits(value);
                self.io.write(&digits[..len])?;
                self.io.write(b"\n")?;
                self.io.flush()?;
            }
        }

        Ok(())
    }
}

/// Read ASCII decimal digits (optionally preceded by whitespace) from
/// `io` one byte at a time and parse them as a `u16`, stopping at the
/// first non-digit byte (which is consumed but discarded, mirroring
/// `scanf("%hu", ...)`'s whitespace/field handling). Returns `None` if no
/// digit was read before a non-digit byte or end of input.
fn read_decimal_u16<IO: IoDevice>(io: &mut IO) -> Result<Option<u16>, IO::Error> {
    let mut value: u32 = 0;
    let mut saw_digit = false;
    loop {
        let mut byte = 0u8;
        let n = io.read(core::slice::from_mut(&mut byte))?;
        if n == 0 {
            break;
        }
        match byte {
            b'0'..=b'9' => {
                saw_digit = true;
                value = value.saturating_mul(10).saturating_add((byte - b'0') as u32);
            }
            b' ' | b'\t' | b'\r' | b'\n' if !saw_digit => continue,
            _ => break,
        }
    }
    Ok(saw_digit.then_some(value as u16))
}

/// Render `value` as ASCII decimal digits in a fixed stack buffer
/// (`u16::MAX` is 5 digits), avoiding an `alloc` dependency so the core
/// stays usable under `no_std`. Returns the buffer and the number of
/// leading bytes that are significant.
fn decimal_digits(value: u16) -> ([u8; 5], usize) {
    let mut digits = [0u8; 5];
    let mut i = digits.len();
    let mut v = value;
    loop {
        i -= 1;
        digits[i] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    digits.rotate_left(i);
    (digits, digits.len() - i)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// An in-memory [`IoDevice`] pairing a readable input buffer with a
    /// growable output buffer, for whole-program tests without a real
    /// terminal.
    struct MemIo {
        input: Cursor<Vec<u8>>,
        pub output: Vec<u8>,
    }

    impl MemIo {
        fn new(input: &str) -> MemIo {
            MemIo {
                input: Cursor::new(input.as_bytes().to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl IoDevice for MemIo {
        type Error = std::io::Error;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            std::io::Read::read(&mut self.input, buf)
        }

        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            std::io::Write::write(&mut self.output, buf)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn load(machine: &mut Machine<MemIo>, words: &[u16]) {
        for (i, &w) in words.iter().enumerate() {
            machine.memory.write(Registers::PC_START + i as u16, w);
        }
    }

    #[test]
    fn immediate_add_and_halt() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0x1021, 0xF025]); // ADD R0,R0,#1 ; HALT
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 1);
        assert!(m.registers.cc.positive());
        assert_eq!(m.registers.pc, 0x3002);
        assert!(!m.is_running());
    }

    #[test]
    fn negative_immediate_sets_cc_negative() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0x103F, 0xF025]); // ADD R0,R0,#-1 ; HALT
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 0xFFFF);
        assert!(m.registers.cc.negative());
    }

    #[test]
    fn and_with_zero_sets_cc_zero() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0x5020, 0xF025]); // AND R0,R0,#0 ; HALT
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 0);
        assert!(m.registers.cc.zero());
    }

    #[test]
    fn sum_program_reads_two_numbers_and_prints_their_sum() {
        let mut m = Machine::new(MemIo::new("3 4\n"));
        load(
            &mut m,
            &[
                0xF026, // TRAP IN_U16
                0x1220, // ADD R1,R0,#0
                0xF026, // TRAP IN_U16
                0x1240, // ADD R1,R1,R0
                0x1060, // ADD R0,R1,#0
                0xF027, // TRAP OUT_U16
                0xF025, // HALT
            ],
        );
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R1], 7);
        assert_eq!(m.io.output, b"7\n");
        assert!(!m.is_running());
    }

    #[test]
    fn puts_writes_until_nul_word() {
        let mut m = Machine::new(MemIo::new(""));
        m.memory.write(0x4000, b'H' as u16);
        m.memory.write(0x4001, b'i' as u16);
        m.memory.write(0x4002, 0);
        m.registers[Reg::R0] = 0x4000;
        load(&mut m, &[0xF022, 0xF025]); // TRAP PUTS ; HALT
        m.run().unwrap();
        assert_eq!(m.io.output, b"Hi");
    }

    #[test]
    fn branch_taken_and_not_taken() {
        // ADD R0,R0,#0 (CC=Z); BRz #1 (skip next); ADD R0,R0,#5; HALT
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0x1020, 0x0401, 0x1025, 0xF025]);
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 0);

        // Same program with BRp (condition not satisfied by Z): branch not taken.
        let mut m2 = Machine::new(MemIo::new(""));
        load(&mut m2, &[0x1020, 0x0201, 0x1025, 0xF025]);
        m2.run().unwrap();
        assert_eq!(m2.registers[Reg::R0], 5);
    }

    #[test]
    fn store_instructions_do_not_touch_cc() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0x1025, 0x3201, 0xF025]); // ADD R0,R0,#5 ; ST R1,#1 ; HALT
        let cc_before = m.registers.cc.negative();
        m.run().unwrap();
        assert_eq!(cc_before, false);
        assert!(m.registers.cc.positive());
    }

    #[test]
    fn unmapped_trap_vector_is_a_logged_no_op_not_a_panic() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0xF0FF, 0xF025]); // TRAP 0xFF (unmapped) ; HALT
        m.run().unwrap();
        assert!(!m.is_running());
    }

    #[test]
    fn reserved_opcodes_are_no_ops() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0x8000, 0xD000, 0xF025]); // RTI ; RES ; HALT
        m.run().unwrap();
        assert!(!m.is_running());
        assert_eq!(m.registers.pc, 0x3003);
    }

    #[test]
    fn arithmetic_wraps_modulo_2_16() {
        let mut m = Machine::new(MemIo::new(""));
        m.registers[Reg::R0] = 0xFFFF;
        m.memory.write(0x3000, 0x1021); // ADD R0,R0,#1
        m.memory.write(0x3001, 0xF025); // HALT
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 0);
        assert!(m.registers.cc.zero());
    }

    #[test]
    fn ld_loads_from_pc_relative_address_and_sets_cc() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0x2001, 0xF025]); // LD R0,#1 ; HALT
        m.memory.write(0x3002, 7); // PC (0x3001) + 1
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 7);
        assert!(m.registers.cc.positive());
    }

    #[test]
    fn ldi_loads_through_an_indirect_pointer_and_sets_cc() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0xA001, 0xF025]); // LDI R0,#1 ; HALT
        m.memory.write(0x3002, 0x4000); // pointer cell at PC (0x3001) + 1
        m.memory.write(0x4000, 42);
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 42);
        assert!(m.registers.cc.positive());
    }

    #[test]
    fn ldr_loads_from_base_plus_offset_and_sets_cc() {
        let mut m = Machine::new(MemIo::new(""));
        m.registers[Reg::R1] = 0x4000;
        m.memory.write(0x4002, 0xFFFF);
        load(&mut m, &[0x6042, 0xF025]); // LDR R0,R1,#2 ; HALT
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 0xFFFF);
        assert!(m.registers.cc.negative());
    }

    #[test]
    fn lea_computes_pc_relative_address_and_sets_cc() {
        let mut m = Machine::new(MemIo::new(""));
        load(&mut m, &[0xE002, 0xF025]); // LEA R0,#2 ; HALT
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 0x3003);
        assert!(m.registers.cc.positive());
    }

    #[test]
    fn not_complements_bits_and_sets_cc() {
        let mut m = Machine::new(MemIo::new(""));
        m.registers[Reg::R1] = 0x000F;
        load(&mut m, &[0x907F, 0xF025]); // NOT R0,R1 ; HALT
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R0], 0xFFF0);
        assert!(m.registers.cc.negative());
    }

    #[test]
    fn jmp_sets_pc_from_base_register() {
        let mut m = Machine::new(MemIo::new(""));
        m.registers[Reg::R1] = 0x3050;
        m.memory.write(0x3050, 0xF025); // HALT at the jump target
        load(&mut m, &[0xC040]); // JMP R1
        m.run().unwrap();
        assert_eq!(m.registers.pc, 0x3051);
        assert!(!m.is_running());
    }

    #[test]
    fn jsr_long_form_sets_r7_and_jumps_pc_relative() {
        let mut m = Machine::new(MemIo::new(""));
        m.memory.write(0x3003, 0xF025); // HALT at the jump target
        load(&mut m, &[0x4802]); // JSR #2
        m.run().unwrap();
        assert_eq!(m.registers[Reg::R7], 0x3001);
        assert_eq!(m.registers.pc, 0x3004);
        assert!(!m.is_running());
    }

    #[test]
    fn sti_stores_through_an_indirect_pointer_and_does_not_touch_cc() {
        let mut m = Machine::new(MemIo::new(""));
        m.registers[Reg::R0] = 0x1234;
        m.memory.write(0x3002, 0x5000); // pointer cell at PC (0x3001) + 1
        load(&mut m, &[0xB001, 0xF025]); // STI R0,#1 ; HALT
        m.run().unwrap();
        assert_eq!(m.memory.read(0x5000), 0x1234);
        assert!(m.registers.cc.zero()); // fresh Machine starts CC=Z; STI must not touch it
    }

    #[test]
    fn str_stores_at_base_plus_offset_and_does_not_touch_cc() {
        let mut m = Machine::new(MemIo::new(""));
        m.registers[Reg::R0] = 0xBEEF;
        m.registers[Reg::R1] = 0x4000;
        load(&mut m, &[0x7042, 0xF025]); // STR R0,R1,#2 ; HALT
        m.run().unwrap();
        assert_eq!(m.memory.read(0x4002), 0xBEEF);
        assert!(m.registers.cc.zero());
    }
}
