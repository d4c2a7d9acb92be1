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

//! Image loading.
//!
//! An image file is a headerless sequence of 16-bit words in host byte
//! order; there is no origin prefix and no endianness marker, matching
//! the original C source's raw `fread`/`fwrite` of `uint16_t` (see
//! DESIGN.md for the rationale).

use core::mem::size_of;

use crate::{Memory, Registers};

/// An image file source.
///
/// With the `std` feature enabled, every [`std::io::Read`] implementor
/// also implements [`ImageFile`].
pub trait ImageFile {
    type Error;

    /// Pull bytes from this source into `buf`, returning how many bytes
    /// were read. `0` signals end-of-file.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Load this image into `memory` starting at `0x3000 + offset`.
    /// Reads at most `0x10000 - 0x3000` words; on end-of-file the
    /// remainder of `memory` is left untouched.
    fn load_image_into(&mut self, memory: &mut Memory, offset: u16) -> Result<(), Self::Error> {
        let origin = Registers::PC_START.wrapping_add(offset);
        let max_words = Memory::LEN - Registers::PC_START as usize;
        let mut word_buf = [0u8; size_of::<u16>()];
        let mut addr = origin;

        for _ in 0..max_words {
            let mut filled = 0;
            while filled < word_buf.len() {
                let n = self.read(&mut word_buf[filled..])?;
                if n == 0 {
                    return Ok(());
                }
                filled += n;
            }
            memory.write(addr, u16::from_ne_bytes(word_buf));
            addr = addr.wrapping_add(1);
        }

        Ok(())
    }
}

#[cfg(feature = "std")]
impl<T: std::io::Read> ImageFile for T {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(self, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_contiguous_words_at_load_address_plus_offset() {
        let bytes = 1u16.to_ne_bytes();
        let mut image = Cursor::new(vec![bytes[0], bytes[1], 0x02, 0x00]);
        let mut mem = Memory::new();
        image.load_image_into(&mut mem, 0).unwrap();
        assert_eq!(mem.read(0x3000), 1);
        assert_eq!(mem.read(0x3001), 2);
        assert_eq!(mem.read(0x3002), 0);
    }

    #[test]
    fn offset_shifts_the_load_address() {
        let bytes = 0xBEEFu16.to_ne_bytes();
        let mut image = Cursor::new(vec![bytes[0], bytes[1]]);
        let mut mem = Memory::new();
        image.load_image_into(&mut mem, 0x10).unwrap();
        assert_eq!(mem.read(0x3010), 0xBEEF);
        assert_eq!(mem.read(0x3000), 0);
    }

    #[test]
    fn trailing_odd_byte_is_dropped_not_panicked_on() {
        let mut image = Cursor::new(vec![0x01, 0x00, 0x02]);
        let mut mem = Memory::new();
        image.load_image_into(&mut mem, 0).unwrap();
        assert_eq!(mem.read(0x3000), 1);
        assert_eq!(mem.read(0x3001), 0);
    }

    #[test]
    fn empty_image_leaves_memory_zero() {
        let mut image = Cursor::new(Vec::<u8>::new());
        let mut mem = Memory::new();
        image.load_image_into(&mut mem, 0).unwrap();
        assert_eq!(mem.read(0x3000), 0);
    }
}
