use std::ops::{Index, IndexMut};

use log::info;

use super::error::{Error, Result};

pub const MEMORY_SIZE: usize = 0xFFF;
pub const ADDRESS_MASK: u16 = 0x0FFF;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const FONTSET_BASE_ADDRESS: u16 = 0x50;
const FONT_GLYPH_SIZE: u16 = 5;
const FONTSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Main memory, 4095 addressable bytes.
///
/// The region below 0x200 is reserved for the interpreter and holds the
/// built in hexadecimal font at 0x50. Programs are loaded at 0x200.
///
/// Every access is masked to 12 bits and wrapped into the store, so
/// instructions can never address memory out of bounds.
pub struct Memory {
    memory: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Construct a new instance of `Memory` with the font loaded and
    /// everything else zeroed.
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_start = FONTSET_BASE_ADDRESS as usize;
        memory[font_start..(font_start + FONTSET.len())].copy_from_slice(&FONTSET);

        Self { memory }
    }

    /// Copy `rom` into program space starting at 0x200.
    ///
    /// Fails without touching memory if the ROM is larger than the space
    /// between 0x200 and the end of memory.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }

        let start = PROGRAM_START as usize;
        self.memory[start..(start + rom.len())].copy_from_slice(rom);
        info!("Loaded {} byte ROM at {:#05x}", rom.len(), PROGRAM_START);

        Ok(())
    }

    pub fn font_address_for_character(&self, character: u8) -> u16 {
        FONTSET_BASE_ADDRESS + (character & 0xF) as u16 * FONT_GLYPH_SIZE
    }

    /// Big endian instruction word at `address` and `address + 1`.
    pub fn read_word(&self, address: u16) -> u16 {
        (self[address] as u16) << 8 | self[address.wrapping_add(1)] as u16
    }

    fn wrap(address: u16) -> usize {
        (address & ADDRESS_MASK) as usize % MEMORY_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u16> for Memory {
    type Output = u8;

    fn index(&self, address: u16) -> &Self::Output {
        &self.memory[Self::wrap(address)]
    }
}

impl IndexMut<u16> for Memory {
    fn index_mut(&mut self, address: u16) -> &mut Self::Output {
        &mut self.memory[Self::wrap(address)]
    }
}
