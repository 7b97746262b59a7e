mod cpu;
mod display;
mod emulator;
mod error;
mod instruction;
mod memory;
mod rom;
mod timer;

pub use cpu::{CPU, STACK_SIZE};
pub use display::{Framebuffer, FRAME_BUFFER_PIXEL_HEIGHT, FRAME_BUFFER_PIXEL_WIDTH};
pub use emulator::Emulator;
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use memory::{Memory, FONTSET_BASE_ADDRESS, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
pub use rom::read_rom;
pub use timer::Timer;

/// The hex keypad as seen by the CPU.
pub trait Input {
    /// Whether key `key` (0x0 to 0xF) is currently held down.
    fn is_key_down(&self, key: u8) -> bool;
}

/// Source of the random bytes used by `CXKK`.
pub type RandomNumberProvider = dyn FnMut() -> u8;
