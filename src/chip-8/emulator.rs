use log::info;

use crate::cpu::CPU;
use crate::display::Framebuffer;
use crate::error::Result;
use crate::memory::Memory;
use crate::{Input, RandomNumberProvider};

/// A CPU together with the ROM it was started from, so it can be reset.
pub struct Emulator {
    cpu: CPU,
    current_rom: Vec<u8>,
    is_initial_state: bool,
}

impl Emulator {
    /// Start `rom` with random numbers from the thread local generator.
    pub fn new(rom: Vec<u8>) -> Result<Self> {
        Self::with_random_number_provider(rom, Box::new(rand::random::<u8>))
    }

    pub fn with_random_number_provider(
        rom: Vec<u8>,
        random_number_provider: Box<RandomNumberProvider>,
    ) -> Result<Self> {
        let memory = Self::memory_with_rom(&rom)?;
        let cpu = CPU::new(memory, random_number_provider);

        Ok(Self {
            cpu,
            current_rom: rom,
            is_initial_state: true,
        })
    }

    pub fn is_initial_state(&self) -> bool {
        self.is_initial_state
    }

    /// Zero the whole machine and start the current ROM from the beginning.
    pub fn reset(self) -> Result<Self> {
        let memory = Self::memory_with_rom(&self.current_rom)?;
        let cpu = self.cpu.reset(memory);
        info!("Machine reset");

        Ok(Self {
            cpu,
            current_rom: self.current_rom,
            is_initial_state: true,
        })
    }

    pub fn step(&mut self, input: &dyn Input) {
        self.is_initial_state = false;

        self.cpu.step(input);
    }

    /// Tick the delay and sound timers, returning whether the tone should play.
    pub fn tick_timers(&mut self) -> bool {
        self.cpu.tick_timers()
    }

    pub fn tone_active(&self) -> bool {
        self.cpu.tone_active()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        self.cpu.framebuffer()
    }

    pub fn clear_dirty(&mut self) {
        self.cpu.framebuffer_mut().clear_dirty();
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    fn memory_with_rom(rom: &[u8]) -> Result<Memory> {
        let mut memory = Memory::default();
        memory.load_rom(rom)?;

        Ok(memory)
    }
}
