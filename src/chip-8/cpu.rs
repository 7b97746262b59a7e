use std::ops::{Index, IndexMut};

use log::{debug, trace};

use super::display::Framebuffer;
use super::instruction::Instruction;
use super::memory::{Memory, ADDRESS_MASK, PROGRAM_START};
use super::timer::Timer;
use super::{Input, RandomNumberProvider};

const REGISTER_COUNT: usize = 16;
const FLAG_REGISTER: u8 = 0xF;
const KEY_COUNT: u8 = 16;

#[derive(Debug, Default)]
struct Registers([u8; REGISTER_COUNT]);

impl Index<u8> for Registers {
    type Output = u8;

    fn index(&self, register: u8) -> &Self::Output {
        &self.0[(register & 0xF) as usize]
    }
}

impl IndexMut<u8> for Registers {
    fn index_mut(&mut self, register: u8) -> &mut Self::Output {
        &mut self.0[(register & 0xF) as usize]
    }
}

pub const STACK_SIZE: usize = 16;

pub struct CPU {
    // Registers
    v: Registers,
    i: u16,

    // Program Counter
    pc: u16,

    // Stack
    stack: [u16; STACK_SIZE],
    sp: u16,

    memory: Memory,
    framebuffer: Framebuffer,

    delay_timer: Timer,
    sound_timer: Timer,

    // Register waiting for a key press, execution is suspended while set
    key_wait: Option<u8>,
    random_number_provider: Box<RandomNumberProvider>,
}

impl CPU {
    pub fn new(memory: Memory, random_number_provider: Box<RandomNumberProvider>) -> Self {
        Self {
            v: Registers::default(),
            i: 0,
            pc: PROGRAM_START,

            sp: 0,
            stack: [0; STACK_SIZE],

            memory,
            framebuffer: Framebuffer::default(),

            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            key_wait: None,
            random_number_provider,
        }
    }

    /// A fresh machine around `memory`, keeping the random number provider.
    pub fn reset(self, memory: Memory) -> Self {
        Self::new(memory, self.random_number_provider)
    }

    /// Advance the machine by one step.
    ///
    /// While a key wait is pending this only polls `input` for keys 0 to F
    /// in order, storing the first pressed one and resuming execution on the
    /// next step. Otherwise one instruction is fetched and executed.
    pub fn step(&mut self, input: &dyn Input) {
        if let Some(register) = self.key_wait {
            if let Some(key) = (0..KEY_COUNT).find(|&key| input.is_key_down(key)) {
                debug!("Key {:X} pressed, resuming with V{:X} = {:X}", key, register, key);
                self.v[register] = key;
                self.key_wait = None;
            }

            return;
        }

        let address = self.pc;
        let opcode = self.memory.read_word(address);
        self.pc = address.wrapping_add(2) & ADDRESS_MASK;

        let instruction = Instruction::decode(opcode);
        trace!("{:03x}: {:04x} {}", address, opcode, instruction);
        self.execute(instruction, input);
    }

    /// Count both timers down by one, to be called at 60hz.
    ///
    /// Returns whether the tone should be audible, that is whether the sound
    /// timer is still running after the tick.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer.tick();
        self.sound_timer.tick()
    }

    /// Whether the tone should be audible right now. Turns on as soon as the
    /// sound timer is set to a non-zero value and off once a tick reaches zero.
    pub fn tone_active(&self) -> bool {
        self.sound_timer.is_active()
    }

    fn execute(&mut self, instruction: Instruction, input: &dyn Input) {
        use Instruction::*;

        match instruction {
            ClearScreen => self.framebuffer.cls(),
            Return => match self.stack_pop() {
                Some(address) => self.pc = address,
                None => debug!("Return with an empty stack ignored at {:#05x}", self.pc),
            },
            Jump(address) => self.pc = address,
            Call(address) => {
                if !self.stack_push(self.pc) {
                    debug!("Stack full, return address {:#05x} dropped", self.pc);
                }
                self.pc = address;
            }

            SkipIfEqualImmediate { x, kk } => self.skip_if(self.v[x] == kk),
            SkipIfNotEqualImmediate { x, kk } => self.skip_if(self.v[x] != kk),
            SkipIfEqual { x, y } => self.skip_if(self.v[x] == self.v[y]),
            SkipIfNotEqual { x, y } => self.skip_if(self.v[x] != self.v[y]),

            LoadImmediate { x, kk } => self.v[x] = kk,
            AddImmediate { x, kk } => self.v[x] = self.v[x].wrapping_add(kk),

            Move { x, y } => self.v[x] = self.v[y],
            Or { x, y } => self.v[x] = self.v[x] | self.v[y],
            And { x, y } => self.v[x] = self.v[x] & self.v[y],
            Xor { x, y } => self.v[x] = self.v[x] ^ self.v[y],
            // VF is written before the result, so the result wins when x is F
            Add { x, y } => {
                let (result, carry) = self.v[x].overflowing_add(self.v[y]);
                self.v[FLAG_REGISTER] = carry as u8;
                self.v[x] = result;
            }
            Sub { x, y } => {
                let (lhs, rhs) = (self.v[x], self.v[y]);
                self.v[FLAG_REGISTER] = (lhs > rhs) as u8;
                self.v[x] = lhs.wrapping_sub(rhs);
            }
            SubReverse { x, y } => {
                let (lhs, rhs) = (self.v[x], self.v[y]);
                self.v[FLAG_REGISTER] = (rhs > lhs) as u8;
                self.v[x] = rhs.wrapping_sub(lhs);
            }
            ShiftRight { x, .. } => {
                let value = self.v[x];
                self.v[FLAG_REGISTER] = value & 0x1;
                self.v[x] = value >> 1;
            }
            ShiftLeft { x, .. } => {
                let value = self.v[x];
                self.v[FLAG_REGISTER] = value >> 7;
                self.v[x] = value << 1;
            }

            LoadAddress(address) => self.i = address,
            JumpOffset(address) => {
                self.pc = address.wrapping_add(self.v[0] as u16) & ADDRESS_MASK;
            }
            Random { x, kk } => self.v[x] = (self.random_number_provider)() & kk,

            Draw { x, y, n } => {
                let (x, y) = (self.v[x], self.v[y]);
                let memory = &self.memory;
                let base_address = self.i;
                let rows = (0..n as u16).map(|row| memory[base_address.wrapping_add(row)]);

                let collided = self.framebuffer.draw_sprite(x, y, rows);
                self.v[FLAG_REGISTER] = collided as u8;
            }

            SkipIfKeyDown { x } => self.skip_if(input.is_key_down(self.v[x] & 0xF)),
            SkipIfKeyUp { x } => self.skip_if(!input.is_key_down(self.v[x] & 0xF)),

            LoadDelay { x } => self.v[x] = self.delay_timer.value(),
            WaitKey { x } => {
                debug!("Waiting for key press into V{:X}", x);
                self.key_wait = Some(x);
            }
            SetDelay { x } => self.delay_timer.set(self.v[x]),
            SetSound { x } => self.sound_timer.set(self.v[x]),
            AddAddress { x } => self.i = self.i.wrapping_add(self.v[x] as u16),
            LoadGlyph { x } => self.i = self.memory.font_address_for_character(self.v[x]),
            StoreBcd { x } => {
                let value = self.v[x];

                self.memory[self.i] = value / 100;
                self.memory[self.i.wrapping_add(1)] = (value / 10) % 10;
                self.memory[self.i.wrapping_add(2)] = value % 10;
            }
            StoreRegisters { x } => {
                for register in 0..=x {
                    self.memory[self.i.wrapping_add(register as u16)] = self.v[register];
                }
            }
            LoadRegisters { x } => {
                for register in 0..=x {
                    self.v[register] = self.memory[self.i.wrapping_add(register as u16)];
                }
            }

            Unknown(opcode) => debug!("Ignoring unknown opcode {:#06x}", opcode),
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2) & ADDRESS_MASK;
        }
    }

    /// Push a return address. Past the 16th entry the push is dropped and
    /// the stack pointer stays at 16.
    fn stack_push(&mut self, value: u16) -> bool {
        if (self.sp as usize) >= STACK_SIZE {
            return false;
        }

        self.stack[self.sp as usize] = value;
        self.sp += 1;

        true
    }

    fn stack_pop(&mut self) -> Option<u16> {
        if self.sp == 0 {
            return None;
        }

        self.sp -= 1;

        Some(self.stack[self.sp as usize])
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn sp(&self) -> u16 {
        self.sp
    }

    pub fn v(&self, register: u8) -> u8 {
        self.v[register]
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.value()
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.value()
    }

    /// The register a pending `FX0A` will store the pressed key in.
    pub fn key_wait(&self) -> Option<u8> {
        self.key_wait
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }
}
