use std::fmt;

/// A decoded CHIP-8 instruction.
///
/// Register operands are the 4-bit `x`/`y` fields of the word, addresses are
/// the low 12 bits (`nnn`) and immediates the low byte (`kk`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XKK
    SkipIfEqualImmediate { x: u8, kk: u8 },
    /// 4XKK
    SkipIfNotEqualImmediate { x: u8, kk: u8 },
    /// 5XY_
    SkipIfEqual { x: u8, y: u8 },
    /// 6XKK
    LoadImmediate { x: u8, kk: u8 },
    /// 7XKK, no carry.
    AddImmediate { x: u8, kk: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4, VF = carry.
    Add { x: u8, y: u8 },
    /// 8XY5, VF = VX > VY.
    Sub { x: u8, y: u8 },
    /// 8XY6, VF = shifted out bit.
    ShiftRight { x: u8, y: u8 },
    /// 8XY7, VF = VY > VX.
    SubReverse { x: u8, y: u8 },
    /// 8XYE, VF = shifted out bit.
    ShiftLeft { x: u8, y: u8 },
    /// 9XY_
    SkipIfNotEqual { x: u8, y: u8 },
    /// ANNN
    LoadAddress(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXKK
    Random { x: u8, kk: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipIfKeyDown { x: u8 },
    /// EXA1
    SkipIfKeyUp { x: u8 },
    /// FX07
    LoadDelay { x: u8 },
    /// FX0A
    WaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddAddress { x: u8 },
    /// FX29
    LoadGlyph { x: u8 },
    /// FX33
    StoreBcd { x: u8 },
    /// FX55
    StoreRegisters { x: u8 },
    /// FX65
    LoadRegisters { x: u8 },
    /// Anything else. Executes as a no-op, some ROMs depend on that.
    Unknown(u16),
}

impl Instruction {
    pub fn decode(opcode: u16) -> Self {
        use Instruction::*;

        let p = (opcode >> 12) as u8;
        let x = ((opcode >> 8) & 0xF) as u8;
        let y = ((opcode >> 4) & 0xF) as u8;
        let n = (opcode & 0xF) as u8;
        let kk = (opcode & 0xFF) as u8;
        let nnn = opcode & 0x0FFF;

        match p {
            0x0 => match opcode {
                0x00E0 => ClearScreen,
                0x00EE => Return,
                _ => Unknown(opcode),
            },
            0x1 => Jump(nnn),
            0x2 => Call(nnn),
            0x3 => SkipIfEqualImmediate { x, kk },
            0x4 => SkipIfNotEqualImmediate { x, kk },
            0x5 => SkipIfEqual { x, y },
            0x6 => LoadImmediate { x, kk },
            0x7 => AddImmediate { x, kk },
            0x8 => match n {
                0x0 => Move { x, y },
                0x1 => Or { x, y },
                0x2 => And { x, y },
                0x3 => Xor { x, y },
                0x4 => Add { x, y },
                0x5 => Sub { x, y },
                0x6 => ShiftRight { x, y },
                0x7 => SubReverse { x, y },
                0xE => ShiftLeft { x, y },
                _ => Unknown(opcode),
            },
            0x9 => SkipIfNotEqual { x, y },
            0xA => LoadAddress(nnn),
            0xB => JumpOffset(nnn),
            0xC => Random { x, kk },
            0xD => Draw { x, y, n },
            0xE => match kk {
                0x9E => SkipIfKeyDown { x },
                0xA1 => SkipIfKeyUp { x },
                _ => Unknown(opcode),
            },
            0xF => match kk {
                0x07 => LoadDelay { x },
                0x0A => WaitKey { x },
                0x15 => SetDelay { x },
                0x18 => SetSound { x },
                0x1E => AddAddress { x },
                0x29 => LoadGlyph { x },
                0x33 => StoreBcd { x },
                0x55 => StoreRegisters { x },
                0x65 => LoadRegisters { x },
                _ => Unknown(opcode),
            },
            _ => unreachable!("opcode group is a single nibble"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(nnn) => write!(f, "JP {:#05x}", nnn),
            Call(nnn) => write!(f, "CALL {:#05x}", nnn),
            SkipIfEqualImmediate { x, kk } => write!(f, "SE V{:X}, {:#04x}", x, kk),
            SkipIfNotEqualImmediate { x, kk } => write!(f, "SNE V{:X}, {:#04x}", x, kk),
            SkipIfEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImmediate { x, kk } => write!(f, "LD V{:X}, {:#04x}", x, kk),
            AddImmediate { x, kk } => write!(f, "ADD V{:X}, {:#04x}", x, kk),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubReverse { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipIfNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadAddress(nnn) => write!(f, "LD I, {:#05x}", nnn),
            JumpOffset(nnn) => write!(f, "JP V0, {:#05x}", nnn),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04x}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKeyDown { x } => write!(f, "SKP V{:X}", x),
            SkipIfKeyUp { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddAddress { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(opcode) => write!(f, "DW {:#06x}", opcode),
        }
    }
}
