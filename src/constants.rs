//! # Constants
//! Fixed dimensions of the Chip-8 machine.

/// Bytes of addressable memory (0x000..=0xFFF).
pub const MEMORY_SIZE: usize = 4096;

/// Addresses are 12 bits wide; all address arithmetic is masked with this.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Where ROMs are loaded and where execution begins.
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Every instruction is two bytes long.
pub const OPCODE_SIZE: u16 = 2;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
pub const KEY_COUNT: usize = 16;

/// Index of VF, the flag register.
pub const FLAG: usize = 0xF;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Default clock speed in instructions per second.
pub const CLOCK_SPEED: u32 = 700;

/// Rate at which the delay and sound timers count down.
pub const TIMER_FREQUENCY: u32 = 60;

/// Start of the font table in reserved memory.
pub const FONT_START: u16 = 0x050;

/// Bytes per font glyph.
pub const FONT_HEIGHT: u16 = 5;

/// # Font
/// Sprites for the hexadecimal digits 0..F, each 4 pixels wide and 5 tall.
/// The high nibble of each byte is one row of the glyph:
/// ```text
/// 0xF0  ####
/// 0x90  #..#
/// 0x90  #..#
/// 0x90  #..#
/// 0xF0  ####
/// ```
pub const FONT_SET: [u8; 80] = [
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
