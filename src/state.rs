use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_HEIGHT, FONT_SET, FONT_START, KEY_COUNT,
    MEMORY_SIZE, OPCODE_SIZE, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH,
};

/// The FrameBuffer is indexed as [y][x]; each pixel is 1 (on) or 0 (off)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) holds the flag written by the last instruction that sets one
/// - (i) a 16-bit memory address register of which only the low 12 bits are used
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound), counting down to 0
/// - a sound should play while the sound timer is nonzero
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved, with the font at 0x050..0x0A0
///     - ROMs are loaded at 0x200
/// - 32x64 frame buffer
///
/// ## Input
/// - 16 flags tracking the pressed status of keys 0..F
/// - execution halts while `register_needing_key` is set
///     - only a key that goes down after `keys_at_wait` was taken ends the wait
///
/// ## Randomness
/// - a generator seeded once at construction and owned for the life of the state
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: [bool; KEY_COUNT],
    pub register_needing_key: Option<usize>,
    pub keys_at_wait: [bool; KEY_COUNT],
    pub rng: StdRng,
}

impl State {
    pub fn new(seed: Option<u64>) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_start = usize::from(FONT_START);
        memory[font_start..font_start + FONT_SET.len()].copy_from_slice(&FONT_SET);

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keys: [false; KEY_COUNT],
            register_needing_key: None,
            keys_at_wait: [false; KEY_COUNT],
            rng,
        }
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & ADDRESS_MASK)]
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr & ADDRESS_MASK)] = value;
    }

    /// Big-endian word at `addr`; the second byte wraps to 0x000 past 0xFFF.
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from(self.read_byte(addr)) << 8 | u16::from(self.read_byte(addr.wrapping_add(1)))
    }

    /// Moves the pc past the next instruction.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(OPCODE_SIZE) & ADDRESS_MASK;
    }

    /// Address of the instruction being executed; the pc has already moved past it.
    pub fn instruction_addr(&self) -> u16 {
        self.pc.wrapping_sub(OPCODE_SIZE) & ADDRESS_MASK
    }

    /// Address of the font glyph for the low nibble of `digit`.
    pub fn font_addr(digit: u8) -> u16 {
        FONT_START + u16::from(digit & 0xF) * FONT_HEIGHT
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(None)
    }
}
