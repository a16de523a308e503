use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info, trace, warn};

use crate::config::Config;
use crate::constants::{ADDRESS_MASK, KEY_COUNT, MAX_ROM_SIZE, OPCODE_SIZE, PROGRAM_START};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `config` it was built with
///  - `timer_counter`, the cycles since the timers were last decremented
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its sound timer for playing a tone
///
/// Everything happens on the caller's thread; keys are written between cycles and read by the
/// next one.
pub struct Chip8 {
    state: State,
    config: Config,
    timer_counter: u32,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(config.seed),
            config,
            timer_counter: 0,
        }
    }

    /// Load a rom from a source
    ///
    /// At most one byte past the limit is read, and nothing is written until the ROM is known
    /// to fit, so a failed load leaves the machine as it was. Program memory is cleared before
    /// the copy so a shorter ROM leaves nothing of an earlier one behind.
    ///
    /// # Arguments
    /// * `reader` a reader over the raw ROM bytes
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize> {
        let mut rom = Vec::new();
        reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge { max: MAX_ROM_SIZE });
        }

        let start = usize::from(PROGRAM_START);
        self.state.memory[start..].fill(0);
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(rom.len())
    }

    /// Load a rom from a file
    ///
    /// # Arguments
    /// * `path` location of the ROM file
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let file = File::open(path)?;
        self.load_rom(&mut BufReader::new(file))
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    /// Replace the status of every key at once
    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.state.keys = keys;
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        let index = usize::from(key);
        let Some(&was_pressed) = self.state.keys.get(index) else {
            warn!("ignoring key {:#04X}; the keypad only has keys 0x0..=0xF", key);
            return;
        };
        self.state.keys[index] = pressed;
        // A press event ends a wait even if the key is released before the next step
        if pressed && !was_pressed {
            self.finish_key_wait(index);
        }
    }

    /// Stores `key` in the register awaiting a keypress, if there is one.
    fn finish_key_wait(&mut self, key: usize) {
        if let Some(register) = self.state.register_needing_key.take() {
            debug!("key {:X} pressed; stored in V{:X}", key, register);
            self.state.v[register] = key as u8;
        }
    }

    /// Runs one cycle: a CPU step followed by the timers.
    pub fn cycle(&mut self) -> Result<()> {
        self.step()?;
        self.advance_timers();
        Ok(())
    }

    /// Advances the CPU by a single instruction
    /// - polls the keypad for a newly pressed key instead if awaiting a keypress
    /// - otherwise fetches the next opcode, moves the pc past it and executes it
    ///
    /// If the instruction fails the pc is left on it and nothing else changes.
    pub fn step(&mut self) -> Result<()> {
        if self.state.register_needing_key.is_some() {
            let newly_pressed = self
                .state
                .keys
                .iter()
                .zip(self.state.keys_at_wait)
                .position(|(&now, before)| now && !before);
            match newly_pressed {
                Some(key) => self.finish_key_wait(key),
                // Releasing a held key lets a later press of it count
                None => self.state.keys_at_wait = self.state.keys,
            }
            return Ok(());
        }

        let pc = self.state.pc;
        let op = self.state.read_word(pc);
        self.state.pc = pc.wrapping_add(OPCODE_SIZE) & ADDRESS_MASK;

        match Instruction::decode(op) {
            Some(instruction) => {
                trace!(
                    "{:03X}: {:04X} {:?} v{:02X?} i{:03X}",
                    pc,
                    op,
                    instruction,
                    self.state.v,
                    self.state.i
                );
                if let Err(e) = instruction.execute(&mut self.state) {
                    self.state.pc = pc;
                    return Err(e);
                }
            }
            None => debug!("{:03X}: ignoring unsupported opcode {:04X}", pc, op),
        }
        Ok(())
    }

    /// Handles the timer divider
    /// - does nothing when the host drives the timers
    /// - otherwise decrements the timers every `timer_divider` calls
    pub fn advance_timers(&mut self) {
        if self.config.host_driven_timers() {
            return;
        }

        self.timer_counter += 1;
        if self.timer_counter >= self.config.timer_divider {
            self.timer_counter = 0;
            self.tick_timers();
        }
    }

    /// Decrements both timers once, stopping at 0
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    /// The sound timer; a tone should play while it is nonzero
    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
