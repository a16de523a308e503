//! A CHIP-8 interpreter core.
//!
//! The host owns the loop: it writes the keypad, calls `Chip8::cycle` at its chosen rate and
//! reads back the frame buffer and sound timer. Windowing, input translation and audio live
//! outside this crate.

pub use chip8::Chip8;
pub use config::Config;
pub use error::{Error, Result};
pub use instruction::Instruction;

mod chip8;
mod config;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
