use std::io;

use thiserror::Error;

use crate::constants::STACK_DEPTH;

/// Conditions that stop the interpreter or prevent a ROM from loading.
///
/// Unsupported opcodes are not errors; they execute as no-ops.
#[derive(Debug, Error)]
pub enum Error {
    #[error("call stack overflow at {pc:#05X}: more than {} nested subroutines", STACK_DEPTH)]
    StackOverflow { pc: u16 },

    #[error("return from subroutine at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("ROM is larger than the {max} bytes that fit in memory")]
    RomTooLarge { max: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
