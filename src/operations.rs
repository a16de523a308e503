//! Instruction handlers.
//!
//! Each handler runs after the pc has been moved past its own instruction, so jumps, calls and
//! skips are all relative to the next instruction.

use log::debug;
use rand::Rng;

use crate::constants::{ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, STACK_DEPTH};
use crate::error::{Error, Result};
use crate::state::State;

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<()> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow {
            pc: state.instruction_addr(),
        });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp];
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<()> {
    if state.sp >= STACK_DEPTH {
        return Err(Error::StackOverflow {
            pc: state.instruction_addr(),
        });
    }
    state.stack[state.sp] = state.pc;
    state.sp += 1;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then skip
pub fn ske(state: &mut State, x: usize, kk: u8) {
    if state.v[x] == kk {
        state.skip();
    }
}

/// if Vx != kk then skip
pub fn skne(state: &mut State, x: usize, kk: u8) {
    if state.v[x] != kk {
        state.skip();
    }
}

/// if Vx == Vy then skip
pub fn skre(state: &mut State, x: usize, y: usize) {
    if state.v[x] == state.v[y] {
        state.skip();
    }
}

/// Vx = kk
pub fn load(state: &mut State, x: usize, kk: u8) {
    state.v[x] = kk;
}

/// Vx += kk
/// Overflow is dropped and VF is left alone
pub fn add(state: &mut State, x: usize, kk: u8) {
    state.v[x] = state.v[x].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: usize, y: usize) {
    state.v[x] = state.v[y];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) {
    state.v[x] |= state.v[y];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) {
    state.v[x] &= state.v[y];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) {
    state.v[x] ^= state.v[y];
}

// The flag setting operations below write Vx first and VF last, so VF holds the flag even
// when x is 0xF.

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, x: usize, y: usize) {
    let (res, carry) = state.v[x].overflowing_add(state.v[y]);
    state.v[x] = res;
    state.v[FLAG] = u8::from(carry);
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[x] = vx.wrapping_sub(vy);
    state.v[FLAG] = u8::from(vx >= vy);
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[x] = vx >> 1;
    state.v[FLAG] = vx & 0x1;
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[x] = vy.wrapping_sub(vx);
    state.v[FLAG] = u8::from(vy >= vx);
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[x] = vx << 1;
    state.v[FLAG] = vx >> 7;
}

/// if Vx != Vy then skip
pub fn skrne(state: &mut State, x: usize, y: usize) {
    if state.v[x] != state.v[y] {
        state.skip();
    }
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = (u16::from(state.v[0x0]) + addr) & ADDRESS_MASK;
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: usize, kk: u8) {
    let rand_byte: u8 = state.rng.gen();
    state.v[x] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at I onto the FrameBuffer at (Vx, Vy), wrapping at the edges.
/// VF = 1 if any pixel was erased
pub fn draw(state: &mut State, x: usize, y: usize, n: u8) {
    let origin_x = usize::from(state.v[x]);
    let origin_y = usize::from(state.v[y]);
    let mut collision = false;

    for row in 0..n {
        let sprite = state.read_byte(state.i.wrapping_add(u16::from(row)));
        let py = (origin_y + usize::from(row)) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = (sprite >> (7 - bit)) & 0x1;
            let current = &mut state.frame_buffer[py][px];
            collision |= pixel & *current == 0x1;
            *current ^= pixel;
        }
    }

    state.v[FLAG] = u8::from(collision);
    state.draw_flag = true;
}

/// if key(Vx) is pressed then skip
pub fn skpr(state: &mut State, x: usize) {
    if state.keys[usize::from(state.v[x] & 0xF)] {
        state.skip();
    }
}

/// if key(Vx) is not pressed then skip
pub fn skup(state: &mut State, x: usize) {
    if !state.keys[usize::from(state.v[x] & 0xF)] {
        state.skip();
    }
}

/// Vx = DT
pub fn moved(state: &mut State, x: usize) {
    state.v[x] = state.delay_timer;
}

/// await keypress for Vx
/// The cycle driver stops fetching until a key that was up now is down, and stores it in Vx.
/// Keys already held are remembered so they don't count.
pub fn keyd(state: &mut State, x: usize) {
    debug!("waiting for a key press into V{:X}", x);
    state.register_needing_key = Some(x);
    state.keys_at_wait = state.keys;
}

/// DT = Vx
pub fn lddt(state: &mut State, x: usize) {
    state.delay_timer = state.v[x];
}

/// ST = Vx
pub fn ldst(state: &mut State, x: usize) {
    state.sound_timer = state.v[x];
}

/// I += Vx
pub fn addi(state: &mut State, x: usize) {
    state.i = state.i.wrapping_add(u16::from(state.v[x])) & ADDRESS_MASK;
}

/// I = address of the font glyph for Vx
pub fn ldspr(state: &mut State, x: usize) {
    state.i = State::font_addr(state.v[x]);
}

/// mem[I..I+3] = bcd(Vx)
/// Hundreds digit first
pub fn bcd(state: &mut State, x: usize) {
    let vx = state.v[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in (0u16..).zip(digits) {
        state.write_byte(state.i.wrapping_add(offset), digit);
    }
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged
pub fn stor(state: &mut State, x: usize) {
    for (offset, r) in (0u16..).zip(0..=x) {
        state.write_byte(state.i.wrapping_add(offset), state.v[r]);
    }
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged
pub fn read(state: &mut State, x: usize) {
    for (offset, r) in (0u16..).zip(0..=x) {
        state.v[r] = state.read_byte(state.i.wrapping_add(offset));
    }
}
