use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// # Instructions
/// A decoded Chip-8 opcode.
///
/// Register selectors are already indices into `State::v`, and addresses are 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `0nnn` call a machine code routine (any low nibble other than 0x0 or 0xE); ignored
    Sys(u16),
    /// `00E0`, or any `0nn0`
    Cls,
    /// `00EE`, or any `0nnE`
    Ret,
    /// `1nnn`
    Jp(u16),
    /// `2nnn`
    Call(u16),
    /// `3xkk`
    SeByte { x: usize, kk: u8 },
    /// `4xkk`
    SneByte { x: usize, kk: u8 },
    /// `5xy0`
    SeReg { x: usize, y: usize },
    /// `6xkk`
    LdByte { x: usize, kk: u8 },
    /// `7xkk`
    AddByte { x: usize, kk: u8 },
    /// `8xy0`
    LdReg { x: usize, y: usize },
    /// `8xy1`
    Or { x: usize, y: usize },
    /// `8xy2`
    And { x: usize, y: usize },
    /// `8xy3`
    Xor { x: usize, y: usize },
    /// `8xy4`
    AddReg { x: usize, y: usize },
    /// `8xy5`
    Sub { x: usize, y: usize },
    /// `8xy6`
    Shr { x: usize },
    /// `8xy7`
    Subn { x: usize, y: usize },
    /// `8xyE`
    Shl { x: usize },
    /// `9xy0`
    SneReg { x: usize, y: usize },
    /// `Annn`
    LdI(u16),
    /// `Bnnn`
    JpV0(u16),
    /// `Cxkk`
    Rnd { x: usize, kk: u8 },
    /// `Dxyn`
    Drw { x: usize, y: usize, n: u8 },
    /// `Ex9E`, or any `ExnE`
    Skp { x: usize },
    /// `ExA1`, or any `Exn1`
    Sknp { x: usize },
    /// `Fx07`
    LdVxDt { x: usize },
    /// `Fx0A`
    LdVxK { x: usize },
    /// `Fx15`
    LdDtVx { x: usize },
    /// `Fx18`
    LdStVx { x: usize },
    /// `Fx1E`
    AddI { x: usize },
    /// `Fx29`
    LdF { x: usize },
    /// `Fx33`
    LdB { x: usize },
    /// `Fx55`
    StoreRegs { x: usize },
    /// `Fx65`
    LoadRegs { x: usize },
}

impl Instruction {
    /// Selects the Instruction for an opcode.
    ///
    /// The first nibble picks the family. Families 0x0, 0x8, 0xE and 0xF share a first nibble
    /// between several instructions and are told apart by a second lookup on the low nibble
    /// (0x0, 0x8, 0xE) or the low byte (0xF). Code points that match nothing yield `None`,
    /// except in family 0x0 where they are the ignored `Sys` call.
    pub fn decode(op: u16) -> Option<Instruction> {
        let (family, _, _, n) = op.nibbles();
        let (x, y) = (op.x(), op.y());
        let instruction = match family {
            0x0 => match n {
                0x0 => Instruction::Cls,
                0xE => Instruction::Ret,
                _ => Instruction::Sys(op.addr()),
            },
            0x1 => Instruction::Jp(op.addr()),
            0x2 => Instruction::Call(op.addr()),
            0x3 => Instruction::SeByte { x, kk: op.kk() },
            0x4 => Instruction::SneByte { x, kk: op.kk() },
            0x5 => Instruction::SeReg { x, y },
            0x6 => Instruction::LdByte { x, kk: op.kk() },
            0x7 => Instruction::AddByte { x, kk: op.kk() },
            0x8 => match n {
                0x0 => Instruction::LdReg { x, y },
                0x1 => Instruction::Or { x, y },
                0x2 => Instruction::And { x, y },
                0x3 => Instruction::Xor { x, y },
                0x4 => Instruction::AddReg { x, y },
                0x5 => Instruction::Sub { x, y },
                0x6 => Instruction::Shr { x },
                0x7 => Instruction::Subn { x, y },
                0xE => Instruction::Shl { x },
                _ => return None,
            },
            0x9 => Instruction::SneReg { x, y },
            0xA => Instruction::LdI(op.addr()),
            0xB => Instruction::JpV0(op.addr()),
            0xC => Instruction::Rnd { x, kk: op.kk() },
            0xD => Instruction::Drw { x, y, n },
            0xE => match n {
                0xE => Instruction::Skp { x },
                0x1 => Instruction::Sknp { x },
                _ => return None,
            },
            0xF => match op.kk() {
                0x07 => Instruction::LdVxDt { x },
                0x0A => Instruction::LdVxK { x },
                0x15 => Instruction::LdDtVx { x },
                0x18 => Instruction::LdStVx { x },
                0x1E => Instruction::AddI { x },
                0x29 => Instruction::LdF { x },
                0x33 => Instruction::LdB { x },
                0x55 => Instruction::StoreRegs { x },
                0x65 => Instruction::LoadRegs { x },
                _ => return None,
            },
            _ => return None,
        };
        Some(instruction)
    }

    /// Applies the Instruction to `state`.
    /// The pc must already point at the following instruction.
    pub fn execute(self, state: &mut State) -> Result<()> {
        match self {
            Instruction::Sys(_) => {}
            Instruction::Cls => clr(state),
            Instruction::Ret => rts(state)?,
            Instruction::Jp(addr) => jump(state, addr),
            Instruction::Call(addr) => call(state, addr)?,
            Instruction::SeByte { x, kk } => ske(state, x, kk),
            Instruction::SneByte { x, kk } => skne(state, x, kk),
            Instruction::SeReg { x, y } => skre(state, x, y),
            Instruction::LdByte { x, kk } => load(state, x, kk),
            Instruction::AddByte { x, kk } => add(state, x, kk),
            Instruction::LdReg { x, y } => mv(state, x, y),
            Instruction::Or { x, y } => or(state, x, y),
            Instruction::And { x, y } => and(state, x, y),
            Instruction::Xor { x, y } => xor(state, x, y),
            Instruction::AddReg { x, y } => addr(state, x, y),
            Instruction::Sub { x, y } => sub(state, x, y),
            Instruction::Shr { x } => shr(state, x),
            Instruction::Subn { x, y } => subn(state, x, y),
            Instruction::Shl { x } => shl(state, x),
            Instruction::SneReg { x, y } => skrne(state, x, y),
            Instruction::LdI(addr) => loadi(state, addr),
            Instruction::JpV0(addr) => jumpi(state, addr),
            Instruction::Rnd { x, kk } => rand(state, x, kk),
            Instruction::Drw { x, y, n } => draw(state, x, y, n),
            Instruction::Skp { x } => skpr(state, x),
            Instruction::Sknp { x } => skup(state, x),
            Instruction::LdVxDt { x } => moved(state, x),
            Instruction::LdVxK { x } => keyd(state, x),
            Instruction::LdDtVx { x } => lddt(state, x),
            Instruction::LdStVx { x } => ldst(state, x),
            Instruction::AddI { x } => addi(state, x),
            Instruction::LdF { x } => ldspr(state, x),
            Instruction::LdB { x } => bcd(state, x),
            Instruction::StoreRegs { x } => stor(state, x),
            Instruction::LoadRegs { x } => read(state, x),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use crate::error::Error;

    /// Executes `op` the way the cycle driver does: the pc moves past it first.
    fn run(state: &mut State, op: u16) -> Result<()> {
        state.pc += 0x2;
        match Instruction::decode(op) {
            Some(instruction) => instruction.execute(state),
            None => Ok(()),
        }
    }

    fn new_state() -> State {
        State::new(Some(0))
    }

    #[test]
    fn test_decodes_second_level_families() {
        assert_eq!(Instruction::decode(0x00E0), Some(Instruction::Cls));
        assert_eq!(Instruction::decode(0x00EE), Some(Instruction::Ret));
        assert_eq!(Instruction::decode(0x0123), Some(Instruction::Sys(0x123)));
        assert_eq!(Instruction::decode(0x812E), Some(Instruction::Shl { x: 1 }));
        assert_eq!(Instruction::decode(0xE19E), Some(Instruction::Skp { x: 1 }));
        assert_eq!(Instruction::decode(0xF265), Some(Instruction::LoadRegs { x: 2 }));
    }

    #[test]
    fn test_families_0_and_e_select_on_low_nibble() {
        assert_eq!(Instruction::decode(0x0120), Some(Instruction::Cls));
        assert_eq!(Instruction::decode(0x0ABE), Some(Instruction::Ret));
        assert_eq!(Instruction::decode(0xE10E), Some(Instruction::Skp { x: 1 }));
        assert_eq!(Instruction::decode(0xE101), Some(Instruction::Sknp { x: 1 }));
        assert_eq!(Instruction::decode(0xE1A2), None);
    }

    #[test]
    fn test_decodes_direct_families() {
        assert_eq!(
            Instruction::decode(0xD125),
            Some(Instruction::Drw { x: 1, y: 2, n: 5 })
        );
        assert_eq!(Instruction::decode(0x5121), Some(Instruction::SeReg { x: 1, y: 2 }));
        assert_eq!(Instruction::decode(0xBFFF), Some(Instruction::JpV0(0xFFF)));
    }

    #[test]
    fn test_unmapped_opcodes_decode_to_none() {
        for op in [0x8008, 0x800F, 0xE000, 0xE19F, 0xF000, 0xF0FF, 0xF166] {
            assert_eq!(Instruction::decode(op), None, "{:04X}", op);
        }
    }

    #[test]
    fn test_unmapped_opcode_is_a_noop() {
        let mut state = new_state();
        state.v[0x1] = 0x5;
        run(&mut state, 0x8108).unwrap();
        assert_eq!(state.pc, 0x0202);
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_0nnn_sys_is_ignored() {
        let mut state = new_state();
        run(&mut state, 0x0ABC).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = new_state();
        state.frame_buffer[0][0] = 1;
        state.frame_buffer[31][63] = 1;
        run(&mut state, 0x00E0).unwrap();
        assert!(state.frame_buffer.iter().flatten().all(|&p| p == 0));
        assert!(state.draw_flag);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = new_state();
        state.sp = 0x1;
        state.stack[0x0] = 0x0ABC;
        run(&mut state, 0x00EE).unwrap();
        assert_eq!(state.sp, 0x0);
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let mut state = new_state();
        let result = run(&mut state, 0x00EE);
        assert!(matches!(result, Err(Error::StackUnderflow { pc: 0x200 })));
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = new_state();
        run(&mut state, 0x1ABC).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = new_state();
        run(&mut state, 0x2123).unwrap();
        assert_eq!(state.sp, 0x1);
        assert_eq!(state.stack[0x0], 0x0202);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_then_ret_round_trips() {
        let mut state = new_state();
        run(&mut state, 0x2400).unwrap();
        run(&mut state, 0x00EE).unwrap();
        assert_eq!(state.pc, 0x0202);
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_2nnn_call_overflows() {
        let mut state = new_state();
        for _ in 0..16 {
            state.pc = 0x200;
            run(&mut state, 0x2200).unwrap();
        }
        assert_eq!(state.sp, 16);
        let result = run(&mut state, 0x2200);
        assert!(matches!(result, Err(Error::StackOverflow { pc: 0x200 })));
        assert_eq!(state.sp, 16);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut state = new_state();
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut state = new_state();
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(&mut state, 0x5120).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        run(&mut state, 0x5120).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = new_state();
        for x in 0..16u16 {
            run(&mut state, 0x6000 | x << 8 | 0xF0 | x).unwrap();
            assert_eq!(state.v[x as usize], 0xF0 | x as u8);
        }
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = new_state();
        state.v[0x1] = 0xFF;
        state.v[0xF] = 0x7;
        run(&mut state, 0x7102).unwrap();
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x7);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = new_state();
        state.v[0x2] = 0x1;
        run(&mut state, 0x8120).unwrap();
        assert_eq!(state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_or() {
        let mut state = new_state();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(&mut state, 0x8121).unwrap();
        assert_eq!(state.v[0x1], 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut state = new_state();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(&mut state, 0x8122).unwrap();
        assert_eq!(state.v[0x1], 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut state = new_state();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(&mut state, 0x8123).unwrap();
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = new_state();
        state.v[0x1] = 0xEE;
        state.v[0x2] = 0x11;
        state.v[0xF] = 0x1;
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = new_state();
        state.v[0x1] = 0xFF;
        state.v[0x2] = 0x11;
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.v[0x1], 0x10);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy4_add_into_vf_keeps_flag() {
        let mut state = new_state();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x02;
        run(&mut state, 0x8F14).unwrap();
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = new_state();
        state.v[0x1] = 0x33;
        state.v[0x2] = 0x11;
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_equal_is_noborrow() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x12;
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = new_state();
        state.v[0x1] = 0x5;
        run(&mut state, 0x8106).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_nolsb() {
        let mut state = new_state();
        state.v[0x1] = 0x4;
        state.v[0xF] = 0x1;
        run(&mut state, 0x8106).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_ignores_vy() {
        let mut state = new_state();
        state.v[0x1] = 0x8;
        state.v[0x2] = 0xFF;
        run(&mut state, 0x8126).unwrap();
        assert_eq!(state.v[0x1], 0x4);
        assert_eq!(state.v[0x2], 0xFF);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = new_state();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = new_state();
        state.v[0x1] = 0xFF;
        run(&mut state, 0x810E).unwrap();
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = new_state();
        state.v[0x1] = 0x4;
        run(&mut state, 0x810E).unwrap();
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        run(&mut state, 0x9120).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = new_state();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(&mut state, 0x9120).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = new_state();
        run(&mut state, 0xAABC).unwrap();
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = new_state();
        state.v[0x0] = 0x2;
        run(&mut state, 0xBABC).unwrap();
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_bnnn_jp_wraps() {
        let mut state = new_state();
        state.v[0x0] = 0x10;
        run(&mut state, 0xBFF8).unwrap();
        assert_eq!(state.pc, 0x008);
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut state = new_state();
        for _ in 0..64 {
            run(&mut state, 0xC10F).unwrap();
            assert_eq!(state.v[0x1] & 0xF0, 0);
        }
        run(&mut state, 0xC100).unwrap();
        assert_eq!(state.v[0x1], 0);
    }

    #[test]
    fn test_cxkk_rnd_is_reproducible_with_a_seed() {
        let mut a = State::new(Some(42));
        let mut b = State::new(Some(42));
        for _ in 0..8 {
            run(&mut a, 0xC1FF).unwrap();
            run(&mut b, 0xC1FF).unwrap();
            assert_eq!(a.v[0x1], b.v[0x1]);
        }
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = new_state();
        state.v[0x0] = 0x1;
        state.i = State::font_addr(0x0);
        // Draw the 0x0 sprite with a 1x 1y offset
        run(&mut state, 0xD005).unwrap();
        let mut expected = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[1, 1, 1, 1]);
        expected[2][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[3][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[4][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[5][1..5].copy_from_slice(&[1, 1, 1, 1]);
        assert!(state
            .frame_buffer
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| a[..] == b[..]));
        assert_eq!(state.v[0xF], 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_twice_erases_and_collides() {
        let mut state = new_state();
        state.i = State::font_addr(0x0);
        run(&mut state, 0xD005).unwrap();
        assert_eq!(state.v[0xF], 0x0);
        run(&mut state, 0xD005).unwrap();
        assert_eq!(state.v[0xF], 0x1);
        assert!(state.frame_buffer.iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = new_state();
        state.i = 0x300;
        state.memory[0x300] = 0x80;
        state.frame_buffer[0][0] = 1;
        run(&mut state, 0xD001).unwrap();
        assert_eq!(state.v[0xF], 0x1);
        assert_eq!(state.frame_buffer[0][0], 0);
    }

    #[test]
    fn test_dxyn_drw_xors() {
        let mut state = new_state();
        state.i = 0x300;
        state.memory[0x300] = 0b1100_0000;
        state.frame_buffer[0][0..4].copy_from_slice(&[0, 1, 0, 1]);
        run(&mut state, 0xD001).unwrap();
        assert_eq!(state.frame_buffer[0][0..4], [1, 0, 0, 1]);
    }

    #[test]
    fn test_dxyn_drw_wraps() {
        let mut state = new_state();
        state.i = 0x300;
        state.memory[0x300..0x302].copy_from_slice(&[0xFF, 0xFF]);
        state.v[0x1] = 60;
        state.v[0x2] = 31;
        run(&mut state, 0xD122).unwrap();
        assert_eq!(state.frame_buffer[31][60..64], [1, 1, 1, 1]);
        assert_eq!(state.frame_buffer[31][0..4], [1, 1, 1, 1]);
        assert_eq!(state.frame_buffer[0][60..64], [1, 1, 1, 1]);
        assert_eq!(state.frame_buffer[0][0..4], [1, 1, 1, 1]);
        assert_eq!(state.frame_buffer[1][0], 0);
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = new_state();
        state.keys[0xE] = true;
        state.v[0x1] = 0xE;
        run(&mut state, 0xE19E).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = new_state();
        run(&mut state, 0xE19E).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = new_state();
        run(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = new_state();
        state.keys[0xE] = true;
        state.v[0x1] = 0xE;
        run(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = new_state();
        state.delay_timer = 0xF;
        run(&mut state, 0xF107).unwrap();
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_setsregisterneedingkey() {
        let mut state = new_state();
        run(&mut state, 0xF10A).unwrap();
        assert_eq!(state.register_needing_key, Some(0x1));
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = new_state();
        state.v[0x1] = 0xF;
        run(&mut state, 0xF115).unwrap();
        assert_eq!(state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = new_state();
        state.v[0x1] = 0xF;
        run(&mut state, 0xF118).unwrap();
        assert_eq!(state.sound_timer, 0xF);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = new_state();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.i, 0x2);
    }

    #[test]
    fn test_fx1e_add_masks_to_12_bits() {
        let mut state = new_state();
        state.i = 0xFFF;
        state.v[0x1] = 0x2;
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.i, 0x001);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = new_state();
        state.v[0x1] = 0x2;
        run(&mut state, 0xF129).unwrap();
        assert_eq!(state.i, 0x050 + 0xA);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = new_state();
        state.v[0x1] = 234;
        state.i = 0x300;
        run(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x2, 0x3, 0x4]);
    }

    #[test]
    fn test_fx33_ld_small_values() {
        let mut state = new_state();
        state.v[0x1] = 7;
        state.i = 0x300;
        run(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x0, 0x0, 0x7]);
    }

    #[test]
    fn test_fx55_ld() {
        let mut state = new_state();
        state.i = 0x300;
        state.v[0x0..0x6].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        run(&mut state, 0xF455).unwrap();
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx65_ld() {
        let mut state = new_state();
        state.i = 0x300;
        state.memory[0x300..0x306].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        run(&mut state, 0xF465).unwrap();
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx65_ld_wraps_past_end_of_memory() {
        let mut state = new_state();
        state.i = 0xFFF;
        state.memory[0xFFF] = 0xAA;
        state.memory[0x000] = 0xBB;
        run(&mut state, 0xF165).unwrap();
        assert_eq!(state.v[0x0..0x2], [0xAA, 0xBB]);
    }
}
