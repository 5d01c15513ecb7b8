// ----------------------------------------------------------------------------
// Bit layout
//
//  31    28 27       22 21  19 18  16 15            0
// +--------+-----------+------+------+---------------+
// | unused |  opcode   | regA | regB | field         |
// +--------+-----------+------+------+---------------+

pub const OPCODE_SHIFT: u32 = 22;
pub const REG_A_SHIFT: u32 = 19;
pub const REG_B_SHIFT: u32 = 16;

/// Six bits are read back on decode so that stray high bits land in an
/// invalid opcode instead of aliasing a real one.
pub const OPCODE_MASK: u32 = 0x3F;
pub const REG_MASK: u32 = 0x7;
pub const FIELD_MASK: u32 = 0xFFFF;

pub const OFFSET_MIN: i64 = -32768;
pub const OFFSET_MAX: i64 = 32767;

// ----------------------------------------------------------------------------

pub fn enc_format(opcode: u8, reg_a: u8, reg_b: u8, field: u16) -> u32 {
    ((opcode as u32) << OPCODE_SHIFT)
        | (((reg_a as u32) & REG_MASK) << REG_A_SHIFT)
        | (((reg_b as u32) & REG_MASK) << REG_B_SHIFT)
        | ((field as u32) & FIELD_MASK)
}

pub fn dec_format(bin: u32) -> (u8, u8, u8, u16) {
    let opcode = ((bin >> OPCODE_SHIFT) & OPCODE_MASK) as u8;
    let reg_a = ((bin >> REG_A_SHIFT) & REG_MASK) as u8;
    let reg_b = ((bin >> REG_B_SHIFT) & REG_MASK) as u8;
    let field = (bin & FIELD_MASK) as u16;
    (opcode, reg_a, reg_b, field)
}

/// 16-bit two's complement field to a full-width integer.
pub fn sign_extend(field: u16) -> i32 {
    field as i16 as i32
}

pub fn offset_in_range(offset: i64) -> bool {
    (OFFSET_MIN..=OFFSET_MAX).contains(&offset)
}

// ----------------------------------------------------------------------------
