use color_print::cformat;

use crate::{
    error::Error,
    format::{dec_format, enc_format, sign_extend},
    op::OpKind,
    reg::Reg,
};

/// A decoded LC-2K instruction.
///
/// R-type instructions keep the raw 16-bit destination field; only its low
/// three bits select the register when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    ADD(Reg, Reg, u16),
    NOR(Reg, Reg, u16),
    LW(Reg, Reg, i16),
    SW(Reg, Reg, i16),
    BEQ(Reg, Reg, i16),
    JALR(Reg, Reg),
    HALT,
    NOOP,
}

impl Inst {
    pub fn kind(&self) -> OpKind {
        match self {
            Inst::ADD(..) => OpKind::ADD,
            Inst::NOR(..) => OpKind::NOR,
            Inst::LW(..) => OpKind::LW,
            Inst::SW(..) => OpKind::SW,
            Inst::BEQ(..) => OpKind::BEQ,
            Inst::JALR(..) => OpKind::JALR,
            Inst::HALT => OpKind::HALT,
            Inst::NOOP => OpKind::NOOP,
        }
    }

    pub fn to_bin(&self) -> u32 {
        let op = self.kind().into();
        match *self {
            Inst::ADD(a, b, dest) | Inst::NOR(a, b, dest) => {
                enc_format(op, a.into(), b.into(), dest)
            }
            Inst::LW(a, b, off) | Inst::SW(a, b, off) | Inst::BEQ(a, b, off) => {
                enc_format(op, a.into(), b.into(), off as u16)
            }
            Inst::JALR(a, b) => enc_format(op, a.into(), b.into(), 0),
            Inst::HALT | Inst::NOOP => enc_format(op, 0, 0, 0),
        }
    }

    pub fn from_bin(bin: u32) -> Result<Inst, Error> {
        let (opcode, a, b, field) = dec_format(bin);
        let kind =
            OpKind::try_from(opcode).map_err(|_| Error::InvalidOpcode { opcode, word: bin })?;
        let a = Reg::from_bits(a as u32);
        let b = Reg::from_bits(b as u32);
        let off = sign_extend(field) as i16;
        Ok(match kind {
            OpKind::ADD => Inst::ADD(a, b, field),
            OpKind::NOR => Inst::NOR(a, b, field),
            OpKind::LW => Inst::LW(a, b, off),
            OpKind::SW => Inst::SW(a, b, off),
            OpKind::BEQ => Inst::BEQ(a, b, off),
            OpKind::JALR => Inst::JALR(a, b),
            OpKind::HALT => Inst::HALT,
            OpKind::NOOP => Inst::NOOP,
        })
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! opfmt {
            ($name:expr, $a:expr, $b:expr, $c:expr) => {
                cformat!("<red>{:<5}</><blue>{:<2} {:<2} {:<6}</>", $name, $a, $b, $c)
            };
        }
        let name = self.kind().to_string();
        match self {
            Inst::ADD(a, b, dest) | Inst::NOR(a, b, dest) => opfmt!(name, a, b, dest),
            Inst::LW(a, b, off) | Inst::SW(a, b, off) | Inst::BEQ(a, b, off) => {
                opfmt!(name, a, b, off)
            }
            Inst::JALR(a, b) => opfmt!(name, a, b, ""),
            Inst::HALT | Inst::NOOP => opfmt!(name, "", "", ""),
        }
    }
}
