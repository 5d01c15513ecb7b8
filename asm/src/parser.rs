use arch::{
    format::{offset_in_range, FIELD_MASK},
    inst::Inst,
    op::{Format, OpKind},
    reg::Reg,
};
use color_print::cformat;

use crate::{error::Error, label::Labels, lexer::Line};

// ----------------------------------------------------------------------------
// Operation

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    ADD(Reg, Reg, u16),
    NOR(Reg, Reg, u16),
    LW(Reg, Reg, Imm),
    SW(Reg, Reg, Imm),
    BEQ(Reg, Reg, Imm),
    JALR(Reg, Reg),
    HALT,
    NOOP,
    FILL(Imm),
}

impl Code {
    pub fn parse(line: &Line) -> Result<Code, Error> {
        // Get argument by index and parse it with the given function
        // Example: arg!(0, Reg::parse) -> Reg
        macro_rules! arg {
            ($index:expr, $parse:path) => {{
                let arg = line.args[$index];
                if arg.is_empty() {
                    return Err(Error::MissingOperand);
                }
                $parse(arg)?
            }};
        }

        if line.is_fill() {
            return Ok(Code::FILL(arg!(0, Imm::parse)));
        }
        let kind = OpKind::parse(line.opcode)?;
        let code = match kind.format() {
            Format::R => {
                let (a, b, dest) = (arg!(0, Reg::parse), arg!(1, Reg::parse), arg!(2, parse_dest));
                match kind {
                    OpKind::NOR => Code::NOR(a, b, dest),
                    _ => Code::ADD(a, b, dest),
                }
            }
            Format::I => {
                let (a, b, imm) = (arg!(0, Reg::parse), arg!(1, Reg::parse), arg!(2, parse_offset));
                match kind {
                    OpKind::LW => Code::LW(a, b, imm),
                    OpKind::SW => Code::SW(a, b, imm),
                    _ => Code::BEQ(a, b, imm),
                }
            }
            Format::J => Code::JALR(arg!(0, Reg::parse), arg!(1, Reg::parse)),
            Format::O => match kind {
                OpKind::HALT => Code::HALT,
                _ => Code::NOOP,
            },
        };
        Ok(code)
    }
}

/// Offsets too wide to even parse are out of range, not bad words.
fn parse_offset(s: &str) -> Result<Imm, Error> {
    Imm::parse(s).map_err(|e| match e {
        Error::WordRange(text) => Error::OffsetRange(text),
        e => e,
    })
}

/// The R-type destination is taken as written and truncated to the field.
fn parse_dest(s: &str) -> Result<u16, Error> {
    match s.parse::<i64>() {
        Ok(v) => Ok((v & FIELD_MASK as i64) as u16),
        Err(_) => Err(arch::error::Error::NonIntegerRegister(s.to_string()).into()),
    }
}

impl Code {
    pub fn resolve(&self, pc: usize, labels: &Labels) -> Result<Word, Error> {
        // Symbolic branch targets become pc-relative; literals are used as written.
        let offset = |imm: &Imm, relative: bool| -> Result<i16, Error> {
            let mut v = imm.resolve(labels)?;
            if relative && matches!(imm, Imm::Ident(_)) {
                v -= pc as i64 + 1;
            }
            if !offset_in_range(v) {
                return Err(Error::OffsetRange(v.to_string()));
            }
            Ok(v as i16)
        };

        let inst = match self {
            Code::ADD(a, b, dest) => Inst::ADD(*a, *b, *dest),
            Code::NOR(a, b, dest) => Inst::NOR(*a, *b, *dest),
            Code::LW(a, b, imm) => Inst::LW(*a, *b, offset(imm, false)?),
            Code::SW(a, b, imm) => Inst::SW(*a, *b, offset(imm, false)?),
            Code::BEQ(a, b, imm) => Inst::BEQ(*a, *b, offset(imm, true)?),
            Code::JALR(a, b) => Inst::JALR(*a, *b),
            Code::HALT => Inst::HALT,
            Code::NOOP => Inst::NOOP,
            Code::FILL(Imm::Literal(v)) => return Ok(Word::Data(fill_value(*v, &v.to_string())?)),
            Code::FILL(Imm::Ident(name)) => return Ok(Word::Data(labels.resolve(name)?)),
        };
        Ok(Word::Inst(inst))
    }
}

impl Code {
    pub fn cformat(&self, labels: &Labels) -> String {
        macro_rules! opfmt {
            ($name:expr, $a:expr, $b:expr, $c:expr) => {
                cformat!("<red>{:<6}</><blue>{:<2} {:<2} {:<6}</>", $name, $a, $b, $c)
            };
        }
        match self {
            Code::ADD(a, b, dest) => opfmt!("add", a, b, dest),
            Code::NOR(a, b, dest) => opfmt!("nor", a, b, dest),
            Code::LW(a, b, imm) => opfmt!("lw", a, b, imm.cfmt(labels)),
            Code::SW(a, b, imm) => opfmt!("sw", a, b, imm.cfmt(labels)),
            Code::BEQ(a, b, imm) => opfmt!("beq", a, b, imm.cfmt(labels)),
            Code::JALR(a, b) => opfmt!("jalr", a, b, ""),
            Code::HALT => opfmt!("halt", "", "", ""),
            Code::NOOP => opfmt!("noop", "", "", ""),
            Code::FILL(imm) => opfmt!(".fill", imm.cfmt(labels), "", ""),
        }
    }
}

// ----------------------------------------------------------------------------
// Output word

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Inst(Inst),
    Data(i32),
}

impl Word {
    pub fn to_bin(&self) -> i32 {
        match self {
            Word::Inst(inst) => inst.to_bin() as i32,
            Word::Data(v) => *v,
        }
    }
}

// ----------------------------------------------------------------------------
// Immidiate

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(i64),
    Ident(String),
}

impl Imm {
    pub fn parse(s: &str) -> Result<Imm, Error> {
        if s.is_empty() {
            return Err(Error::MissingOperand);
        }
        match s.parse::<i64>() {
            Ok(v) => Ok(Imm::Literal(v)),
            Err(_) if is_numeric(s) => Err(Error::WordRange(s.to_string())),
            Err(_) => Ok(Imm::Ident(s.to_string())),
        }
    }

    pub fn resolve(&self, labels: &Labels) -> Result<i64, Error> {
        match self {
            Imm::Literal(v) => Ok(*v),
            Imm::Ident(s) => labels.resolve(s).map(i64::from),
        }
    }

    fn cfmt(&self, labels: &Labels) -> String {
        match self {
            Imm::Ident(s) => match labels.get(s) {
                Some(label) => cformat!("<g>{}({})</>", s, label.value),
                None => cformat!("<r,u>{}</>", s),
            },
            Imm::Literal(v) => cformat!("<y>{}</>", v),
        }
    }
}

fn is_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `.fill` values must fit in a signed 32-bit word.
pub fn fill_value(v: i64, text: &str) -> Result<i32, Error> {
    i32::try_from(v).map_err(|_| Error::WordRange(text.to_string()))
}
