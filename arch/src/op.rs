use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum OpKind {
    ADD = 0,
    NOR = 1,
    LW = 2,
    SW = 3,
    BEQ = 4,
    JALR = 5,
    HALT = 6,
    NOOP = 7,
}

impl OpKind {
    /// Mnemonics are case sensitive: `add` is an opcode, `ADD` is not.
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(Error::UnknownOpcode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// regA regB destReg
    R,
    /// regA regB offsetField
    I,
    /// regA regB
    J,
    /// no operands
    O,
}

impl OpKind {
    pub fn format(&self) -> Format {
        use OpKind::*;
        match self {
            ADD | NOR => Format::R,
            LW | SW | BEQ => Format::I,
            JALR => Format::J,
            HALT | NOOP => Format::O,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse() {
        assert_eq!(OpKind::parse("add"), Ok(OpKind::ADD));
        assert_eq!(OpKind::parse("noop"), Ok(OpKind::NOOP));
        assert_eq!(
            OpKind::parse("ADD"),
            Err(Error::UnknownOpcode("ADD".to_string()))
        );
        assert_eq!(
            OpKind::parse("hoge"),
            Err(Error::UnknownOpcode("hoge".to_string()))
        );
        assert!(OpKind::parse("").is_err());
    }

    #[test]
    fn test_opcode_values() {
        for (i, op) in OpKind::iter().enumerate() {
            assert_eq!(u8::from(op), i as u8);
            assert_eq!(OpKind::try_from(i as u8).ok(), Some(op));
            assert_eq!(OpKind::parse(&op.to_string()), Ok(op));
        }
        assert!(OpKind::try_from(8u8).is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(OpKind::ADD.format(), Format::R);
        assert_eq!(OpKind::NOR.format(), Format::R);
        assert_eq!(OpKind::LW.format(), Format::I);
        assert_eq!(OpKind::SW.format(), Format::I);
        assert_eq!(OpKind::BEQ.format(), Format::I);
        assert_eq!(OpKind::JALR.format(), Format::J);
        assert_eq!(OpKind::HALT.format(), Format::O);
        assert_eq!(OpKind::NOOP.format(), Format::O);
    }
}
