use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::Error, NUM_REGS};

/// Register index, always in `0..NUM_REGS`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Reg(u8);

impl Reg {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.parse::<i64>() {
            Ok(n) => Reg::try_from(n),
            Err(_) => Err(Error::NonIntegerRegister(s.to_string())),
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Takes the low three bits of a decoded register field.
    pub fn from_bits(bits: u32) -> Self {
        Reg((bits & 0x7) as u8)
    }
}

impl TryFrom<i64> for Reg {
    type Error = Error;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        if (0..NUM_REGS as i64).contains(&n) {
            Ok(Reg(n as u8))
        } else {
            Err(Error::RegisterRange(n))
        }
    }
}

impl From<Reg> for u8 {
    fn from(reg: Reg) -> u8 {
        reg.0
    }
}

impl From<Reg> for u32 {
    fn from(reg: Reg) -> u32 {
        reg.0 as u32
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
