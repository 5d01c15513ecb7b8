use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown opcode: `{0}`")]
    UnknownOpcode(String),

    #[error("Register `{0}` is not an integer")]
    NonIntegerRegister(String),

    #[error("Register {0} out of range [0, 7]")]
    RegisterRange(i64),

    #[error("Invalid opcode {opcode} in word {word}")]
    InvalidOpcode { opcode: u8, word: u32 },
}
