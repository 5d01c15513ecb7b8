use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("error in reading address {0}: `{1}`")]
    ParseWord(usize, String),

    #[error("Program of {0} words does not fit in memory")]
    MemoryFull(usize),

    #[error("Invalid address {addr} at pc {pc}")]
    InvalidAddress { pc: i32, addr: i64 },

    #[error(transparent)]
    Arch(#[from] arch::error::Error),

    #[error("Failed to load dump config: {0}")]
    Config(String, #[source] serde_yaml::Error),
}
