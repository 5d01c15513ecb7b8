pub mod error;
pub mod format;
pub mod inst;
pub mod op;
pub mod reg;

/// Number of general purpose registers.
pub const NUM_REGS: usize = 8;

/// Number of words of addressable memory.
pub const NUM_MEMORY: usize = 65536;
