//! Instruction-level simulator for LC-2K machine code.

pub mod error;
pub mod hooks;
pub mod model;
pub mod report;
