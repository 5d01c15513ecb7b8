use std::fmt::Write;

use crate::model::{State, Stop};

/// One `memory[i]=v` line per word of the loaded image.
pub fn loaded(state: &State) -> String {
    let mut out = String::new();
    for (addr, word) in state.memory().iter().enumerate() {
        let _ = writeln!(out, "memory[{}]={}", addr, word);
    }
    out
}

/// Closing report: halt notice, instruction count and final state.
pub fn summary(state: &State, stop: Stop) -> String {
    let mut out = String::new();
    if stop == Stop::Halted {
        out.push_str("machine halted\n");
    }
    let _ = writeln!(out, "total of {} instructions executed", state.instructions());
    out.push_str("final state of machine:\n");
    let _ = writeln!(out, "{}", state);
    out
}
