pub mod dump;
pub mod trace;

use arch::inst::Inst;

use crate::model::State;

/// Observer called by [`State::run`] once before the first instruction and
/// after every executed instruction.
pub trait Hook {
    fn init(&mut self, state: &State);
    fn exec(&mut self, time: u64, addr: usize, inst: &Inst, state: &State);
}
