use arch::inst::Inst;
use color_print::cformat;

use crate::model::State;

use super::Hook;

#[derive(Debug, Default)]
pub struct Trace;

impl Trace {
    pub fn new() -> Self {
        Trace
    }

    pub fn render(&self, time: u64, addr: usize, inst: &Inst, state: &State) -> String {
        cformat!(
            "<dim>[{:0>6}]</> {:>5}: {} <dim>-> pc {}</>",
            time,
            addr,
            inst.cformat(),
            state.pc
        )
    }
}

impl Hook for Trace {
    fn init(&mut self, _state: &State) {
        println!(" * Trace");
    }

    fn exec(&mut self, time: u64, addr: usize, inst: &Inst, state: &State) {
        println!("{}", self.render(time, addr, inst, state));
    }
}
