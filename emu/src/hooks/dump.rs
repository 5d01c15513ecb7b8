use arch::inst::Inst;
use arch::reg::Reg;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

use crate::error::Error;
use crate::model::State;

use super::Hook;

#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

/// Instruction address -> what to print after it executes.
#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<usize, Config>);

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    regs: Vec<Reg>,
    #[serde(default)]
    mem: Vec<usize>,
}

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        match file {
            Some(fname) => {
                let yaml = fs::read_to_string(&fname)
                    .map_err(|e| Error::FileOpen(fname.clone(), e))?;
                Self::from_yaml(Some(fname), &yaml, all)
            }
            None => Ok(Self {
                file: None,
                all,
                list: List::default(),
            }),
        }
    }

    pub fn from_yaml(file: Option<String>, yaml: &str, all: bool) -> Result<Self, Error> {
        let list: List = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(file.clone().unwrap_or_default(), e))?;
        log::debug!("dump config: {:?}", list);
        Ok(Self { file, all, list })
    }

    fn get(&self, pc: usize) -> Option<&Config> {
        self.list.0.get(&pc)
    }

    /// Lines printed after the instruction at `addr` executes.
    /// The full state doubles as the state before the next instruction,
    /// so none is printed once the machine has halted.
    pub fn render(&self, addr: usize, state: &State) -> Vec<String> {
        let mut out = vec![];
        if self.all && !state.is_halted() {
            out.push(state.to_string());
        }
        if let Some(cfg) = self.get(addr) {
            out.push(" +----------------------------+".to_string());
            for reg in &cfg.regs {
                out.push(format!(
                    " | [{:0>4}] reg[ {} ] {:>11} |",
                    addr,
                    reg,
                    state.get(*reg)
                ));
            }
            for a in &cfg.mem {
                let val = match state.mem(*a) {
                    Some(v) => format!("{:>11}", v),
                    None => format!("{:>11}", "-"),
                };
                out.push(format!(" | [{:0>4}] mem[ {} ] {} |", addr, a, val));
            }
            out.push(" +----------------------------+".to_string());
        }
        out
    }
}

impl Hook for Dump {
    fn init(&mut self, state: &State) {
        if self.all {
            println!(" * Dump all");
            println!("{}", state);
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
    }

    fn exec(&mut self, _time: u64, addr: usize, _inst: &Inst, state: &State) {
        for line in self.render(addr, state) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State {
        let mut state = State::load(&[6 << 22, 11, 22]).unwrap();
        state.set(Reg::try_from(3i64).unwrap(), -4);
        state
    }

    #[test]
    fn test_config() {
        let yaml = "0:\n  regs: [3]\n  mem: [2, 70000]\n5:\n  mem: [1]\n";
        let dump = Dump::from_yaml(None, yaml, false).unwrap();
        let lines = dump.render(0, &state());
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("reg[ 3 ]") && lines[1].ends_with("-4 |"));
        assert!(lines[2].contains("mem[ 2 ]") && lines[2].ends_with("22 |"));
        assert!(lines[3].contains("mem[ 70000 ]") && lines[3].ends_with("- |"));

        assert!(dump.render(1, &state()).is_empty());
        assert_eq!(dump.render(5, &state()).len(), 3);
    }

    #[test]
    fn test_dump_all() {
        let dump = Dump::from_yaml(None, "{}", true).unwrap();
        let lines = dump.render(7, &state());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("\n@@@\nstate:\n"));
    }

    #[test]
    fn test_dump_all_stops_at_halt() {
        let dump = Dump::from_yaml(None, "{}", true).unwrap();
        let mut state = State::load(&[7 << 22, 6 << 22]).unwrap();

        state.step().unwrap();
        let lines = dump.render(0, &state);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\tpc 1\n"));

        state.step().unwrap();
        assert!(state.is_halted());
        assert!(dump.render(1, &state).is_empty());
    }

    #[test]
    fn test_arg_reads_file() {
        let path = std::env::temp_dir().join(format!("lc2kemu-{}.yaml", std::process::id()));
        fs::write(&path, "1:\n  regs: [0, 7]\n").unwrap();
        let fname = path.to_string_lossy().to_string();

        let dump = Dump::arg(Some(fname.clone()), false).unwrap();
        assert_eq!(dump.render(1, &state()).len(), 4);
        assert!(dump.render(0, &state()).is_empty());
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            Dump::arg(Some(fname), false),
            Err(Error::FileOpen(..))
        ));
        let dump = Dump::arg(None, true).unwrap();
        assert_eq!(dump.render(0, &state()).len(), 1);
    }

    #[test]
    fn test_bad_register() {
        assert!(matches!(
            Dump::from_yaml(None, "0:\n  regs: [8]\n", false),
            Err(Error::Config(..))
        ));
    }
}
