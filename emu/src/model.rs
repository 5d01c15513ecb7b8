use std::fmt;
use std::fs::File;
use std::io::Read;

use arch::{inst::Inst, reg::Reg, NUM_MEMORY, NUM_REGS};

use crate::error::Error;
use crate::hooks::Hook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

/// Why [`State::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    Halted,
    Limit,
}

#[derive(Debug, Clone)]
pub struct State {
    pub pc: i32,
    reg: [i32; NUM_REGS],
    mem: Vec<i32>,
    num_memory: usize,
    extent: usize,
    status: Status,
    count: u64,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

// Register & memory access
impl State {
    pub fn get(&self, reg: Reg) -> i32 {
        self.reg[reg.index()]
    }

    pub fn set(&mut self, reg: Reg, val: i32) {
        self.reg[reg.index()] = val;
    }

    pub fn regs(&self) -> &[i32; NUM_REGS] {
        &self.reg
    }

    pub fn mem(&self, addr: usize) -> Option<i32> {
        self.mem.get(addr).copied()
    }

    /// Memory up to the highest address loaded or stored so far.
    pub fn memory(&self) -> &[i32] {
        &self.mem[..self.extent]
    }

    pub fn num_memory(&self) -> usize {
        self.num_memory
    }

    pub fn instructions(&self) -> u64 {
        self.count
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    fn data_addr(&self, addr: i64) -> Result<usize, Error> {
        match usize::try_from(addr) {
            Ok(a) if a < NUM_MEMORY => Ok(a),
            _ => Err(Error::InvalidAddress { pc: self.pc, addr }),
        }
    }

    fn load_word(&self, addr: i64) -> Result<i32, Error> {
        let addr = self.data_addr(addr)?;
        Ok(self.mem[addr])
    }

    fn store_word(&mut self, addr: i64, val: i32) -> Result<(), Error> {
        let addr = self.data_addr(addr)?;
        self.mem[addr] = val;
        self.extent = self.extent.max(addr + 1);
        Ok(())
    }
}

// Loading
impl State {
    pub fn new() -> Self {
        State {
            pc: 0,
            reg: [0; NUM_REGS],
            mem: vec![0; NUM_MEMORY],
            num_memory: 0,
            extent: 0,
            status: Status::Running,
            count: 0,
        }
    }

    pub fn load(words: &[i32]) -> Result<Self, Error> {
        if words.len() > NUM_MEMORY {
            return Err(Error::MemoryFull(words.len()));
        }
        let mut state = State::new();
        state.mem[..words.len()].copy_from_slice(words);
        state.num_memory = words.len();
        state.extent = words.len();
        Ok(state)
    }

    pub fn load_file(path: &str) -> Result<Self, Error> {
        let mut file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        let mut src = String::new();
        file.read_to_string(&mut src)
            .map_err(|e| Error::FileRead(path.to_string(), e))?;
        State::load(&parse_words(&src)?)
    }
}

/// Machine code text: one signed decimal word per line, anything after it ignored.
pub fn parse_words(src: &str) -> Result<Vec<i32>, Error> {
    src.lines()
        .enumerate()
        .map(|(addr, line)| {
            line.split_whitespace()
                .next()
                .and_then(|word| word.parse::<i32>().ok())
                .ok_or_else(|| Error::ParseWord(addr, line.to_string()))
        })
        .collect()
}

// Execution
impl State {
    /// Fetch, decode and execute one instruction.
    /// Returns the address it was fetched from.
    pub fn step(&mut self) -> Result<(usize, Inst), Error> {
        let addr = match usize::try_from(self.pc) {
            Ok(a) if a < self.extent => a,
            _ => {
                return Err(Error::InvalidAddress {
                    pc: self.pc,
                    addr: self.pc as i64,
                })
            }
        };
        let inst = Inst::from_bin(self.mem[addr] as u32)?;

        match inst {
            Inst::ADD(a, b, dest) => self.calc(a, b, dest, |x, y| x.wrapping_add(y)),
            Inst::NOR(a, b, dest) => self.calc(a, b, dest, |x, y| !(x | y)),
            Inst::LW(a, b, off) => {
                let val = self.load_word(self.get(a) as i64 + off as i64)?;
                self.set(b, val);
                self.pc += 1;
            }
            Inst::SW(a, b, off) => {
                self.store_word(self.get(a) as i64 + off as i64, self.get(b))?;
                self.pc += 1;
            }
            Inst::BEQ(a, b, off) => {
                self.pc += 1;
                if self.get(a) == self.get(b) {
                    self.pc += off as i32;
                }
            }
            Inst::JALR(a, b) => {
                // target is read before the link register is written
                let target = self.get(a);
                self.set(b, self.pc + 1);
                self.pc = target;
            }
            Inst::HALT => {
                self.pc += 1;
                self.status = Status::Halted;
            }
            Inst::NOOP => self.pc += 1,
        }

        self.count += 1;
        Ok((addr, inst))
    }

    fn calc(&mut self, a: Reg, b: Reg, dest: u16, f: impl Fn(i32, i32) -> i32) {
        let val = f(self.get(a), self.get(b));
        self.set(Reg::from_bits(dest as u32), val);
        self.pc += 1;
    }

    /// Run until halt, an invalid access, or `tmax` instructions.
    pub fn run(
        &mut self,
        hooks: &mut [Box<dyn Hook>],
        tmax: Option<u64>,
    ) -> Result<Stop, Error> {
        for hook in hooks.iter_mut() {
            hook.init(self);
        }
        for time in 0..tmax.unwrap_or(u64::MAX) {
            let (addr, inst) = self.step()?;
            for hook in hooks.iter_mut() {
                hook.exec(time, addr, &inst, self);
            }
            if self.is_halted() {
                return Ok(Stop::Halted);
            }
        }
        Ok(Stop::Limit)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n@@@")?;
        writeln!(f, "state:")?;
        writeln!(f, "\tpc {}", self.pc)?;
        writeln!(f, "\tmemory:")?;
        for (i, v) in self.memory().iter().enumerate() {
            writeln!(f, "\t\tmem[ {} ] {}", i, v)?;
        }
        writeln!(f, "\tregisters:")?;
        for (i, v) in self.reg.iter().enumerate() {
            writeln!(f, "\t\treg[ {} ] {}", i, v)?;
        }
        write!(f, "end state")
    }
}
