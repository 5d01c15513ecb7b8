//! Two-pass assembler for LC-2K.
//!
//! Pass 1 collects every label into a [`label::Labels`] table, pass 2 parses
//! each line into a [`parser::Code`] and resolves it to a machine word. Nothing
//! is produced unless every line assembles.

pub mod error;
pub mod label;
pub mod lexer;
pub mod parser;
pub mod util;

use std::io::{self, Write};

use error::LineError;
use label::Labels;
use parser::{Code, Word};

#[derive(Debug)]
pub struct Program {
    pub labels: Labels,
    pub codes: Vec<Code>,
    pub words: Vec<Word>,
}

pub fn assemble(src: &str) -> Result<Program, LineError> {
    let lines = lexer::split(src)?;
    log::debug!("read {} lines", lines.len());

    let labels = Labels::collect(&lines)?;
    log::debug!("collected {} labels", labels.len());

    let mut codes = Vec::with_capacity(lines.len());
    let mut words = Vec::with_capacity(lines.len());
    for (pc, line) in lines.iter().enumerate() {
        let at = |error| LineError { line: pc, error };
        let code = Code::parse(line).map_err(at)?;
        let word = code.resolve(pc, &labels).map_err(at)?;
        log::trace!("{:>5}: {:?} -> {}", pc, code, word.to_bin());
        codes.push(code);
        words.push(word);
    }

    Ok(Program {
        labels,
        codes,
        words,
    })
}

impl Program {
    pub fn bins(&self) -> impl Iterator<Item = i32> + '_ {
        self.words.iter().map(Word::to_bin)
    }

    /// One signed decimal word per line.
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for bin in self.bins() {
            writeln!(w, "{}", bin)?;
        }
        Ok(())
    }
}
