use crate::error::{Error, LineError};

/// Line buffer size; a line must fit in it together with its newline.
pub const MAX_LINE_LENGTH: usize = 1000;

/// One source line split into its fields.
///
/// A label is present only when the line starts in column 0. Missing fields
/// are empty strings and anything after the third argument is a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line<'a> {
    pub label: Option<&'a str>,
    pub opcode: &'a str,
    pub args: [&'a str; 3],
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

impl<'a> Line<'a> {
    pub fn parse(raw: &'a str) -> Line<'a> {
        let mut tokens = raw.split(is_space).filter(|t| !t.is_empty());
        let label = match raw.chars().next() {
            Some(c) if !is_space(c) => tokens.next(),
            _ => None,
        };
        let mut next = || tokens.next().unwrap_or("");
        let opcode = next();
        let args = [next(), next(), next()];
        Line {
            label,
            opcode,
            args,
        }
    }

    pub fn is_fill(&self) -> bool {
        self.opcode == ".fill"
    }
}

/// Split source text into lines. Every line occupies one address, blank ones included.
pub fn split(src: &str) -> Result<Vec<Line<'_>>, LineError> {
    src.split_inclusive('\n')
        .enumerate()
        .map(|(idx, raw)| {
            let raw = raw.strip_suffix('\n').unwrap_or(raw);
            if raw.len() >= MAX_LINE_LENGTH - 1 {
                return Err(LineError {
                    line: idx,
                    error: Error::LineTooLong(MAX_LINE_LENGTH - 2),
                });
            }
            Ok(Line::parse(raw))
        })
        .collect()
}
