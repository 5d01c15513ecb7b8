use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Arch(#[from] arch::error::Error),

    #[error("Missing operand")]
    MissingOperand,

    #[error("Duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("Undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("Invalid label: `{0}`")]
    InvalidLabel(String),

    #[error("Circular .fill reference through label `{0}`")]
    CircularLabel(String),

    #[error("Offset `{0}` out of range [-32768, 32767]")]
    OffsetRange(String),

    #[error("Value `{0}` does not fit in a 32-bit word")]
    WordRange(String),

    #[error("Line too long (at most {0} characters)")]
    LineTooLong(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
        if let Some(source) = std::error::Error::source(self) {
            cprintln!("  <blue>caused by</>: {}", source);
        }
    }
}

/// An assembly error tied to the zero-based source line it came from.
#[derive(Error, Debug)]
#[error("line {}: {}", .line + 1, .error)]
pub struct LineError {
    pub line: usize,
    #[source]
    pub error: Error,
}

impl LineError {
    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[&str]) {
        cprintln!("<red,bold>error</>: {}", self.error);

        let line_num = self.line + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");

        let line_content = lines.get(self.line).copied().unwrap_or("");
        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}
