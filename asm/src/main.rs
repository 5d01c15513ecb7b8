use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use lc2kasm::{error::Error, util::print_dump, Program};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Assembly source file
    input: String,

    /// Machine code output file
    output: String,

    /// Dump assembled listing and label table
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("1. Read {}", args.input);
    let src = match read(&args.input) {
        Ok(src) => src,
        Err(err) => {
            err.print();
            return ExitCode::FAILURE;
        }
    };

    log::info!("2. Resolve labels & generate words");
    let program = match lc2kasm::assemble(&src) {
        Ok(program) => program,
        Err(err) => {
            let lines: Vec<&str> = src.lines().collect();
            err.print_diag(&args.input, &lines);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "  {} words, {} labels",
        program.words.len(),
        program.labels.len()
    );

    if args.dump {
        print_dump(&program);
    }

    log::info!("3. Write {}", args.output);
    if let Err(err) = write(&args.output, &program) {
        err.print();
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn read(path: &str) -> Result<String, Error> {
    let mut file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
    let mut src = String::new();
    file.read_to_string(&mut src)
        .map_err(|e| Error::FileRead(path.to_string(), e))?;
    Ok(src)
}

fn write(path: &str, program: &Program) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| Error::FileCreate(path.to_string(), e))?;
    let mut w = BufWriter::new(file);
    program
        .write(&mut w)
        .and_then(|_| w.flush())
        .map_err(|e| Error::FileWrite(path.to_string(), e))
}
