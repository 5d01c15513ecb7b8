use std::process::ExitCode;

use clap::Parser;
use color_print::cprintln;
use env_logger::Env;

use lc2kemu::error::Error;
use lc2kemu::hooks::{dump::Dump, trace::Trace, Hook};
use lc2kemu::model::{State, Stop};
use lc2kemu::report;

#[derive(Parser, Debug)]
#[clap(version, about = "Simulator for LC-2K machine code")]
struct Args {
    /// Stop after this many instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// YAML file selecting registers and memory to print per address
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Print the whole machine state around every instruction
    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Print every executed instruction
    #[arg(long)]
    trace: bool,

    /// Machine code file, one decimal word per line
    input_file: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    // ------------------------------------------------------------------------
    // Initialize state machine model
    let mut state = State::load_file(&args.input_file)?;
    print!("{}", report::loaded(&state));
    log::info!("loaded {} words from {}", state.num_memory(), args.input_file);

    // ------------------------------------------------------------------------
    // Initialize hooks
    let mut hooks: Vec<Box<dyn Hook>> =
        vec![Box::new(Dump::arg(args.dump_cfg, args.dump_all)?)];
    if args.trace {
        hooks.push(Box::new(Trace::new()));
    }

    // ------------------------------------------------------------------------
    // Main loop
    let stop = state.run(&mut hooks, args.tmax)?;
    if stop == Stop::Limit {
        log::warn!(
            "stopped after {} instructions without halting",
            state.instructions()
        );
    }
    print!("{}", report::summary(&state, stop));
    Ok(())
}
