//! EXORCISM - ESOP cube minimization, command line interface
//!
//! Reads a two-level form from a PLA file, minimizes every output with the
//! exor-link local search and writes the result back out, one PLA per
//! output function.

use clap::Parser;
use esop_logic::{exorcise, PlaReader, PlaWriter, TwoLevel};
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "exorcism")]
#[command(about = "EXORCISM exclusive-sum-of-products minimizer", long_about = None)]
struct Args {
    /// Input PLA file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file stem; writes <stem>_<k>.pla per output function
    /// (prints to stdout if not specified)
    #[arg(short = 'O', long = "out-file")]
    output: Option<PathBuf>,

    /// Print per-iteration statistics to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print per-pass reshape statistics to stderr
    #[arg(short = 'w', long = "werbose")]
    werbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.werbose {
        "esop_logic=trace"
    } else if args.verbose {
        "esop_logic=debug"
    } else {
        "esop_logic=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let original = match TwoLevel::from_pla_file(&args.input) {
        Ok(two_level) => two_level,
        Err(e) => {
            eprintln!("Error reading PLA file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let result = exorcise(&original);

    if args.verbose || args.werbose {
        eprint!("ORIGINAL: {}", original);
        eprint!("RESULT:   {}", result);
    }

    if let Some(ref stem) = args.output {
        if let Err(e) = result.to_pla_files(stem) {
            eprintln!("Error writing output files: {}", e);
            process::exit(1);
        }
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for output in 0..result.n_outputs() {
            if let Err(e) = result.write_pla(&mut handle, output) {
                eprintln!("Error writing PLA output: {}", e);
                process::exit(1);
            }
        }
        if let Err(e) = handle.flush() {
            eprintln!("Error writing PLA output: {}", e);
            process::exit(1);
        }
    }
}
