//! letpoly CLI: let-polymorphic type inference for a small expression language.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use letpoly::check::{check_source, CheckOptions};
use letpoly::diagnostics::{print_error, print_problem};

#[derive(Parser)]
#[command(
    name = "letpoly",
    version,
    about = "Constraint-based type inference with let-polymorphism"
)]
struct Cli {
    /// Source file to check, or `-` to read from stdin
    file: PathBuf,

    /// Leave top-level free names unresolved instead of using the builtins
    #[arg(long = "no-prelude")]
    no_prelude: bool,

    /// Print only diagnostics
    #[arg(short, long)]
    quiet: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (source, filename) = if cli.file.as_os_str() == "-" {
        let mut source = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::from(1);
        }
        (source, "<stdin>".to_string())
    } else {
        let filename = cli.file.display().to_string();
        match fs::read_to_string(&cli.file) {
            Ok(source) => (source, filename),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", filename, e);
                return ExitCode::from(1);
            }
        }
    };

    info!(file = %filename, bytes = source.len(), "checking");

    let options = CheckOptions {
        prelude: !cli.no_prelude,
    };

    let checked = match check_source(&source, &options) {
        Ok(checked) => checked,
        Err(e) => {
            print_error(&filename, &source, &e);
            return ExitCode::from(1);
        }
    };

    if !cli.quiet {
        println!("// Program type: {}", checked.program_type());
        for decoration in checked.decorations() {
            println!("let {}: {}", decoration.name, decoration.ty);
        }
    }

    for problem in &checked.problems {
        print_problem(&filename, &source, problem);
    }

    if checked.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
