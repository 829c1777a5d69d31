//! Command-line front end: load a CSV file, print it, and optionally write
//! it out as a C header.
//!
//! ```sh
//! gram-csv data.csv              # print the summary
//! gram-csv data.csv data.h       # write the header
//! gram-csv data.csv data.h -p    # both
//! ```
//!
//! Built with `--features cli`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gram_csv::{emit_declaration, CsvLoader, LoadOptions, NumericMode};
use tracing_subscriber::{fmt, EnvFilter};

/// Load a CSV file into numeric columns and emit it as a C header
#[derive(Parser, Debug)]
#[command(name = "gram-csv", version)]
struct Args {
    /// CSV file to process
    #[arg(value_name = "INPUT_CSV")]
    input: PathBuf,

    /// Header file to write
    #[arg(value_name = "OUTPUT_HEADER")]
    output: Option<PathBuf>,

    /// Print csv file contents summary
    #[arg(short, long)]
    print: bool,

    /// Reject fields that are not numbers instead of reading them as 0
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mode = if args.strict {
        NumericMode::Strict
    } else {
        NumericMode::Lenient
    };
    let mut loader = CsvLoader::with_options(LoadOptions::default().numeric_mode(mode));

    let table = match loader.load(&args.input) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", loader.last_error_message().unwrap_or(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    if args.output.is_none() || args.print {
        println!("gram_csv");
        println!("{}", table);
    }

    if let Some(output) = &args.output {
        if let Err(e) = emit_declaration(&table, output) {
            eprintln!("Could not write `{}`: {}", output.display(), e);
            return ExitCode::FAILURE;
        }
        println!("File written to `{}`", output.display());
    }

    table.release();
    ExitCode::SUCCESS
}
