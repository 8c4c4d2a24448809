//! Command-line front end.
//!
//! Reads an Expresso source file, runs it through the lexer, parser and
//! reducer, and prints the resulting AST. Diagnostics go to stderr with the
//! offending line underlined.

use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::{Parser, ValueEnum};
use expresso::{
    ast::ast::Render,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::{parser::parse, walker::events},
    reduce, render_error,
};
use tracing::{debug, info, Level};

/// Output format for the reduced AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Rust debug representation
    Debug,
    /// Reconstructed source text
    Pretty,
    /// JSON document
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "expresso",
    version,
    about = "Parse Expresso source into an abstract syntax tree."
)]
pub struct Args {
    /// The path to the Expresso source file.
    #[arg(required = true)]
    file: PathBuf,

    /// How to print the reduced program.
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Print the enter/exit events of the parse tree instead of the AST.
    #[arg(long)]
    events: bool,

    /// Log each pipeline stage.
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(level);

    if args.json_logs {
        builder.json().with_current_span(false).init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", args.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &source, &file_name) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", render_error(&error, &source, &args.file.to_string_lossy()));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, source: &str, file_name: &str) -> Result<String, Error> {
    let start = Instant::now();

    let tokens = tokenize(String::from(source), Some(String::from(file_name)))?;
    debug!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    let parse_start = Instant::now();
    let tree = parse(tokens, Rc::new(String::from(file_name)))?;
    debug!(elapsed = ?parse_start.elapsed(), "parsed");

    if args.events {
        let lines: Vec<String> = events(&tree).iter().map(|event| format!("{:?}", event)).collect();
        return Ok(lines.join("\n"));
    }

    let reduce_start = Instant::now();
    let program = reduce(&tree)?;
    debug!(elapsed = ?reduce_start.elapsed(), "reduced");
    info!(file = file_name, declarations = program.body.len(), total = ?start.elapsed(), "done");

    let output = match args.format {
        Format::Debug => format!("{:#?}", program),
        Format::Pretty => program.rendered(),
        Format::Json => program.to_json()?,
    };

    Ok(output)
}
