/// Esper — run semantic expressions through the glyph pipeline.
///
/// Usage:
///   esper run <input> [--format json|ron] [--trace]
///   esper vocabulary
///
/// `<input>` is a JSON file holding one expression or an array of them,
/// a `.ron` file holding one expression, or `-` for JSON on stdin.
/// JSON output is the stage-tagged record; RON output is the same record
/// as a plain struct, and `--trace` prints a list of the three records.

use clap::{Parser, Subcommand, ValueEnum};
use esper_pipeline::core::pipeline::{load_expressions, parse_json_expressions, Pipeline, PipelineError};
use esper_pipeline::schema::expression::SemanticExpression;
use esper_pipeline::schema::record::Record;
use esper_pipeline::schema::vocabulary::Dimension;
use ron::extensions::Extensions;
use ron::ser::PrettyConfig;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Crystallize, sequence, and render semantic expressions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render expressions to glyphs
    Run {
        /// Expression file, or `-` for JSON on stdin
        input: PathBuf,

        #[arg(long, value_enum, env = "ESPER_FORMAT", default_value_t = Format::Json)]
        format: Format,

        /// Print the vse and chronocore records alongside the rendered one
        #[arg(long)]
        trace: bool,
    },
    /// List the legal terms and defaults of every dimension
    Vocabulary,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Ron,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let pipeline = Pipeline::new();

    match cli.command {
        Command::Run {
            input,
            format,
            trace,
        } => {
            let expressions = read_expressions(&input)?;
            for expression in &expressions {
                if trace {
                    let trace = pipeline.trace(expression)?;
                    match format {
                        Format::Json => emit_json(&trace)?,
                        Format::Ron => {
                            let flat: Vec<_> = trace.records().iter().map(|r| r.flat()).collect();
                            emit_ron(&flat)?
                        }
                    }
                } else {
                    emit(&pipeline.run(expression)?, format)?;
                }
            }
        }
        Command::Vocabulary => {
            let vocabulary = pipeline.crystallizer().vocabulary();
            for dimension in Dimension::ALL {
                let terms = dimension.terms();
                let legal = if terms.is_empty() {
                    "[0.0, 1.0]".to_string()
                } else {
                    terms.join(", ")
                };
                println!(
                    "{:<10} {:<24} default: {}",
                    dimension.name(),
                    legal,
                    vocabulary.default_for(dimension)
                );
            }
        }
    }

    Ok(())
}

fn read_expressions(input: &Path) -> Result<Vec<SemanticExpression>, PipelineError> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return parse_json_expressions(&buf);
    }
    load_expressions(input)
}

fn emit(record: &Record, format: Format) -> Result<(), PipelineError> {
    match format {
        Format::Json => emit_json(record),
        Format::Ron => emit_ron(&record.flat()),
    }
}

fn emit_json<T: Serialize>(value: &T) -> Result<(), PipelineError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emit_ron<T: Serialize>(value: &T) -> Result<(), PipelineError> {
    let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
    println!("{}", options.to_string_pretty(value, PrettyConfig::default())?);
    Ok(())
}
