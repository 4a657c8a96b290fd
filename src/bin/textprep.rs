//! textprep CLI - regex cleanup and context extraction for line-oriented text
//!
//! Every input line is one text. Output keeps one result per input line, in order.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use textprep::{CompiledPipeline, ContextExtractor, StepList};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textprep")]
#[command(version, about = "Regex cleanup pipelines and match context extraction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a step list to every input line
    Clean {
        #[command(flatten)]
        steps: StepsArgs,

        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Print the text around every match of a pattern
    Context {
        /// Regex pattern to search for
        #[arg(short, long)]
        pattern: String,

        /// Characters to keep on each side of a match
        #[arg(short, long, default_value = "10")]
        radius: usize,

        /// Emit one JSON array per input line
        #[arg(long)]
        json: bool,

        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Check a step list file without processing any text
    Validate {
        /// Path to the step list YAML
        steps: PathBuf,
    },
}

#[derive(Args)]
#[group(multiple = false)]
struct StepsArgs {
    /// Step list YAML file
    #[arg(short, long)]
    steps: Option<PathBuf>,

    /// Use the built-in cleanup (the default)
    #[arg(long)]
    default: bool,

    /// Pass lines through unchanged
    #[arg(long)]
    no_steps: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean { steps, input } => clean(steps, input),
        Commands::Context {
            pattern,
            radius,
            json,
            input,
        } => context(&pattern, radius, json, input),
        Commands::Validate { steps } => validate(steps),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Resolve the step list selected on the command line
fn select_steps(args: StepsArgs) -> Result<StepList, String> {
    if args.no_steps {
        return Ok(StepList::Disabled);
    }
    if args.default {
        return Ok(StepList::Default);
    }
    match args.steps {
        Some(path) => {
            let loaded = textprep::load_steps_from_file(&path).map_err(|e| e.to_string())?;
            if !loaded.skipped.is_empty() {
                eprintln!(
                    "  ℹ Skipped {} unsupported step(s) in {}",
                    loaded.skipped.len(),
                    path.display()
                );
            }
            Ok(loaded.steps)
        }
        None => Ok(StepList::Default),
    }
}

fn read_lines(input: Option<PathBuf>) -> Result<Vec<String>, String> {
    let contents = match input {
        Some(path) => fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buf
        }
    };

    Ok(contents.lines().map(str::to_string).collect())
}

fn clean(steps: StepsArgs, input: Option<PathBuf>) -> Result<(), String> {
    let steps = select_steps(steps)?;
    let lines = read_lines(input)?;

    let cleaned = textprep::apply_pipeline(&lines, &steps).map_err(|e| e.to_string())?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in &cleaned {
        writeln!(out, "{}", line).map_err(|e| format!("Failed to write output: {}", e))?;
    }
    out.flush().map_err(|e| format!("Failed to write output: {}", e))?;

    Ok(())
}

fn context(pattern: &str, radius: usize, json: bool, input: Option<PathBuf>) -> Result<(), String> {
    let extractor = ContextExtractor::new(pattern).map_err(|e| e.to_string())?;
    let lines = read_lines(input)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in &lines {
        let windows = extractor.extract(line, radius).map_err(|e| e.to_string())?;
        if json {
            let encoded = serde_json::to_string(&windows)
                .map_err(|e| format!("Failed to encode JSON: {}", e))?;
            writeln!(out, "{}", encoded).map_err(|e| format!("Failed to write output: {}", e))?;
        } else {
            for window in &windows {
                writeln!(out, "{}", window).map_err(|e| format!("Failed to write output: {}", e))?;
            }
        }
    }
    out.flush().map_err(|e| format!("Failed to write output: {}", e))?;

    Ok(())
}

fn validate(path: PathBuf) -> Result<(), String> {
    eprintln!("🔍 Validating {}...", path.display());

    let loaded = textprep::load_steps_from_file(&path).map_err(|e| e.to_string())?;

    for skipped in &loaded.skipped {
        eprintln!("  ⚠ Step {} is not supported: {}", skipped.index, skipped.repr);
    }

    match loaded.steps.resolve() {
        None => eprintln!("  ℹ Steps disabled, input passes through unchanged"),
        Some(steps) => {
            let pipeline = CompiledPipeline::compile(&steps).map_err(|e| e.to_string())?;
            for (index, step) in pipeline.steps().enumerate() {
                eprintln!("  ✓ {}: {}", index, step);
            }
        }
    }

    if loaded.skipped.is_empty() {
        eprintln!("✨ Step list is valid");
        Ok(())
    } else {
        Err(format!("{} unsupported step(s)", loaded.skipped.len()))
    }
}
