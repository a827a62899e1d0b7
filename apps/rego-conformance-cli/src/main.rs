use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rego_conformance::{
    CheckerConfig, ConformanceRun, MissingArtifactPolicy, Reporter, RunResult, logging::RunLogger,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

const RULE_WIDTH: usize = 60;

/// Checks generated Rego policies and the generator source for required features.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Repository root that relative paths resolve against (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Directory holding the generated policies (default: "examples")
    #[arg(long)]
    examples_dir: Option<PathBuf>,

    /// Generator source file (default: "rego-policy-generator")
    #[arg(long)]
    generator: Option<PathBuf>,

    /// Policy file extension (default: "rego")
    #[arg(long)]
    extension: Option<String>,

    /// Fail when a canonical policy is absent instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Append structured JSONL events for this run to the given file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn banner(&mut self, title: &str) {
        println!("\n{}", style("=".repeat(RULE_WIDTH)).dim());
        println!("{}", style(title).bold());
        println!("{}", style("=".repeat(RULE_WIDTH)).dim());
    }

    fn section(&mut self, title: &str) {
        println!("\n{}", style("=".repeat(RULE_WIDTH)).dim());
        println!("{}", style(title).bold().cyan());
        println!("{}", style("=".repeat(RULE_WIDTH)).dim());
    }

    fn heading(&mut self, text: &str) {
        println!("\n{}", style(text).bold());
    }

    fn pass(&mut self, message: &str) {
        println!("   {} {}", style("✓").green(), message);
    }

    fn fail(&mut self, message: &str) {
        println!("   {} {}", style("❌").red(), style(message).red());
    }

    fn note(&mut self, message: &str) {
        println!("{}", message);
    }
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("info,rego_conformance=debug,rego_conformance_cli=debug")
    } else {
        EnvFilter::new("warn,rego_conformance=info,rego_conformance_cli=info")
    };

    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn build_config(args: &Args) -> Result<CheckerConfig> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let mut config = CheckerConfig::load(root).context("Failed to load configuration")?;
    if let Some(dir) = &args.examples_dir {
        config.examples_dir = dir.clone();
    }
    if let Some(generator) = &args.generator {
        config.generator = generator.clone();
    }
    if let Some(extension) = &args.extension {
        config = config.with_extension(extension.as_str());
    }
    if args.strict {
        config.missing_artifacts = MissingArtifactPolicy::Strict;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn execute(args: &Args) -> Result<RunResult> {
    let config = build_config(args)?;
    info!(
        root = %config.root.display(),
        policy = ?config.missing_artifacts,
        "starting conformance run"
    );

    let logger = match &args.log_file {
        Some(path) => Some(RunLogger::new(path).context("Failed to open run log")?),
        None => None,
    };

    let mut run = ConformanceRun::new(&config);
    if let Some(logger) = &logger {
        run = run.with_logger(logger);
    }

    let mut reporter = ConsoleReporter;
    match run.execute(&mut reporter) {
        Ok(result) => Ok(result),
        Err(e) => {
            if let Some(logger) = &logger {
                let _ = logger.log_error(&e.to_string());
            }
            Err(e.into())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.debug);

    match execute(&args) {
        Ok(result) => ExitCode::from(result.exit_code()),
        Err(e) => {
            error!("conformance run aborted: {:#}", e);
            eprintln!("\n{} {:?}", style("❌ Test failed with error:").red().bold(), e);
            ExitCode::from(1)
        }
    }
}
