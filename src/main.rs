use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufWriter};
use tracing_subscriber::EnvFilter;

use yamlsmith::config::Config;
use yamlsmith::printer::YamlPrinter;
use yamlsmith::stream::StreamEvaluator;

/// yamlsmith - query and update YAML document streams
#[derive(Parser)]
#[command(name = "yamlsmith")]
#[command(version)]
#[command(about = "Query and update YAML document streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate the expression against each document of each file in turn
    Eval(EvalArgs),
    /// Evaluate the expression once against all documents of all files
    EvalAll(EvalArgs),
}

#[derive(Args)]
struct EvalArgs {
    /// Expression to evaluate
    expression: String,

    /// Input files; `-` reads standard input
    #[arg(default_value = "-")]
    files: Vec<String>,

    /// Spaces per indentation level
    #[arg(short = 'I', long)]
    indent: Option<usize>,

    /// Print string results as YAML scalars
    #[arg(long)]
    no_unwrap_scalar: bool,

    /// Do not print `---` between documents
    #[arg(long)]
    no_doc_separators: bool,

    /// Resolve aliases and merge keys while traversing
    #[arg(long)]
    follow_alias: bool,

    /// Do not create missing keys when assigning
    #[arg(long)]
    no_auto_create: bool,
}

impl EvalArgs {
    /// Applies command-line overrides on top of the file configuration.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        if self.no_unwrap_scalar {
            config.unwrap_scalar = false;
        }
        if self.no_doc_separators {
            config.print_document_separators = false;
        }
        if self.follow_alias {
            config.follow_alias = true;
        }
        if self.no_auto_create {
            config.auto_create = false;
        }
        config
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (args, combined) = match &cli.command {
        Command::Eval(args) => (args, false),
        Command::EvalAll(args) => (args, true),
    };
    let config = args.apply(Config::load());
    tracing::debug!(?config, "configuration loaded");

    let evaluator = StreamEvaluator::new(config.navigation_prefs());
    let stdout = io::stdout();
    let mut printer = YamlPrinter::new(BufWriter::new(stdout.lock()), config.printer_options());

    let outcome = if combined {
        evaluator.evaluate_all_file_streams(&args.expression, &args.files, &mut printer)
    } else {
        evaluator.evaluate_file_streams_sequence(&args.expression, &args.files, &mut printer)
    };
    printer.finish();

    outcome.with_context(|| format!("failed to evaluate '{}'", args.expression))
}
