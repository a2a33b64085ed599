//! rdlint CLI - style linter for SSRS report definition files

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use rdlint::engine::{Engine, RunError};
use rdlint::output::TextFormatter;
use rdlint::profile::PageSize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rdlint",
    version,
    about = "Style linter for SSRS report definition (.rdl) files",
    long_about = "Checks page geometry and typography of a report definition against \
                  a page-size profile. Supplying an output file enables fix mode: \
                  deviating values are rewritten and the repaired document is saved."
)]
struct Cli {
    /// Page size to verify against (a4, a4_landscape, a3_landscape)
    #[arg(value_name = "PAGESIZE")]
    page_size: String,

    /// Report definition (.rdl) file to check
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination for the repaired document; enables fix mode
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{}: {:#}", "error".red().bold(), err);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let page_size: PageSize = cli
        .page_size
        .parse()
        .map_err(|message: String| anyhow::anyhow!(message))?;

    let engine = Engine::new(page_size).with_fix(cli.output.is_some());

    match engine.run_file(&cli.input, cli.output.as_deref()) {
        Ok(report) => {
            print!("{}", TextFormatter::new().format(&report));
            Ok(0)
        }
        Err(err @ RunError::SchemaTooOld) => {
            eprintln!("{}: {}", "error".red().bold(), err);
            Ok(1)
        }
        Err(err) => Err(err).with_context(|| format!("failed to process {}", cli.input.display())),
    }
}
