use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use spendlens_analysis::{category_totals_by_month, core_vs_non_core_monthly_totals, monthly_totals};
use spendlens_core::Ledger;
use spendlens_ingest::{load_ledger, LoadSummary};
use std::path::PathBuf;

mod config;
mod logging;
mod report;

use config::{default_config_path, init_config, load_config, Config};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDLENS_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version,
    long_version = LONG_VERSION,
    about = "Monthly and per-category spending from bank CSV exports"
)]
struct Cli {
    /// Config file (default: ~/.spendlens/config.toml)
    #[arg(long, global = true, env = "SPENDLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Exemption list, overrides [sources].exemptions
    #[arg(long, global = true)]
    exemptions: Option<PathBuf>,

    /// Mapping CSV, overrides [sources].mapping
    #[arg(long, global = true)]
    mapping: Option<PathBuf>,

    /// Transaction export; repeat for several. Replaces [sources].expenses
    #[arg(long = "expenses", global = true)]
    expenses: Vec<PathBuf>,

    /// Also load rows that only have a Credit amount
    #[arg(long, global = true)]
    include_credits: bool,

    /// Fail when a source file cannot be read
    #[arg(long, global = true)]
    strict: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct Output {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    View(View),
}

/// Read-only views over the loaded ledger.
#[derive(Subcommand, Debug)]
enum View {
    /// List the accepted expenses
    Expenses(Output),

    /// List the mapping rules in match order
    Mappings(Output),

    /// Total spend per month
    Monthly(Output),

    /// Core / non-core / unmapped spend per month
    CoreSplit(Output),

    /// Category totals per month, largest first
    Categories(Output),

    /// Load counters and year totals
    Summary(Output),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(p) => p.clone(),
        None => default_config_path()?,
    };

    let view = match &cli.command {
        Command::Init { force } => return init_config(&config_path, *force),
        Command::View(view) => view,
    };

    let mut cfg = load_config(&config_path)?;
    apply_overrides(&mut cfg, &cli);
    logging::setup_logging(&cfg.logging.level);
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    let (ledger, summary) = load_ledger(&cfg.sources(), &cfg.load_options(cli.strict))
        .context("loading data")?;

    run(view, &ledger, &summary)
}

fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(p) = &cli.exemptions {
        cfg.sources.exemptions = Some(p.clone());
    }
    if let Some(p) = &cli.mapping {
        cfg.sources.mapping = Some(p.clone());
    }
    if !cli.expenses.is_empty() {
        cfg.sources.expenses = cli.expenses.clone();
    }
    if cli.include_credits {
        cfg.ingest.debits_only = false;
    }
    if let Some(level) = &cli.log_level {
        cfg.logging.level = level.clone();
    }
}

fn run(view: &View, ledger: &Ledger, load: &LoadSummary) -> Result<()> {
    match view {
        View::Expenses(out) => emit(out, ledger.expenses(), report::render_expenses),
        View::Mappings(out) => emit(out, ledger.rules(), report::render_rules),
        View::Monthly(out) => emit(out, &monthly_totals(ledger), report::render_monthly),
        View::CoreSplit(out) => emit(
            out,
            &core_vs_non_core_monthly_totals(ledger),
            report::render_core_split,
        ),
        View::Categories(out) => emit(
            out,
            &category_totals_by_month(ledger),
            report::render_categories,
        ),
        View::Summary(out) => {
            let monthly = monthly_totals(ledger);
            let split = core_vs_non_core_monthly_totals(ledger);
            let summary = report::Summary::new(load, &monthly, &split);
            emit(out, &summary, report::render_summary)
        }
    }
}

fn emit<T: Serialize + ?Sized>(out: &Output, view: &T, render: fn(&T) -> String) -> Result<()> {
    if out.json {
        let json = serde_json::to_string_pretty(view).context("serialize output")?;
        println!("{json}");
    } else {
        print!("{}", render(view));
    }
    Ok(())
}
