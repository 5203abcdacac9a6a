use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use amforge_core::evaluator::{RankKey, SortOrder};
use amforge_schemas::{grid::BASELINE_COUNTRY, stage::Scenario};

mod config;
mod plotting;
mod workflow;

/// Compare the GWP of a cast/forged turbine blade with an additively
/// manufactured one across electricity grid mixes.
#[derive(Debug, Parser)]
#[command(name = "amforge", version, about)]
struct Cli {
    /// YAML file with process parameters. Built-in defaults when omitted.
    #[arg(long, global = true)]
    params: Option<PathBuf>,

    /// YAML file with the grid-mix catalog. Built-in catalog when omitted.
    #[arg(long, global = true)]
    grid_catalog: Option<PathBuf>,

    /// Override a parameter, e.g. `--set energy_am=120`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the input parameter sheet with current values.
    Params,
    /// Lifecycle stage emissions of both routes at one grid mix.
    Breakdown {
        #[arg(long, default_value = BASELINE_COUNTRY)]
        country: String,
    },
    /// Per-stage differences and reductions for one production location.
    Location {
        #[arg(long, default_value = BASELINE_COUNTRY)]
        country: String,
    },
    /// Compare totals across several countries.
    Compare(CompareArgs),
    /// Write tables, charts and a summary document to a run directory.
    Export {
        /// Output directory. Defaults to a timestamped folder under ./data/runs.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Grid mix of the lifecycle breakdown section.
        #[arg(long, default_value = BASELINE_COUNTRY)]
        baseline: String,
        /// Production location of the per-stage section.
        #[arg(long, default_value = BASELINE_COUNTRY)]
        country: String,
        #[command(flatten)]
        compare: CompareArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct CompareArgs {
    /// Countries to compare, comma separated. The first three catalog
    /// entries when omitted.
    #[arg(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// Compare every country in the catalog.
    #[arg(long, conflicts_with = "countries")]
    all: bool,

    /// Route shown in the per-stage country breakdown.
    #[arg(long, value_enum, default_value_t = ScenarioArg::Standard)]
    scenario: ScenarioArg,

    /// grid-factor, total-standard, total-am, difference or reduction.
    #[arg(long, default_value = "total-standard")]
    rank_by: RankKey,

    /// asc or desc.
    #[arg(long, default_value = "desc")]
    order: SortOrder,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Standard,
    Am,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Standard => Scenario::Standard,
            ScenarioArg::Am => Scenario::Am,
        }
    }
}

impl From<&CompareArgs> for workflow::CompareOptions {
    fn from(args: &CompareArgs) -> Self {
        workflow::CompareOptions {
            countries: args.countries.clone(),
            all: args.all,
            scenario: args.scenario.into(),
            rank_by: args.rank_by,
            order: args.order,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    info!("--- AMForge Blade Case ---");

    let case = config::CaseConfig::load(
        cli.params.as_deref(),
        cli.grid_catalog.as_deref(),
        &cli.overrides,
    )?;

    match &cli.command {
        Command::Params => workflow::print_parameter_sheet(&case.parameters),
        Command::Breakdown { country } => workflow::run_breakdown(&case, country)?,
        Command::Location { country } => workflow::run_location(&case, country)?,
        Command::Compare(args) => workflow::run_compare(&case, &args.into())?,
        Command::Export {
            out,
            baseline,
            country,
            compare,
        } => {
            let output_dir =
                workflow::run_export(&case, out.clone(), baseline, country, &compare.into())?;
            println!("\nExport complete. Results are in '{}'", output_dir.display());
        }
    }

    Ok(())
}
