use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trip_planner::budget::editor::update_category;
use trip_planner::budget::report::build_allocation_report;
use trip_planner::budget::tables::AllocationTables;
use trip_planner::budget::{AllocationReport, BudgetBreakdown, BudgetCategory};
use trip_planner::config::{Config, ConfigOverrides};
use trip_planner::itinerary::pipeline::generate_itinerary;
use trip_planner::itinerary::DayPlan;
use trip_planner::output::csv::{breakdown_to_csv, itinerary_to_csv, report_to_csv};
use trip_planner::output::json::render_json;
use trip_planner::output::table::{render_breakdown_table, render_itinerary_table, render_report};
use trip_planner::server::run_server;
use trip_planner::trip::{TripParameters, TripRequest};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "trip-planner",
    about = "Trip budget allocation and itinerary planning"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone)]
struct TripArgs {
    #[arg(short, long)]
    destination: String,
    #[arg(long, allow_negative_numbers = true)]
    days: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    budget: Option<f64>,
    #[arg(long)]
    style: Option<String>,
    #[arg(long = "group-size", allow_negative_numbers = true)]
    group_size: Option<i64>,
    /// Comma-separated interest tags, e.g. "food,culture"
    #[arg(long)]
    interests: Option<String>,
}

impl TripArgs {
    fn into_params(self, config: &Config) -> Result<TripParameters> {
        let request = TripRequest {
            destination: self.destination,
            duration_days: self
                .days
                .unwrap_or_else(|| i64::from(config.defaults.duration_days)),
            total_budget: self.budget,
            interests: self
                .interests
                .map(|raw| raw.split(',').map(|s| s.to_string()).collect())
                .unwrap_or_default(),
            travel_style: Some(
                self.style
                    .unwrap_or_else(|| config.defaults.travel_style.to_string()),
            ),
            group_size: self
                .group_size
                .unwrap_or_else(|| i64::from(config.defaults.group_size)),
        };
        TripParameters::try_from(request).map_err(|e| anyhow!("invalid trip: {e}"))
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Allocate {
        #[command(flatten)]
        trip: TripArgs,
    },
    Itinerary {
        #[command(flatten)]
        trip: TripArgs,
    },
    SetCategory {
        /// JSON file holding a breakdown object keyed by category
        #[arg(long)]
        breakdown: PathBuf,
        #[arg(long)]
        budget: f64,
        #[arg(long)]
        category: String,
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(config_path.as_path()))?;
    init_tracing(&config);

    if let Commands::Serve { host, port } = &cli.command {
        config.apply_overrides(ConfigOverrides {
            host: host.clone(),
            port: *port,
            travel_style: None,
        });
        let bind = format!("{}:{}", config.server.host, config.server.port);
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, addr).await;
    }

    let tables = AllocationTables::standard();
    match cli.command {
        Commands::Allocate { trip } => {
            let params = trip.into_params(&config)?;
            info!(destination = %params.destination, "allocating budget");
            let report = build_allocation_report(&params, &tables);
            print_report(&report, cli.output)?;
        }
        Commands::Itinerary { mut trip } => {
            trip.budget.get_or_insert(0.0);
            let params = trip.into_params(&config)?;
            info!(destination = %params.destination, "generating itinerary");
            let days = generate_itinerary(&params);
            print_itinerary(&days, cli.output)?;
        }
        Commands::SetCategory {
            breakdown,
            budget,
            category,
            value,
        } => {
            if !budget.is_finite() || budget < 0.0 {
                return Err(anyhow!("budget must be a finite number >= 0, got {budget}"));
            }
            let data = std::fs::read_to_string(&breakdown)
                .with_context(|| format!("failed reading breakdown: {}", breakdown.display()))?;
            let current: BudgetBreakdown = serde_json::from_str(&data)
                .with_context(|| format!("failed parsing breakdown: {}", breakdown.display()))?;
            let category = BudgetCategory::from_str(&category)?;
            let updated = update_category(&current, budget, category, value);
            print_breakdown(&updated, cli.output)?;
        }
        Commands::Config { init, show } => {
            handle_config_command(init, show, &config, &config_path)?;
        }
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn handle_config_command(init: bool, show: bool, config: &Config, config_path: &Path) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_report(report: &AllocationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_report(report)),
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Csv => println!("{}", report_to_csv(report)?),
    }
    Ok(())
}

fn print_itinerary(days: &[DayPlan], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_itinerary_table(days)),
        OutputFormat::Json => println!("{}", render_json(days)?),
        OutputFormat::Csv => println!("{}", itinerary_to_csv(days)?),
    }
    Ok(())
}

fn print_breakdown(breakdown: &BudgetBreakdown, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_breakdown_table(breakdown)),
        OutputFormat::Json => println!("{}", render_json(breakdown)?),
        OutputFormat::Csv => println!("{}", breakdown_to_csv(breakdown)?),
    }
    Ok(())
}
