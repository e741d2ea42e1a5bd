use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use visit_planner::loader::{load_relatives, load_transport};
use visit_planner::report;
use visit_planner::solver::{PlanningProblem, Preference, SolveOptions, solve};

#[derive(Parser)]
#[clap(author, version, about = "Plan a week of visits to relatives", long_about = None)]
struct Cli {
    /// Relatives CSV (Relative,District,Lat,Lon,PreferredDays,PreferredTime,Bonus,Duration)
    #[arg(long)]
    relatives: PathBuf,

    /// Transport modes CSV (Mode,Speed,CostPerKm,TransferTime)
    #[arg(long)]
    transport: PathBuf,

    /// Metric minimised when picking the next stop: "time" or "cost"
    #[arg(long, default_value = "time")]
    preference: Preference,

    /// Score penalty per travel/visit minute
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,

    /// Score penalty per unit of travel cost
    #[arg(long, default_value_t = 0.02)]
    beta: f64,

    /// Number of randomized attempts
    #[arg(short, long, default_value_t = 50)]
    restarts: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Run attempts in parallel
    #[arg(long)]
    parallel: bool,

    /// Text report destination
    #[arg(short, long, default_value = "schedule.txt")]
    output: PathBuf,

    /// Also export the result as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Export per-day route points for map rendering
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Write the runtime summary to this file
    #[arg(long)]
    runtime_log: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let relatives = load_relatives(&cli.relatives)?;
    let modes = load_transport(&cli.transport)?;
    let problem = PlanningProblem::new(relatives, modes)?;

    let options = SolveOptions {
        preference: cli.preference,
        alpha: cli.alpha,
        beta: cli.beta,
        restarts: cli.restarts,
        seed: cli.seed,
        parallel: cli.parallel,
    };
    let result = solve(&problem, &options)?;

    let text = report::format_schedule(&result.schedule, &result.totals);
    println!("{text}");

    report::write_file(&cli.output, &text)?;
    info!(path = %cli.output.display(), "schedule saved");

    if let Some(path) = &cli.json {
        report::write_json(path, &result)?;
        info!(path = %path.display(), "json exported");
    }
    if let Some(path) = &cli.routes {
        report::write_route_map(path, &result.schedule)?;
        info!(path = %path.display(), "route map data exported");
    }
    if let Some(path) = &cli.runtime_log {
        report::write_file(path, &report::runtime_summary(&result))?;
    }

    Ok(())
}
