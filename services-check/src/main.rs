use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use services_check::{run_checks, Dependencies, SeverityPolicy};

#[derive(Parser)]
#[command(name = "services-check")]
#[command(about = "Validate the database, Context7 API, and vector store", long_about = None)]
struct Cli {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Fail the run when the vector store is unhealthy
    #[arg(long)]
    vector_fatal: bool,

    /// Fail the run when no Context7 API key is configured
    #[arg(long)]
    require_search: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads the environment
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let policy = SeverityPolicy {
        vector_store_fatal: cli.vector_fatal,
        skip_unconfigured_search: !cli.require_search,
    };

    println!("Starting service validation tests...\n");

    let deps = Dependencies::from_env(cli.database_url).await;
    let report = run_checks(&deps, &policy).await;

    report.print_summary();
    info!(report = %serde_json::to_string(&report.to_json())?, "Validation report");

    std::process::exit(report.exit_code());
}
