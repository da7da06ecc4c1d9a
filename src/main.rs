use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use logistics_dashboard::commands::shipments::{search_shipments, shipments_by_status};
use logistics_dashboard::models::ShipmentStatus;
use logistics_dashboard::services::state::{load_settings, AppState};
use logistics_dashboard::shell::{ChartView, Dashboard};

#[derive(Parser, Debug)]
#[command(name = "logistics-dashboard")]
#[command(about = "Logistics dashboard for shipments, inventory and delivery analytics")]
#[command(version)]
struct Args {
    /// Free-text shipment search, sent to the service as `q`
    query: Vec<String>,

    /// Only list shipments with this status, e.g. "In Transit"
    #[arg(long)]
    status: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let settings = load_settings()?;
    tracing::info!(api_url = %settings.api_url, "loading logistics dashboard");
    let state = AppState::new(settings);

    let mut dashboard = Dashboard::new();
    dashboard.mount(&state).await;
    println!("{}", dashboard.render());

    let query = args.query.join(" ");
    if !query.trim().is_empty() {
        println!("== Shipments matching \"{}\" ==\n", query.trim());
        match search_shipments(&query, &state).await {
            Ok(rows) => println!("{}", rows.render()),
            Err(message) => println!("{}", message),
        }
    }

    if let Some(status) = args.status {
        let status = ShipmentStatus::from(status);
        println!("== Shipments with status \"{}\" ==\n", status);
        match shipments_by_status(&status, &state).await {
            Ok(rows) => println!("{}", rows.render()),
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}
