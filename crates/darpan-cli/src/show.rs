//! # Dashboard CLI — fetch payloads and render them in the terminal.
//!
//! The `regions`, `heatmap`, and `audit` subcommands are thin drivers
//! over [`darpan_client`]: fetch, derive the view-model, print. A fetch
//! failure surfaces as the command's error and a non-zero exit.

use anyhow::{Context, Result};
use clap::Args;

use darpan_client::{choropleth_fills, ClientConfig, DarpanClient, DashboardView};

/// Connection options shared by the client subcommands.
#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Base URL of the dashboard API.
    #[arg(long, default_value = darpan_client::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,
}

impl ClientArgs {
    fn client(&self) -> Result<DarpanClient> {
        let config = ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        };
        DarpanClient::new(config).context("could not build API client")
    }
}

/// Regions subcommand arguments.
#[derive(Args, Debug)]
pub struct RegionsArgs {
    #[command(flatten)]
    pub client: ClientArgs,
}

/// Heatmap subcommand arguments.
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub client: ClientArgs,
}

/// Audit subcommand arguments.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// State or union territory name.
    #[arg(long)]
    pub state: String,

    /// District name; omit for the state-level report.
    #[arg(long)]
    pub district: Option<String>,

    #[command(flatten)]
    pub client: ClientArgs,
}

/// Execute the regions subcommand.
pub async fn run_regions(args: &RegionsArgs) -> Result<u8> {
    let client = args.client.client()?;
    let index = client
        .fetch_metadata()
        .await
        .context("could not load region metadata")?;

    println!("States and districts:");
    println!();
    for state in index.states() {
        let districts = index.districts_of(state).map_or(0, <[String]>::len);
        println!("  {state:<42} {districts} districts");
    }
    println!();
    println!("Total: {} states", index.len());
    Ok(0)
}

/// Execute the heatmap subcommand.
pub async fn run_heatmap(args: &HeatmapArgs) -> Result<u8> {
    let client = args.client.client()?;
    let report = client
        .fetch_heatmap()
        .await
        .context("could not load national heatmap")?;

    println!("{:<42} {:>6}  {:<8}  FILL", "STATE", "RATIO", "STATUS");
    for fill in choropleth_fills(&report) {
        let status = report
            .get(&fill.state)
            .map_or("", |cell| cell.status.as_str());
        println!(
            "{:<42} {:>6.2}  {:<8}  {}",
            fill.state, fill.ratio, status, fill.color
        );
    }
    println!();
    println!("Total: {} states classified", report.len());
    Ok(0)
}

/// Execute the audit subcommand.
pub async fn run_audit(args: &AuditArgs) -> Result<u8> {
    let client = args.client.client()?;
    let report = client
        .fetch_audit(&args.state, args.district.as_deref())
        .await
        .context("could not load audit report")?;
    let view = DashboardView::from_report(&report);

    println!("Audit report — {}", view.location);
    println!();
    for tile in &view.tiles {
        println!(
            "  [{:^8}] {:<24} {}",
            tile.status.as_str(),
            tile.title,
            tile.value_text
        );
    }
    println!();
    println!(
        "  Demographic split: {:.1}% youth / {:.1}% adult",
        view.pie.youth_percent, view.pie.adult_percent
    );
    println!();
    println!(
        "  Forecast ({} trend, {:.1}% accuracy):",
        view.trend, view.accuracy
    );
    for bar in &view.bars {
        let width = (bar.relative_height * 32.0).round() as usize;
        println!("    +{}mo {:>12}  {}", bar.month_offset, bar.value, "#".repeat(width));
    }
    Ok(0)
}
