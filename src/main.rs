//! Linehaul operations report
//!
//! Run: ./target/release/linehaul_ops report [--date YYYY-MM-DD] [--hub NAME]...

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use linehaul_ops::{
    config::AppConfig,
    engine::{summarize, Report},
    filter::{available_dates, available_hubs, TripFilter},
    loader::{latest_csv, read_trips_from_path},
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "linehaul_ops")]
#[command(about = "Adhoc, cancellation and vehicle compliance report for linehaul trips")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding trip CSV exports (newest file is used)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the KPI scorecard, hub table and vendor ranking
    Report {
        /// Trip date (defaults to the newest date in the file)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Restrict to these mother hubs (repeatable)
        #[arg(long = "hub")]
        hubs: Vec<String>,

        /// Number of vendors in the ranking
        #[arg(long)]
        top: Option<usize>,

        /// Emit the report as JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List trip dates available in the newest file
    Dates,
    /// List mother hubs available in the newest file
    Hubs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let path = latest_csv(&config.data_dir)
        .with_context(|| format!("looking for trip exports in {:?}", config.data_dir))?;
    let trips = read_trips_from_path(&path)?;

    match cli.command {
        Commands::Dates => {
            for d in available_dates(&trips) {
                println!("{}", d);
            }
        }
        Commands::Hubs => {
            for h in available_hubs(&trips) {
                println!("{}", h);
            }
        }
        Commands::Report {
            date,
            hubs,
            top,
            json,
        } => {
            let date = date.or_else(|| available_dates(&trips).first().copied());
            let mut filter = TripFilter {
                date,
                hubs: None,
            };
            if !hubs.is_empty() {
                filter = filter.with_hubs(hubs);
            }
            let selected = filter.apply(&trips);
            info!("Selected {} of {} trips", selected.len(), trips.len());

            let mut engine = config.engine();
            if let Some(n) = top {
                engine.top_n = n;
            }
            let report = summarize(&selected, &engine);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, date);
            }
        }
    }

    Ok(())
}

fn print_report(report: &Report, date: Option<NaiveDate>) {
    let title = date.map_or_else(|| "all dates".to_string(), |d| d.to_string());

    println!("\n{}", "=".repeat(96));
    println!("                    LOGISTICS INTELLIGENCE: {}", title);
    println!("{}\n", "=".repeat(96));

    let k = &report.kpis;
    println!("  Total Trips:          {:>12}", k.total_trips);
    println!("  Plan Execution:       {:>12}", k.plan_execution_rate.to_string());
    println!("  Adhoc Rate:           {:>12}", k.adhoc_rate.to_string());
    println!("  Cancel Rate:          {:>12}", k.cancel_rate.to_string());
    println!("  Vehicle Compliance:   {:>12}", k.vehicle_compliance_rate.to_string());

    println!("\n  Planned vs Executed:  {} on plan, {} failed", k.executed_on_plan, k.plan_failed);
    if k.adhocs > 0 {
        println!(
            "  Adhoc Responsibility: {} vendor, {} operator",
            k.adhoc_ownership.vendor, k.adhoc_ownership.operator
        );
    } else {
        println!("  No adhoc trips.");
    }
    if k.cancellations > 0 {
        println!(
            "  Cancel Responsibility: {} vendor, {} operator",
            k.cancel_ownership.vendor, k.cancel_ownership.operator
        );
    } else {
        println!("  No cancelled trips.");
    }

    println!("\n\nMOTHER HUB PERFORMANCE & ROOT CAUSE");
    println!("{}", "-".repeat(96));
    println!(
        "  {:24} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Hub", "Total", "Plan OK", "Adhoc Op", "Adhoc Vnd", "Cncl Op", "Cncl Vnd", "Vehicle"
    );
    println!("  {}", "-".repeat(94));
    for h in &report.hubs {
        println!(
            "  {:24} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            truncate(&h.hub, 24),
            h.total,
            h.plan_success_rate.to_string(),
            h.adhoc_operator,
            h.adhoc_vendor,
            h.cancel_operator,
            h.cancel_vendor,
            h.vehicle_compliance.to_string()
        );
    }

    println!("\n\nTOP {} VENDORS BY ADHOCS & CANCELLATIONS", report.top_vendors.len());
    println!("{}", "-".repeat(64));
    println!("  {:30} {:>8} {:>10} {:>10}", "Vendor", "Adhocs", "Cancels", "Failures");
    println!("  {}", "-".repeat(62));
    for v in &report.top_vendors {
        println!(
            "  {:30} {:>8} {:>10} {:>10}",
            truncate(&v.vendor, 30),
            v.adhocs,
            v.cancellations,
            v.total_failures
        );
    }

    println!("\n{}", "=".repeat(96));
    println!();
}

fn truncate(name: &str, max_len: usize) -> String {
    if name.chars().count() > max_len {
        let head: String = name.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}
