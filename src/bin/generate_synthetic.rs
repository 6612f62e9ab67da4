//! Synthetic trip export generator
//!
//! Writes a CSV in the upstream trip export layout with controlled rates of
//! adhoc trips, cancellations and vehicle substitutions, for demos and load
//! testing of the report.
//!
//! Usage:
//!   cargo run --release --bin generate_synthetic -- [OPTIONS]
//!
//! Options:
//!   --days <N>             Number of trip dates, ending at --end-date (default: 7)
//!   --trips-per-day <N>    Trips generated per date (default: 400)
//!   --adhoc-rate <F>       Probability a trip is adhoc (default: 0.18)
//!   --cancel-rate <F>      Probability a trip is cancelled (default: 0.08)
//!   --mismatch-rate <F>    Probability of a vehicle substitution (default: 0.12)
//!   --seed <N>             Random seed for reproducibility (optional)
//!   --output <PATH>        Output CSV path (default: raw-data/synthetic_trips.csv)

use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use csv::WriterBuilder;
use linehaul_ops::models::CsvRecord;
use linehaul_ops::rules::DEFAULT_VENDOR_CANCEL_CODES;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::error::Error;
use std::path::PathBuf;

/// Synthetic data generator for trip exports
#[derive(Parser, Debug)]
#[command(name = "generate_synthetic")]
#[command(about = "Generate synthetic linehaul trip data with controlled variation")]
struct Args {
    /// Number of distinct trip dates
    #[arg(long, default_value = "7")]
    days: i64,

    /// Last trip date (defaults to today)
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Trips generated per date
    #[arg(long, default_value = "400")]
    trips_per_day: usize,

    /// Probability a trip is billed as adhoc (0.0 - 1.0)
    #[arg(long, default_value = "0.18")]
    adhoc_rate: f64,

    /// Probability a trip is cancelled (0.0 - 1.0)
    #[arg(long, default_value = "0.08")]
    cancel_rate: f64,

    /// Probability the actual vehicle differs from the planned one (0.0 - 1.0)
    #[arg(long, default_value = "0.12")]
    mismatch_rate: f64,

    /// Probability an adhoc reason or cancellation code blames the vendor
    #[arg(long, default_value = "0.45")]
    vendor_fault_rate: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output CSV path
    #[arg(long, default_value = "raw-data/synthetic_trips.csv")]
    output: PathBuf,
}

const HUBS: [&str; 8] = [
    "Bhiwandi MH",
    "Hoskote MH",
    "Farukhnagar MH",
    "Medchal MH",
    "Sanand MH",
    "Dankuni MH",
    "Chakan MH",
    "Sriperumbudur MH",
];

const VENDORS: [&str; 12] = [
    "Acme Roadways",
    "Bharat Carriers",
    "Coastal Freight",
    "Deccan Logistics",
    "Eastern Cargo Movers",
    "Frontier Transport",
    "Ganga Haulage",
    "Highway Kings",
    "Indus Fleet",
    "Jet Line Carriers",
    "Konkan Roadlines",
    "Lakshmi Transport",
];

const VEHICLE_TYPES: [&str; 5] = ["14FT", "17FT", "19FT", "24FT", "32FT"];

const VENDOR_ADHOC_REASONS: [&str; 3] = [
    "VENDOR_VEHICLE_DELAY",
    "VENDOR_PLACEMENT_FAILURE",
    "REPLACEMENT_FOR_VENDOR_BREAKDOWN",
];

const OPERATOR_ADHOC_REASONS: [&str; 4] = [
    "EXTRA_LOAD",
    "CUSTOMER_REQUEST",
    "HUB_BACKLOG",
    "",
];

const OPERATOR_CANCEL_CODES: [&str; 4] = ["DEMAND_DROP", "LOAD_NOT_READY", "PLAN_CHANGE", ""];

/// Generate a unique trip code
fn generate_trip_code(date: NaiveDate, seq: usize, rng: &mut impl Rng) -> String {
    format!("MT-{}-{:05}-{:04x}", date.format("%Y%m%d"), seq, rng.gen::<u16>())
}

fn pick<'a>(items: &[&'a str], rng: &mut impl Rng) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Generate one trip row
fn generate_trip(date: NaiveDate, seq: usize, args: &Args, rng: &mut impl Rng) -> CsvRecord {
    let adhoc = rng.gen_bool(args.adhoc_rate.clamp(0.0, 1.0));
    let cancelled = rng.gen_bool(args.cancel_rate.clamp(0.0, 1.0));
    let vendor_fault = args.vendor_fault_rate.clamp(0.0, 1.0);

    let adhoc_reason = if !adhoc {
        None
    } else if rng.gen_bool(vendor_fault) {
        Some(pick(&VENDOR_ADHOC_REASONS, rng).to_string())
    } else {
        Some(pick(&OPERATOR_ADHOC_REASONS, rng).to_string())
    };

    let cancellation_code = if !cancelled {
        None
    } else if rng.gen_bool(vendor_fault) {
        Some(pick(&DEFAULT_VENDOR_CANCEL_CODES, rng).to_string())
    } else {
        Some(pick(&OPERATOR_CANCEL_CODES, rng).to_string())
    };

    let planned = pick(&VEHICLE_TYPES, rng);
    let actual = if rng.gen_bool(args.mismatch_rate.clamp(0.0, 1.0)) {
        pick(&VEHICLE_TYPES, rng)
    } else {
        planned
    };

    // Skewed so that a few hubs and vendors dominate volume
    let hub = HUBS[(rng.gen::<f64>().powi(2) * HUBS.len() as f64) as usize];
    let vendor = VENDORS[(rng.gen::<f64>().powf(1.5) * VENDORS.len() as f64) as usize];

    CsvRecord {
        master_trip_code: Some(generate_trip_code(date, seq, rng)),
        trip_date: Some(date.format("%Y-%m-%d").to_string()),
        source_mh_name: Some(hub.to_string()),
        actual_billing_basis: Some(if adhoc { "Adhoc" } else { "Planned" }.to_string()),
        trip_status: Some(if cancelled { "CANCELLED" } else { "COMPLETED" }.to_string()),
        adhoc_trip_creation_reason: adhoc_reason,
        cancellation_reason_code: cancellation_code,
        planned_vehicle_type: Some(planned.to_string()),
        actual_vehicle_type: Some(actual.to_string()),
        actual_vendor: Some(vendor.to_string()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let end_date = args.end_date.unwrap_or_else(|| Local::now().date_naive());

    println!("Synthetic Trip Generator");
    println!("{}", "-".repeat(60));
    println!("Output:           {}", args.output.display());
    println!("Dates:            {} ending {}", args.days, end_date);
    println!("Trips per day:    {}", args.trips_per_day);
    println!("Adhoc rate:       {:.1}%", args.adhoc_rate * 100.0);
    println!("Cancel rate:      {:.1}%", args.cancel_rate * 100.0);
    println!("Mismatch rate:    {:.1}%", args.mismatch_rate * 100.0);
    println!("Vendor fault:     {:.1}%", args.vendor_fault_rate * 100.0);
    if let Some(seed) = args.seed {
        println!("Random seed:      {}", seed);
    }
    println!();

    // Initialize RNG
    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    // Ensure output directory exists
    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(&args.output)?;

    let mut total_written = 0;
    for offset in (0..args.days.max(1)).rev() {
        let date = end_date - Duration::days(offset);
        for seq in 0..args.trips_per_day {
            writer.serialize(generate_trip(date, seq, &args, &mut rng))?;
            total_written += 1;
        }
        println!("   {} -> {} trips", date, args.trips_per_day);
    }

    writer.flush()?;

    println!("\nGeneration complete: {} trips written to {}", total_written, args.output.display());

    Ok(())
}
