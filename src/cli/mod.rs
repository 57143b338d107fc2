//! Command-line interface
//!
//! `train` runs the full workflow and writes the model artifact, `predict`
//! runs one-row inference against a saved artifact, `info` summarizes a
//! dataset.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::data::load_dataset;
use crate::features::select_features;
use crate::inference::{PriceEstimator, PropertyInput, FALLBACK_USD_TO_INR};
use crate::preprocessing::Preprocessor;
use crate::training::{candidate_models, train_and_select, TrainerConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "calhouse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "California housing price model: training, selection, and inference")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train all candidate models and persist the best one
    Train {
        /// Input dataset (CSV with the nine housing columns)
        #[arg(short, long)]
        data: PathBuf,

        /// Output model artifact
        #[arg(short, long, default_value = "save_model/house_price_model.json")]
        output: PathBuf,

        /// Random seed for the split and the stochastic candidates
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Held-out fraction for evaluation
        #[arg(long, default_value = "0.2")]
        test_split: f64,
    },

    /// Estimate a property's price from a saved model
    Predict {
        /// Trained model artifact
        #[arg(short, long, default_value = "save_model/house_price_model.json")]
        model: PathBuf,

        #[arg(long, default_value = "-119.0")]
        longitude: f64,

        #[arg(long, default_value = "36.0")]
        latitude: f64,

        #[arg(long, default_value = "25.0")]
        housing_median_age: f64,

        #[arg(long, default_value = "2000.0")]
        total_rooms: f64,

        #[arg(long, default_value = "400.0")]
        total_bedrooms: f64,

        #[arg(long, default_value = "30000.0")]
        population: f64,

        #[arg(long, default_value = "1200.0")]
        households: f64,

        #[arg(long, default_value = "4.0")]
        median_income: f64,

        /// USD to INR conversion rate
        #[arg(long, default_value_t = FALLBACK_USD_TO_INR)]
        rate: f64,

        /// Write a plain-text estimation report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show dataset information
    Info {
        /// Input dataset file
        #[arg(short, long)]
        data: PathBuf,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(
    data_path: &Path,
    output_path: &Path,
    seed: u64,
    test_split: f64,
) -> anyhow::Result<()> {
    section("Train");

    step_run("Loading data");
    let start = Instant::now();
    let df = load_dataset(data_path)?;
    step_done(&format!(
        "{} rows × {} cols in {:?}",
        df.height(),
        df.width(),
        start.elapsed()
    ));

    step_run("Preparing features");
    let (x, y) = select_features(&df)?;
    let template = Preprocessor::from_frame(&x);
    step_done(&format!("{} feature columns", x.width()));

    step_run("Training candidates");
    let start = Instant::now();
    let config = TrainerConfig { test_split, seed };
    let pipeline = train_and_select(&x, &y, &template, candidate_models(), &config)?;
    step_done(&format!("{:?}", start.elapsed()));

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    step_run(&format!("Saving → {}", output_path.display()));
    pipeline.save(output_path)?;
    step_done("");

    println!();
    println!(
        "  {:<12} {}",
        muted("Best"),
        pipeline.model_name.white().bold()
    );
    println!(
        "  {:<12} {}",
        muted("RMSE"),
        format!("{:.4}", pipeline.metrics.rmse).white()
    );
    println!(
        "  {:<12} {}",
        muted("R²"),
        format!("{:.4}", pipeline.metrics.r2).white()
    );
    println!();

    Ok(())
}

pub fn cmd_predict(
    model_path: &Path,
    input: PropertyInput,
    rate: f64,
    report_path: Option<&Path>,
) -> anyhow::Result<()> {
    section("Predict");

    step_run("Loading model");
    let estimator = PriceEstimator::load(model_path)?;
    step_done(&format!(
        "{} (R² {:.2})",
        estimator.model_name(),
        estimator.metrics().r2
    ));

    let estimate = estimator.estimate(&input)?;
    let (inr, lower_inr, upper_inr) = estimate.in_currency(rate);

    println!();
    println!(
        "  {:<16} {}",
        muted("Price (USD)"),
        format!("${:.0}", estimate.usd).white().bold()
    );
    println!(
        "  {:<16} {}",
        muted("Price (INR)"),
        format!("Rs {:.0}", inr).white()
    );
    println!(
        "  {:<16} {}",
        muted("USD range"),
        format!("${:.0} – ${:.0}", estimate.lower_usd, estimate.upper_usd).white()
    );
    println!(
        "  {:<16} {}",
        muted("INR range"),
        format!("Rs {:.0} – Rs {:.0}", lower_inr, upper_inr).white()
    );

    section("Features");
    for (name, value) in input.fields() {
        println!("  {:<20} {}", muted(name), value);
    }

    if let Some(path) = report_path {
        step_run(&format!("Writing report → {}", path.display()));
        std::fs::write(path, estimate.report(rate))?;
        step_done("");
    }

    println!();
    Ok(())
}

pub fn cmd_info(data_path: &Path) -> anyhow::Result<()> {
    section("Data Info");

    let df = load_dataset(data_path)?;

    println!("  {:<12} {}", muted("File"), data_path.display());
    println!("  {:<12} {}", muted("Rows"), df.height());
    println!("  {:<12} {}", muted("Columns"), df.width());
    println!();

    println!(
        "  {:<20} {:<12} {:>6}",
        muted("Column"),
        muted("Type"),
        muted("Nulls")
    );
    println!("  {}", dim(&"─".repeat(42)));

    for col in df.get_columns() {
        println!(
            "  {:<20} {:<12} {:>6}",
            col.name(),
            format!("{:?}", col.dtype()).truecolor(140, 140, 140),
            col.null_count()
        );
    }

    println!();
    Ok(())
}
