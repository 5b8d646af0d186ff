//! Investment Projection CLI
//!
//! Command-line interface for running a single projection

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

use investment_projection::{
    calculate,
    config::load_config,
    Fee, GlobalParameters, ProjectionConfig, Returns,
};

#[derive(Debug, Parser)]
#[command(name = "investment_projection", version, about = "Project an investment month by month")]
struct Args {
    /// JSON configuration file; when given the inline flags below are ignored
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting principal
    #[arg(long, default_value = "10000")]
    principal: Decimal,

    /// Contribution added at the start of every month
    #[arg(long, default_value = "0")]
    contribution: Decimal,

    /// Annual return as a fraction (0.07 = 7%)
    #[arg(long, default_value = "0")]
    annual_return: Decimal,

    /// Annual fee as a fraction, charged monthly
    #[arg(long)]
    annual_fee: Option<Decimal>,

    /// Number of months to project
    #[arg(long, default_value_t = 120)]
    months: u32,

    /// Start date (YYYY-MM-DD)
    #[arg(long, default_value = "2024-01-01")]
    start: NaiveDate,

    /// Print every row as JSON instead of the console table
    #[arg(long)]
    json: bool,

    /// Rows shown in the console table
    #[arg(long, default_value_t = 24)]
    show: usize,
}

impl Args {
    fn to_config(&self) -> anyhow::Result<ProjectionConfig> {
        if let Some(path) = &self.config {
            return load_config(path)
                .with_context(|| format!("loading configuration from {}", path.display()));
        }

        let global = GlobalParameters {
            starting_principal: self.principal,
            monthly_contribution: self.contribution,
            start_date: self.start,
            end_date: self.start,
            num_months: self.months,
            ..Default::default()
        };
        let mut config =
            ProjectionConfig::new(global).with_returns(Returns::annual(self.annual_return));
        if let Some(fee) = self.annual_fee {
            config = config.with_fee(Fee::annual("fee", fee));
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.to_config()?;
    let result = calculate(&config).context("running projection")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Investment Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("=========================\n");

    let g = &config.global;
    println!("  Starting principal: {:.2} {}", g.starting_principal, g.currency);
    println!("  Monthly contribution: {:.2}", g.monthly_contribution);
    println!("  Annual return: {}", config.returns.value);
    println!("  Fees: {}", config.fees.len());
    println!();

    println!("Projection Results ({} months):", result.month_count());
    println!(
        "{:>5} {:>10} {:>14} {:>12} {:>10} {:>14} {:>10} {:>10} {:>10}",
        "Month", "Date", "Start", "Return", "Fee", "End", "TotalNet%", "TWRR%", "MWRR%"
    );
    println!("{}", "-".repeat(105));

    for row in result.rows().iter().take(args.show) {
        println!(
            "{:>5} {:>10} {:>14.2} {:>12.2} {:>10.2} {:>14.2} {:>10.4} {:>10.4} {:>10.4}{}",
            row.month,
            row.date,
            row.starting_principal,
            row.monthly_return,
            row.monthly_fee,
            row.ending_principal,
            row.total_net_return_rate,
            row.twrr,
            row.mwrr,
            if row.mwrr_converged { "" } else { " *" },
        );
    }

    if result.rows().len() > args.show {
        println!("... ({} more months)", result.rows().len() - args.show);
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.total_months);
    println!("  Total Contributions: {:.2}", summary.total_contributions);
    println!("  Total Returns: {:.2}", summary.total_returns);
    println!("  Total Fees: {:.2}", summary.total_fees);
    println!("  Final Principal: {:.2}", summary.final_principal);
    println!("  Final Value Without Fees: {:.2}", summary.final_value_without_fees);
    println!("  Total Net Return: {:.4}%", summary.total_net_return_rate);
    println!("  TWRR: {:.4}%", summary.final_twrr);
    println!("  MWRR: {:.4}%", summary.final_mwrr);
    if !summary.mwrr_all_converged {
        println!("  (* MWRR did not converge; last estimate shown)");
    }

    Ok(())
}
