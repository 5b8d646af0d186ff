//! Run a configuration across a grid of annual return rates
//!
//! Outputs final principal, total net return, TWRR and MWRR per rate so the
//! effect of fees and contribution timing can be compared side by side.

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::time::Instant;

use investment_projection::{config::load_config, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "sensitivity", about = "Project one configuration under several annual returns")]
struct Args {
    /// JSON configuration file used as the base scenario
    #[arg(long)]
    config: PathBuf,

    /// Lowest annual return as a fraction
    #[arg(long, default_value = "0")]
    from: Decimal,

    /// Highest annual return as a fraction
    #[arg(long, default_value = "0.10")]
    to: Decimal,

    /// Step between rates
    #[arg(long, default_value = "0.01")]
    step: Decimal,
}

fn rate_grid(from: Decimal, to: Decimal, step: Decimal) -> Vec<Decimal> {
    if step <= Decimal::ZERO {
        return vec![from];
    }
    let mut rates = Vec::new();
    let mut rate = from;
    while rate <= to {
        rates.push(rate);
        rate += step;
    }
    rates
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let base = load_config(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    let rates = rate_grid(args.from, args.to, args.step);

    let runner = ScenarioRunner::new(base);
    let baseline = runner.run().context("running base configuration")?.summary();
    let base_config = runner.base();
    println!(
        "Base: {:.2}% return, {} fees, final {:.2} {} (TWRR {:.4}%, MWRR {:.4}%)\n",
        base_config.returns.value * dec!(100),
        base_config.fees.len(),
        baseline.final_principal,
        base_config.global.currency,
        baseline.final_twrr,
        baseline.final_mwrr,
    );

    let start = Instant::now();
    let results = runner.run_return_sensitivities(&rates);
    println!("Ran {} scenarios in {:?}\n", results.len(), start.elapsed());

    println!(
        "{:>10} {:>16} {:>12} {:>12} {:>12}",
        "Return%", "Final", "TotalNet%", "TWRR%", "MWRR%"
    );
    println!("{}", "-".repeat(66));

    for (rate, result) in results {
        let summary = result?.summary();
        println!(
            "{:>10.2} {:>16.2} {:>12.4} {:>12.4} {:>12.4}",
            rate * dec!(100),
            summary.final_principal,
            summary.total_net_return_rate,
            summary.final_twrr,
            summary.final_mwrr,
        );
    }

    Ok(())
}
