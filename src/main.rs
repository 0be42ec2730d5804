//! Retreat Sandbox CLI
//!
//! Runs the projection for one scenario and prints the annual ledger, exit
//! breakdown, return metrics, and the IRR-vs-multiple sensitivity table.
//! Supports JSON output for integration via --json and CSV ledger export.

use anyhow::{Context, Result};
use clap::Parser;
use retreat_sandbox::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use retreat_sandbox::Scenario;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "retreat_sandbox", about = "Retreat financial projection sandbox")]
struct Args {
    /// Scenario JSON file; defaults are used for any omitted field
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Write the annual ledger to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Emit the full projection result as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_json_path(path)
            .map_err(|e| anyhow::anyhow!("failed to load scenario from {}: {e}", path.display()))?,
        None => Scenario::default(),
    };

    let engine = ProjectionEngine::new(ProjectionConfig::default());
    let result = engine.project(&scenario);

    if let Some(path) = &args.csv {
        write_ledger_csv(path, &result)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        log::info!("ledger written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&scenario, &result);
    Ok(())
}

fn print_report(scenario: &Scenario, result: &ProjectionResult) {
    println!("Retreat Financial Sandbox");
    println!("=========================\n");

    println!("Capital: ${:.0} assets, ${:.0} equity, ${:.0} owner loan, ${:.0} bank financed",
        scenario.total_assets(),
        scenario.total_equity(),
        scenario.owner_loan,
        scenario.financed_gap(),
    );
    println!();

    // Headline metrics
    println!("Equity Proceeds (Exit + NOP): ${:.0}", result.exit.equity_proceeds);
    match result.returns.irr {
        Some(irr) => println!("Equity IRR: {:.1}%", irr * 100.0),
        None => println!("Equity IRR: n/a"),
    }
    match result.returns.payback_year {
        Some(year) => println!("Payback: year {}", year),
        None => println!("Payback: N/A"),
    }
    println!();

    // Annual projection table
    println!("Annual Projection ({} years):", result.ledger.len());
    println!("{:>4} {:>6} {:>8} {:>8} {:>8} {:>7} {:>12} {:>11} {:>11} {:>11} {:>10} {:>11} {:>6} {:>7}",
        "Year", "Occ%", "CampSty", "CabinSty", "PremSty", "DayPass",
        "Revenue", "Wages", "OpEx", "NOP", "DebtSvc", "FCF", "W2x", "ROA%");
    println!("{}", "-".repeat(132));
    for row in &result.ledger {
        println!("{:>4} {:>6.1} {:>8.0} {:>8.0} {:>8.0} {:>7.0} {:>12.0} {:>11.0} {:>11.0} {:>11.0} {:>10.0} {:>11.0} {:>6.2} {:>7.1}",
            row.year,
            row.occupancy_pct,
            row.campsite_stays,
            row.cabin_stays,
            row.premium_stays,
            row.day_passes,
            row.revenue,
            row.wages,
            row.opex,
            row.nop,
            row.debt_service,
            row.fcf,
            row.w2_multiple,
            row.roa * 100.0,
        );
    }

    // Exit breakdown
    let exit = &result.exit;
    println!("\nExit Calculation (Year {}):", scenario.sale_year);
    println!("  Land & improvements appreciation: ${:.0}", exit.appreciated_assets);
    println!("  Final NOP x {:.1} multiple: ${:.0}", scenario.exit_multiple, exit.nop_multiple_value);
    println!("  Less bank-loan balance: -${:.0}", exit.bank_balance);
    println!("  Less owner-loan repayment: -${:.0}", exit.owner_loan_repayment);
    println!("  Total Exit Proceeds: ${:.0}", exit.exit_proceeds);
    println!("  Cumulative NOP: ${:.0}", exit.cumulative_nop);
    println!("  Equity Proceeds: ${:.0}", exit.equity_proceeds);

    // Sensitivity table
    println!("\nIRR vs NOP Multiple:");
    for point in &result.sensitivity {
        match point.irr_pct {
            Some(irr) => println!("  {:>4.1}x  {:>6.1}%", point.multiple, irr),
            None => println!("  {:>4.1}x     n/a", point.multiple),
        }
    }

    // Totals
    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Revenue: ${:.0}", summary.total_revenue);
    println!("  Total Wages: ${:.0}", summary.total_wages);
    println!("  Total OpEx: ${:.0}", summary.total_opex);
    println!("  Cumulative NOP: ${:.0}", summary.cumulative_nop);
    println!("  Total Debt Service: ${:.0}", summary.total_debt_service);
    println!("  Total FCF: ${:.0}", summary.total_fcf);
}

fn write_ledger_csv(path: &PathBuf, result: &ProjectionResult) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "Year,OccPct,CampsiteStays,CabinStays,PremiumStays,DayPasses,Revenue,Wages,OpEx,NOP,DebtSvc,FCF,W2Multiple,ROA")?;
    for row in &result.ledger {
        writeln!(file, "{},{:.4},{:.4},{:.4},{:.4},{:.0},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4},{:.6}",
            row.year,
            row.occupancy_pct,
            row.campsite_stays,
            row.cabin_stays,
            row.premium_stays,
            row.day_passes,
            row.revenue,
            row.wages,
            row.opex,
            row.nop,
            row.debt_service,
            row.fcf,
            row.w2_multiple,
            row.roa,
        )?;
    }

    Ok(())
}
