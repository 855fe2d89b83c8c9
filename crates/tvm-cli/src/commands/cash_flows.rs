use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use tvm_core::calculators::irr::{self, IrrInput};
use tvm_core::calculators::npv::{self, NpvInput};

use crate::input;
use crate::input::parse::parse_cash_flows;
use crate::input::rate::RateArgs;

/// Arguments for net present value
#[derive(Args)]
pub struct NpvArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Cash flows from period 0 (comma-separated, e.g. "-1000,300,400")
    #[arg(long, allow_hyphen_values = true)]
    pub cash_flows: Option<String>,

    #[command(flatten)]
    pub rate_args: RateArgs,
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let npv_input: NpvInput = match input::load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let text = args
                .cash_flows
                .as_deref()
                .ok_or("--cash-flows is required (or provide --input)")?;
            NpvInput {
                cash_flows: parse_cash_flows(text)?,
                rate: args.rate_args.require()?,
            }
        }
    };
    let result = npv::calculate_npv(&npv_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for internal rate of return
#[derive(Args)]
pub struct IrrArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Cash flows from period 0 (comma-separated, e.g. "-1000,300,400")
    #[arg(long, allow_hyphen_values = true)]
    pub cash_flows: Option<String>,

    /// Starting guess in percent
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    pub guess: Decimal,

    /// Stop once successive estimates differ by less than this (decimal)
    #[arg(long)]
    pub tolerance: Option<Decimal>,

    /// Iteration cap
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let irr_input: IrrInput = match input::load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let text = args
                .cash_flows
                .as_deref()
                .ok_or("--cash-flows is required (or provide --input)")?;
            IrrInput {
                cash_flows: parse_cash_flows(text)?,
                guess: Some(args.guess / dec!(100)),
                tolerance: args.tolerance,
                max_iterations: args.max_iterations,
            }
        }
    };
    let result = irr::calculate_irr(&irr_input)?;
    tracing::debug!(
        converged = result.result.converged,
        iterations = result.result.iterations,
        "irr solver finished"
    );
    Ok(serde_json::to_value(result)?)
}
