use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use tvm_core::calculators::future_value::{self, FutureValueInput};
use tvm_core::calculators::interest_rate::{self, InterestRateInput};
use tvm_core::calculators::payment::{self, PaymentInput};
use tvm_core::calculators::periods::{self, PeriodsInput};
use tvm_core::calculators::present_value::{self, PresentValueInput};
use tvm_core::PaymentTiming;

use crate::input;
use crate::input::rate::RateArgs;

/// Arguments for present value (single sum, annuity or both)
#[derive(Args)]
pub struct PresentValueArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Lump sum received at the end of the last period
    #[arg(long, allow_hyphen_values = true)]
    pub future_value: Option<Decimal>,

    /// Level payment per period
    #[arg(long, allow_hyphen_values = true)]
    pub payment: Option<Decimal>,

    #[command(flatten)]
    pub rate_args: RateArgs,

    /// Number of periods
    #[arg(long, allow_hyphen_values = true)]
    pub periods: Option<Decimal>,

    /// Payments at the start of each period (annuity due)
    #[arg(long)]
    pub due: bool,
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pv_input: PresentValueInput = match input::load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PresentValueInput {
            future_value: args.future_value,
            payment: args.payment,
            rate: args.rate_args.require()?,
            periods: args.periods.ok_or("--periods is required (or provide --input)")?,
            timing: PaymentTiming::from_due_flag(args.due),
        },
    };
    let result = present_value::calculate_present_value(&pv_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for future value (single sum, annuity or both)
#[derive(Args)]
pub struct FutureValueArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested today
    #[arg(long, allow_hyphen_values = true)]
    pub present_value: Option<Decimal>,

    /// Level payment per period
    #[arg(long, allow_hyphen_values = true)]
    pub payment: Option<Decimal>,

    #[command(flatten)]
    pub rate_args: RateArgs,

    /// Number of periods
    #[arg(long, allow_hyphen_values = true)]
    pub periods: Option<Decimal>,

    /// Payments at the start of each period (annuity due)
    #[arg(long)]
    pub due: bool,
}

pub fn run_future_value(args: FutureValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fv_input: FutureValueInput = match input::load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FutureValueInput {
            present_value: args.present_value,
            payment: args.payment,
            rate: args.rate_args.require()?,
            periods: args.periods.ok_or("--periods is required (or provide --input)")?,
            timing: PaymentTiming::from_due_flag(args.due),
        },
    };
    let result = future_value::calculate_future_value(&fv_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for a level payment: pass --present-value for a loan or
/// --future-value for a savings goal
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal to amortise
    #[arg(long, allow_hyphen_values = true, conflicts_with = "future_value")]
    pub present_value: Option<Decimal>,

    /// Savings target to accumulate
    #[arg(long, allow_hyphen_values = true)]
    pub future_value: Option<Decimal>,

    #[command(flatten)]
    pub rate_args: RateArgs,

    /// Number of payments
    #[arg(long, allow_hyphen_values = true)]
    pub periods: Option<Decimal>,

    /// Payments at the start of each period (annuity due)
    #[arg(long)]
    pub due: bool,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pmt_input: PaymentInput = match input::load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PaymentInput {
            present_value: args.present_value,
            future_value: args.future_value,
            rate: args.rate_args.require()?,
            periods: args.periods.ok_or("--periods is required (or provide --input)")?,
            timing: PaymentTiming::from_due_flag(args.due),
        },
    };
    let result = payment::calculate_payment(&pmt_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the rate per period that grows PV into FV
#[derive(Args)]
pub struct InterestRateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Starting amount (must be positive)
    #[arg(long)]
    pub present_value: Option<Decimal>,

    /// Ending amount (must be positive)
    #[arg(long)]
    pub future_value: Option<Decimal>,

    /// Number of periods (must be positive)
    #[arg(long)]
    pub periods: Option<Decimal>,

    /// Periods per year, to also report nominal and effective annual rates
    #[arg(long)]
    pub periods_per_year: Option<Decimal>,
}

pub fn run_interest_rate(args: InterestRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate_input: InterestRateInput = match input::load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => InterestRateInput {
            present_value: args
                .present_value
                .ok_or("--present-value is required (or provide --input)")?,
            future_value: args
                .future_value
                .ok_or("--future-value is required (or provide --input)")?,
            periods: args.periods.ok_or("--periods is required (or provide --input)")?,
            periods_per_year: args.periods_per_year,
        },
    };
    let result = interest_rate::calculate_interest_rate(&rate_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the number of periods needed to grow PV into FV
#[derive(Args)]
pub struct PeriodsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Starting amount (must be positive)
    #[arg(long)]
    pub present_value: Option<Decimal>,

    /// Target amount (must be positive)
    #[arg(long)]
    pub future_value: Option<Decimal>,

    #[command(flatten)]
    pub rate_args: RateArgs,
}

pub fn run_periods(args: PeriodsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let periods_input: PeriodsInput = match input::load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PeriodsInput {
            present_value: args
                .present_value
                .ok_or("--present-value is required (or provide --input)")?,
            future_value: args
                .future_value
                .ok_or("--future-value is required (or provide --input)")?,
            rate: args.rate_args.require()?,
        },
    };
    let result = periods::calculate_periods(&periods_input)?;
    Ok(serde_json::to_value(result)?)
}
