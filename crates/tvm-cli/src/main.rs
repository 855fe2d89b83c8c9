mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::cash_flows::{IrrArgs, NpvArgs};
use commands::time_value::{
    FutureValueArgs, InterestRateArgs, PaymentArgs, PeriodsArgs, PresentValueArgs,
};

/// Time value of money calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "tvm",
    version,
    about = "Time value of money calculations with decimal precision",
    long_about = "A CLI for present and future values, annuities, loan and savings \
                  payments, periodic rates, NPV, periods-to-target and IRR. Run \
                  `tvm menu` for the interactive calculator."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Present value of a future amount, an annuity, or both
    PresentValue(PresentValueArgs),
    /// Future value of a present amount, an annuity, or both
    FutureValue(FutureValueArgs),
    /// Level payment to repay a loan or reach a savings goal
    Payment(PaymentArgs),
    /// Rate per period that grows PV into FV
    Rate(InterestRateArgs),
    /// Net present value of periodic cash flows
    Npv(NpvArgs),
    /// Number of periods for PV to grow into FV
    Periods(PeriodsArgs),
    /// Internal rate of return (Newton-Raphson)
    Irr(IrrArgs),
    /// Interactive text menu
    Menu,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(output = ?cli.output, "dispatching subcommand");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::PresentValue(args) => commands::time_value::run_present_value(args),
        Commands::FutureValue(args) => commands::time_value::run_future_value(args),
        Commands::Payment(args) => commands::time_value::run_payment(args),
        Commands::Rate(args) => commands::time_value::run_interest_rate(args),
        Commands::Npv(args) => commands::cash_flows::run_npv(args),
        Commands::Periods(args) => commands::time_value::run_periods(args),
        Commands::Irr(args) => commands::cash_flows::run_irr(args),
        Commands::Menu => {
            tracing::debug!("starting interactive menu");
            if let Err(e) = commands::menu::run_menu() {
                eprintln!("{}: {}", "error".red().bold(), e);
                process::exit(1);
            }
            return;
        }
        Commands::Version => {
            println!("tvm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
