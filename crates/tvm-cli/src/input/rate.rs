use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};
use tvm_core::Rate;

use crate::error::ParseError;

pub const ZERO_PERIODS_PER_YEAR_NOTICE: &str = "Periods per year cannot be 0, using 1.";

/// How the user quoted an interest rate. Both forms are in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateQuote {
    /// Rate already per compounding period (1.5 = 1.5%)
    PerPeriod { percent: Decimal },
    /// Nominal annual rate split evenly across the year's periods
    Annual {
        percent: Decimal,
        periods_per_year: Decimal,
    },
}

impl RateQuote {
    pub fn has_zero_periods_per_year(&self) -> bool {
        matches!(self, RateQuote::Annual { periods_per_year, .. } if periods_per_year.is_zero())
    }

    /// Per-period rate as a decimal fraction. A zero periods-per-year is
    /// replaced by 1.
    pub fn periodic_rate(&self) -> Result<Rate, ParseError> {
        let rate = match *self {
            RateQuote::PerPeriod { percent } => Some(percent / dec!(100)),
            RateQuote::Annual {
                percent,
                periods_per_year,
            } => {
                let periods_per_year = if periods_per_year.is_zero() {
                    warn!("{}", ZERO_PERIODS_PER_YEAR_NOTICE);
                    Decimal::ONE
                } else {
                    periods_per_year
                };
                (percent / dec!(100)).checked_div(periods_per_year)
            }
        };
        let rate = rate.ok_or_else(|| ParseError::RateOutOfRange(format!("{self:?}")))?;
        debug!(quote = ?self, %rate, "resolved periodic rate");
        Ok(rate)
    }
}

/// Rate flags shared by every subcommand that discounts or compounds.
#[derive(Args, Debug, Clone, Default)]
pub struct RateArgs {
    /// Interest rate per period in percent (e.g. 1.5 for 1.5%)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "annual_rate")]
    pub rate: Option<Decimal>,

    /// Nominal annual rate in percent (e.g. 12), used with --periods-per-year
    #[arg(long, allow_hyphen_values = true, requires = "periods_per_year")]
    pub annual_rate: Option<Decimal>,

    /// Compounding periods per year (e.g. 12 for monthly)
    #[arg(long, requires = "annual_rate")]
    pub periods_per_year: Option<Decimal>,
}

impl RateArgs {
    pub fn quote(&self) -> Option<RateQuote> {
        match (self.rate, self.annual_rate, self.periods_per_year) {
            (Some(percent), _, _) => Some(RateQuote::PerPeriod { percent }),
            (None, Some(percent), Some(periods_per_year)) => Some(RateQuote::Annual {
                percent,
                periods_per_year,
            }),
            _ => None,
        }
    }

    pub fn require(&self) -> Result<Rate, Box<dyn std::error::Error>> {
        let quote = self.quote().ok_or(
            "--rate or --annual-rate with --periods-per-year is required (or provide --input)",
        )?;
        Ok(quote.periodic_rate()?)
    }
}
