use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::cash_flows;
use crate::error::TvmError;
use crate::types::*;
use crate::TvmResult;

/// Input for an NPV calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvInput {
    /// Cash flows; index 0 is today (usually the negative outlay)
    pub cash_flows: Vec<Money>,
    /// Discount rate per period (decimal)
    pub rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvOutput {
    pub npv: Money,
    /// Each flow discounted to period 0
    pub discounted_cash_flows: Vec<Money>,
    pub total_inflows: Money,
    pub total_outflows: Money,
}

/// Net present value of a periodic cash-flow series.
pub fn calculate_npv(input: &NpvInput) -> TvmResult<ComputationOutput<NpvOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.cash_flows.is_empty() {
        warnings.push("No cash flows supplied; NPV is zero".into());
    }

    let discounted = cash_flows::discounted_cash_flows(input.rate, &input.cash_flows)?;
    let npv = cash_flows::npv(input.rate, &input.cash_flows)?;

    let total_inflows = checked_total(
        input.cash_flows.iter().filter(|cf| cf.is_sign_positive()).copied(),
        "total inflows",
    )?;
    let total_outflows = checked_total(
        input.cash_flows.iter().filter(|cf| cf.is_sign_negative()).map(|cf| cf.abs()),
        "total outflows",
    )?;

    if total_outflows.is_zero() && !input.cash_flows.is_empty() {
        warnings.push("No negative cash flow: there is no initial investment".into());
    }

    let output = NpvOutput {
        npv,
        discounted_cash_flows: discounted,
        total_inflows,
        total_outflows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "NPV: sum of CF_t / (1 + r)^t, t = 0..n",
        &serde_json::json!({
            "rate": input.rate.to_string(),
            "periods": input.cash_flows.len().saturating_sub(1),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn checked_total(mut flows: impl Iterator<Item = Money>, context: &str) -> TvmResult<Money> {
    flows
        .try_fold(Money::ZERO, |acc, cf| acc.checked_add(cf))
        .ok_or_else(|| TvmError::ArithmeticOverflow {
            context: context.into(),
        })
}
