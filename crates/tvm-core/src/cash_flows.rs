use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TvmError;
use crate::math::{checked_div, one_plus_rate};
use crate::types::{Money, Rate};
use crate::TvmResult;

pub const DEFAULT_IRR_GUESS: Rate = dec!(0.10);
pub const DEFAULT_IRR_TOLERANCE: Decimal = dec!(0.000001);
pub const DEFAULT_IRR_MAX_ITERATIONS: u32 = 1000;

/// Derivatives smaller than this are treated as a flat tangent.
const DERIVATIVE_EPSILON: Decimal = dec!(0.000000000001);

/// Each flow discounted to period 0: flows[i] / (1 + r)^i
pub fn discounted_cash_flows(rate: Rate, cash_flows: &[Money]) -> TvmResult<Vec<Money>> {
    if rate <= dec!(-1) {
        return Err(TvmError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = one_plus_rate(rate)?;
    let mut discount = Decimal::ONE;
    let mut discounted = Vec::with_capacity(cash_flows.len());

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = discount
                .checked_mul(one_plus_r)
                .ok_or_else(|| TvmError::ArithmeticOverflow {
                    context: format!("NPV discount factor at period {t}"),
                })?;
        }
        discounted.push(checked_div(*cf, discount, &format!("NPV discount factor at period {t}"))?);
    }

    Ok(discounted)
}

/// Net Present Value of a series of cash flows. Index 0 is not discounted.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> TvmResult<Money> {
    let discounted = discounted_cash_flows(rate, cash_flows)?;
    discounted
        .iter()
        .try_fold(Decimal::ZERO, |acc, pv| acc.checked_add(*pv))
        .ok_or_else(|| TvmError::ArithmeticOverflow {
            context: "NPV sum".into(),
        })
}

// ---------------------------------------------------------------------------
// IRR (Newton-Raphson)
// ---------------------------------------------------------------------------

/// Solver settings for [`solve_irr`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrSettings {
    /// Starting rate for the iteration.
    pub guess: Rate,
    /// Stop once successive rates differ by less than this.
    pub tolerance: Decimal,
    pub max_iterations: u32,
}

impl Default for IrrSettings {
    fn default() -> Self {
        IrrSettings {
            guess: DEFAULT_IRR_GUESS,
            tolerance: DEFAULT_IRR_TOLERANCE,
            max_iterations: DEFAULT_IRR_MAX_ITERATIONS,
        }
    }
}

/// How the IRR iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrStatus {
    /// Successive rates agreed within tolerance.
    Converged,
    /// The NPV curve was flat at the current rate; no Newton step possible.
    FlatDerivative,
    /// Ran out of iterations; the rate is a best-effort estimate.
    IterationLimit,
    /// An iterate reached 1 + r <= 0 or a discount factor left the Decimal
    /// range; the last in-domain rate is returned.
    OutOfDomain,
}

/// Result of [`solve_irr`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrSolution {
    pub rate: Rate,
    /// Newton steps taken.
    pub iterations: u32,
    /// NPV at `rate`, when it can be evaluated.
    pub npv: Option<Money>,
    pub status: IrrStatus,
}

impl IrrSolution {
    pub fn is_converged(&self) -> bool {
        self.status == IrrStatus::Converged
    }
}

/// NPV and dNPV/dr at `rate`, or `None` outside the evaluable domain.
fn npv_and_derivative(cash_flows: &[Money], rate: Rate) -> Option<(Money, Decimal)> {
    let one_plus_r = Decimal::ONE.checked_add(rate)?;
    if one_plus_r <= Decimal::ZERO {
        return None;
    }

    let mut npv_val = Decimal::ZERO;
    let mut dnpv = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = discount.checked_mul(one_plus_r)?;
        }
        let pv = cf.checked_div(discount)?;
        npv_val = npv_val.checked_add(pv)?;
        if t > 0 {
            // d/dr [cf / (1+r)^t] = -t * cf / (1+r)^(t+1)
            let slope = pv.checked_mul(Decimal::from(t as u64))?.checked_div(one_plus_r)?;
            dnpv = dnpv.checked_sub(slope)?;
        }
    }

    Some((npv_val, dnpv))
}

/// Internal Rate of Return using Newton-Raphson, reporting how it ended.
///
/// Never fails: a non-converging run still yields its last rate, flagged by
/// `status`.
pub fn solve_irr(cash_flows: &[Money], settings: &IrrSettings) -> IrrSolution {
    let finish = |rate: Rate, iterations: u32, status: IrrStatus| IrrSolution {
        rate,
        iterations,
        npv: npv_and_derivative(cash_flows, rate).map(|(value, _)| value),
        status,
    };

    let mut rate = settings.guess;
    let mut last_in_domain = settings.guess;

    for i in 0..settings.max_iterations {
        let Some((npv_val, dnpv)) = npv_and_derivative(cash_flows, rate) else {
            return finish(last_in_domain, i, IrrStatus::OutOfDomain);
        };
        last_in_domain = rate;

        if dnpv.abs() < DERIVATIVE_EPSILON {
            return finish(rate, i, IrrStatus::FlatDerivative);
        }

        let Some(next) = npv_val.checked_div(dnpv).and_then(|step| rate.checked_sub(step)) else {
            return finish(rate, i, IrrStatus::OutOfDomain);
        };

        if (next - rate).abs() < settings.tolerance {
            return finish(next, i + 1, IrrStatus::Converged);
        }

        rate = next;
    }

    finish(rate, settings.max_iterations, IrrStatus::IterationLimit)
}

/// Internal Rate of Return with default tolerance and iteration limit.
///
/// Returns the best-effort rate whether or not the iteration converged; use
/// [`solve_irr`] to inspect convergence.
pub fn irr(cash_flows: &[Money], guess: Rate) -> Rate {
    let settings = IrrSettings {
        guess,
        ..IrrSettings::default()
    };
    solve_irr(cash_flows, &settings).rate
}
