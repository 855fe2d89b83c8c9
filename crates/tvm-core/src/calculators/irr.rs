use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::cash_flows::{self, IrrSettings, IrrStatus};
use crate::types::*;
use crate::TvmResult;

/// Input for an IRR calculation. Omitted solver settings use the defaults
/// (guess 10%, tolerance 1e-6, 1000 iterations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrInput {
    pub cash_flows: Vec<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrOutput {
    /// Internal rate of return per period (best effort when not converged)
    pub irr: Rate,
    pub iterations: u32,
    /// NPV at `irr`; absent when it cannot be evaluated
    pub npv_at_irr: Option<Money>,
    pub converged: bool,
    pub status: IrrStatus,
}

/// Internal rate of return by Newton-Raphson.
///
/// Never errors on non-convergence: the best-effort rate is returned with a
/// warning and `converged = false`.
pub fn calculate_irr(input: &IrrInput) -> TvmResult<ComputationOutput<IrrOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let defaults = IrrSettings::default();
    let settings = IrrSettings {
        guess: input.guess.unwrap_or(defaults.guess),
        tolerance: input.tolerance.unwrap_or(defaults.tolerance),
        max_iterations: input.max_iterations.unwrap_or(defaults.max_iterations),
    };

    let has_outflow = input.cash_flows.iter().any(|cf| *cf < Decimal::ZERO);
    let has_inflow = input.cash_flows.iter().any(|cf| *cf > Decimal::ZERO);
    if !(has_outflow && has_inflow) {
        warnings.push("Cash flows never change sign; no IRR exists".into());
    }

    let solution = cash_flows::solve_irr(&input.cash_flows, &settings);

    match solution.status {
        IrrStatus::Converged => {}
        IrrStatus::FlatDerivative => warnings.push(format!(
            "IRR did not converge: NPV curve is flat at {} after {} iterations",
            solution.rate, solution.iterations
        )),
        IrrStatus::IterationLimit => warnings.push(format!(
            "IRR did not converge within {} iterations; returning last estimate",
            settings.max_iterations
        )),
        IrrStatus::OutOfDomain => warnings.push(format!(
            "IRR iteration left the valid rate range (rate must exceed -100%) after {} iterations",
            solution.iterations
        )),
    }

    let output = IrrOutput {
        irr: solution.rate,
        iterations: solution.iterations,
        npv_at_irr: solution.npv,
        converged: solution.is_converged(),
        status: solution.status,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IRR: Newton-Raphson on NPV(r) = 0",
        &serde_json::json!({
            "guess": settings.guess.to_string(),
            "tolerance": settings.tolerance.to_string(),
            "max_iterations": settings.max_iterations,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_project_converges() {
        let input = IrrInput {
            cash_flows: vec![dec!(-1000), dec!(300), dec!(400), dec!(500), dec!(600)],
            guess: None,
            tolerance: None,
            max_iterations: None,
        };
        let result = calculate_irr(&input).unwrap();
        let out = result.result;
        assert_eq!(out.status, IrrStatus::Converged);
        assert!(out.converged);
        assert!((out.irr - dec!(0.248883)).abs() < dec!(0.000001));
        assert!(out.npv_at_irr.unwrap().abs() < dec!(0.0001));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_no_sign_change_warns() {
        let input = IrrInput {
            cash_flows: vec![dec!(100), dec!(100), dec!(100)],
            guess: None,
            tolerance: None,
            max_iterations: Some(50),
        };
        let result = calculate_irr(&input).unwrap();
        assert!(!result.result.converged);
        assert!(result.warnings.iter().any(|w| w.contains("never change sign")));
    }
}
