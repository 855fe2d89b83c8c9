use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;

use tvm_core::calculators::{
    future_value, interest_rate, irr, npv, payment, periods, present_value,
};
use tvm_core::{ComputationOutput, TvmResult};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Deserialize the JSON input, run the calculator and serialize the envelope.
fn run_json<I, O, F>(input_json: &str, calculate: F) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
    F: Fn(&I) -> TvmResult<ComputationOutput<O>>,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calculate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Single sums and annuities
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_present_value(input_json: String) -> NapiResult<String> {
    run_json(&input_json, present_value::calculate_present_value)
}

#[napi]
pub fn calculate_future_value(input_json: String) -> NapiResult<String> {
    run_json(&input_json, future_value::calculate_future_value)
}

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    run_json(&input_json, payment::calculate_payment)
}

// ---------------------------------------------------------------------------
// Rates and periods
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_interest_rate(input_json: String) -> NapiResult<String> {
    run_json(&input_json, interest_rate::calculate_interest_rate)
}

#[napi]
pub fn calculate_periods(input_json: String) -> NapiResult<String> {
    run_json(&input_json, periods::calculate_periods)
}

// ---------------------------------------------------------------------------
// Cash flows
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_npv(input_json: String) -> NapiResult<String> {
    run_json(&input_json, npv::calculate_npv)
}

#[napi]
pub fn calculate_irr(input_json: String) -> NapiResult<String> {
    run_json(&input_json, irr::calculate_irr)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// `Q#,##0.00` for a decimal string, e.g. "1000" -> "Q1,000.00".
#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let value = Decimal::from_str(amount.trim()).map_err(to_napi_error)?;
    Ok(tvm_core::format::format_currency(value))
}

/// A decimal rate as a percentage with `decimal_places` digits.
#[napi]
pub fn format_percent(rate: String, decimal_places: u32) -> NapiResult<String> {
    let value = Decimal::from_str(rate.trim()).map_err(to_napi_error)?;
    Ok(tvm_core::format::format_percent(value, decimal_places))
}
