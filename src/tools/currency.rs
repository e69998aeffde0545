// ABOUTME: CurrencyAdapter - looks up the source currency's rate table and
// ABOUTME: converts the amount, rounding to 2 decimal places.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::http::{self, HttpFailure};
use crate::config::CurrencyConfig;
use crate::contract::{ConvertedAmount, CurrencyRequest};
use crate::tool::{ContractTool, ToolAdapter, ToolFailure, ToolResult};

const SERVICE: &str = "Currency";

pub type CurrencyTool = ContractTool<CurrencyAdapter>;

/// Adapter over the public daily exchange-rate tables.
pub struct CurrencyAdapter {
    client: reqwest::Client,
    config: CurrencyConfig,
}

impl CurrencyAdapter {
    pub fn new(client: reqwest::Client, config: CurrencyConfig) -> Self {
        Self { client, config }
    }
}

/// Pick `table[from][to]` and convert `amount`.
pub(crate) fn convert(
    table: &Value,
    request: &CurrencyRequest,
) -> Result<ConvertedAmount, ToolFailure> {
    let rates = table
        .get(&request.from_currency)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ToolFailure::upstream_format(format!(
                "rate table has no '{}' section",
                request.from_currency
            ))
        })?;

    let rate = match rates.get(&request.to_currency) {
        Some(rate) => rate.as_f64().ok_or_else(|| {
            ToolFailure::upstream_format(format!(
                "rate for '{}' is not a number",
                request.to_currency
            ))
        })?,
        None => {
            return Err(ToolFailure::unsupported(format!(
                "Currency '{}' not available",
                request.to_currency.to_uppercase()
            )));
        }
    };

    Ok(ConvertedAmount::convert(request.amount, rate))
}

#[async_trait]
impl ToolAdapter for CurrencyAdapter {
    type Request = CurrencyRequest;

    async fn execute(&self, request: CurrencyRequest) -> ToolResult {
        info!(
            amount = request.amount,
            from = %request.from_currency,
            to = %request.to_currency,
            "converting currency"
        );

        let url = format!("{}/{}.json", self.config.base_url, request.from_currency);
        debug!(%url, "rate table request");

        let table = match http::get_json(self.client.get(&url)).await {
            Ok(table) => table,
            Err(HttpFailure::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                warn!(from = %request.from_currency, "source currency not in rate tables");
                return ToolFailure::unsupported(format!(
                    "Currency '{}' not available",
                    request.from_currency.to_uppercase()
                ))
                .into();
            }
            Err(e) => {
                let failure = e.into_failure(SERVICE);
                error!(error = %failure, "rate table request failed");
                return failure.into();
            }
        };

        match convert(&table, &request) {
            Ok(converted) => {
                info!(final_amount = converted.final_amount, "currency converted");
                ToolResult::success(converted)
            }
            Err(failure) => {
                warn!(error = %failure, "currency conversion rejected");
                failure.into()
            }
        }
    }
}
