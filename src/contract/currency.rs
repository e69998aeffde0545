// ABOUTME: Currency conversion contract - amount and currency pair request,
// ABOUTME: and the single rounded final amount payload.

use std::fmt;

use serde::Deserialize;

use super::ResultSchema;
use crate::tool::{Constraint, Contract, Normalize, ParamSpec, ToolSpec};

pub const CURRENCY_TOOL: &str = "convert_currency";

/// Validated conversion request. Currency codes are 3 lower-case letters.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyRequest {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

impl Contract for CurrencyRequest {
    fn spec() -> ToolSpec {
        ToolSpec::new(
            CURRENCY_TOOL,
            "Convert an amount between two currencies at today's rate. Currencies \
             are ISO codes such as usd, eur, inr.",
            ResultSchema::Conversion,
        )
        .param(ParamSpec::number("amount", "Amount to convert").default_value(1.0))
        .param(
            ParamSpec::string("from_currency", "Source 3-letter ISO currency code")
                .default_value("usd")
                .normalize(Normalize::Lower)
                .constraint(Constraint::Letters(3)),
        )
        .param(
            ParamSpec::string("to_currency", "Target 3-letter ISO currency code")
                .default_value("inr")
                .normalize(Normalize::Lower)
                .constraint(Constraint::Letters(3)),
        )
    }
}

/// Converted amount rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertedAmount {
    pub final_amount: f64,
}

impl ConvertedAmount {
    /// `round(amount * rate, 2)`.
    pub fn convert(amount: f64, rate: f64) -> Self {
        Self {
            final_amount: (amount * rate * 100.0).round() / 100.0,
        }
    }
}

impl fmt::Display for ConvertedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "final_amount: {:.2}", self.final_amount)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tool::validate;

    #[test]
    fn test_defaults() {
        let args = validate(&CurrencyRequest::spec(), &json!({})).unwrap();
        let request: CurrencyRequest = serde_json::from_value(args.into()).unwrap();
        assert_eq!(request.amount, 1.0);
        assert_eq!(request.from_currency, "usd");
        assert_eq!(request.to_currency, "inr");
    }

    #[test]
    fn test_codes_lower_cased() {
        let args = validate(
            &CurrencyRequest::spec(),
            &json!({"amount": "100", "from_currency": "USD", "to_currency": "EUR"}),
        )
        .unwrap();
        assert_eq!(args["from_currency"], "usd");
        assert_eq!(args["to_currency"], "eur");
        assert_eq!(args["amount"], 100.0);
    }

    #[test]
    fn test_codes_must_be_three_letters() {
        let cases = [
            ("from_currency", "../x"),
            ("to_currency", "euro"),
            ("from_currency", "  "),
        ];
        for (field, bad) in cases {
            let mut args = serde_json::Map::new();
            args.insert(field.to_string(), json!(bad));
            let failure = validate(&CurrencyRequest::spec(), &args.into()).unwrap_err();
            assert_eq!(failure.field.as_deref(), Some(field));
        }
    }

    #[test]
    fn test_convert_rounds_to_cents() {
        assert_eq!(ConvertedAmount::convert(100.0, 0.923456).final_amount, 92.35);
        assert_eq!(ConvertedAmount::convert(1.0, 83.1234).final_amount, 83.12);
        assert_eq!(ConvertedAmount::convert(0.0, 5.0).final_amount, 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ConvertedAmount { final_amount: 92.3 }.to_string(),
            "final_amount: 92.30"
        );
    }
}
