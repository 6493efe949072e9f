//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::CurrencyCode;

/// Request to convert an amount between two currencies.
///
/// Currencies are taken as plain strings so that unknown symbols surface as
/// an invalid currency rather than a body parsing failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversionRequest {
    /// Alphabetic code of the currency to convert from
    #[schema(example = "USD")]
    pub source: String,
    /// Alphabetic code of the currency to convert into
    #[schema(example = "UAH")]
    pub target: String,
    /// Positive amount in units of `source`
    #[schema(example = 100.0)]
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(source: impl Into<String>, target: impl Into<String>, amount: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            amount,
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    #[schema(example = 100.0)]
    pub amount: f64,
    /// Amount in units of `target`, unrounded
    #[schema(example = 4222.0)]
    pub converted_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_camel_case() {
        let result = ConversionResult {
            source: CurrencyCode::USD,
            target: CurrencyCode::UAH,
            amount: 100.0,
            converted_amount: 4222.0,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "source": "USD",
                "target": "UAH",
                "amount": 100.0,
                "convertedAmount": 4222.0
            })
        );
    }

    #[test]
    fn test_request_accepts_integer_amount() {
        let req: ConversionRequest =
            serde_json::from_str(r#"{"source": "USD", "target": "UAH", "amount": 100}"#).unwrap();
        assert_eq!(req.amount, 100.0);
        assert_eq!(req.source, "USD");
    }
}
