use serde::{Deserialize, Serialize};
use sqlx::types::Decimal;
use time::Date;

use crate::error::ApiError;

/// Body for create and full-replace update. All four fields are required;
/// they are optional/defaulted here so a missing field reports the API's 400
/// instead of a decode rejection.
#[derive(Debug, Deserialize)]
pub struct ExpensePayload {
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: Option<Date>,
}

/// A fully validated expense body.
#[derive(Debug)]
pub struct ExpenseFields {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: Date,
}

impl ExpensePayload {
    pub fn validate(self) -> Result<ExpenseFields, ApiError> {
        let category = self.category.trim().to_string();
        let description = self.description.trim().to_string();
        let (amount, date) = match (self.amount, self.date) {
            (Some(a), Some(d)) if !category.is_empty() && !description.is_empty() => (a, d),
            _ => return Err(ApiError::Validation("All fields are required".into())),
        };
        if amount <= Decimal::ZERO {
            return Err(ApiError::Validation("Amount must be positive".into()));
        }
        if description.chars().count() < 3 {
            return Err(ApiError::Validation(
                "Description must be at least 3 characters".into(),
            ));
        }
        Ok(ExpenseFields {
            amount,
            category,
            description,
            date,
        })
    }
}

/// Query parameters for listing expenses.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl ExpenseFilter {
    /// `All` is the frontend's no-filter sentinel; empty means the same.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "All")
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedExpense {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn payload() -> ExpensePayload {
        ExpensePayload {
            amount: Some(Decimal::new(4250, 2)),
            category: "Food".into(),
            description: "Lunch".into(),
            date: Some(date!(2024 - 01 - 15)),
        }
    }

    #[test]
    fn valid_payload_passes() {
        let fields = payload().validate().expect("valid payload");
        assert_eq!(fields.amount, Decimal::new(4250, 2));
        assert_eq!(fields.category, "Food");
        assert_eq!(fields.description, "Lunch");
        assert_eq!(fields.date, date!(2024 - 01 - 15));
    }

    #[test]
    fn missing_fields_are_rejected() {
        for p in [
            ExpensePayload {
                amount: None,
                ..payload()
            },
            ExpensePayload {
                category: "  ".into(),
                ..payload()
            },
            ExpensePayload {
                description: "".into(),
                ..payload()
            },
            ExpensePayload {
                date: None,
                ..payload()
            },
        ] {
            let err = p.validate().unwrap_err();
            assert!(matches!(err, ApiError::Validation(m) if m == "All fields are required"));
        }
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in [Decimal::ZERO, Decimal::new(-100, 2)] {
            let p = ExpensePayload {
                amount: Some(amount),
                ..payload()
            };
            let err = p.validate().unwrap_err();
            assert!(matches!(err, ApiError::Validation(m) if m == "Amount must be positive"));
        }
    }

    #[test]
    fn short_description_is_rejected() {
        let p = ExpensePayload {
            description: "ab".into(),
            ..payload()
        };
        let err = p.validate().unwrap_err();
        assert!(
            matches!(err, ApiError::Validation(m) if m == "Description must be at least 3 characters")
        );
    }

    #[test]
    fn payload_decodes_from_json_number_amount() {
        let p: ExpensePayload = serde_json::from_str(
            r#"{"amount":42.50,"category":"Food","description":"Lunch","date":"2024-01-15"}"#,
        )
        .unwrap();
        let fields = p.validate().unwrap();
        assert_eq!(fields.amount, Decimal::new(4250, 2));
        assert_eq!(fields.date, date!(2024 - 01 - 15));
    }

    #[test]
    fn category_filter_treats_all_and_empty_as_none() {
        for c in [None, Some("All".to_string()), Some("".to_string())] {
            let f = ExpenseFilter {
                category: c,
                ..Default::default()
            };
            assert_eq!(f.category(), None);
        }
        let f = ExpenseFilter {
            category: Some("Food".into()),
            ..Default::default()
        };
        assert_eq!(f.category(), Some("Food"));
    }

    #[test]
    fn filter_decodes_from_query_string() {
        let f: ExpenseFilter =
            serde_urlencoded::from_str("category=Food&from=2024-01-01&to=2024-01-31").unwrap();
        assert_eq!(f.category(), Some("Food"));
        assert_eq!(f.from, Some(date!(2024 - 01 - 01)));
        assert_eq!(f.to, Some(date!(2024 - 01 - 31)));
    }
}
