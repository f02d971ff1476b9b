//! Transaction records as supplied by the service of record

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{CoreError, CoreResult};
use super::types::{Recurrence, TransactionType};

/// Spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// CSS color, e.g. "#22c55e"
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    /// Non-negative magnitude; the sign lives in `kind`
    pub amount: Decimal,
    /// Calendar date without time of day
    pub effective_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign applied: negative for expenses
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// 0-based month of the effective date
    pub fn month0(&self) -> u32 {
        self.effective_date.month0()
    }

    pub fn year(&self) -> i32 {
        self.effective_date.year()
    }

    /// Check the record invariants that the type system does not cover
    pub fn validate(&self) -> CoreResult<()> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(CoreError::ValidationError {
                message: format!("transaction {} has a negative amount {}", self.id, self.amount),
            });
        }
        if let Some(category) = &self.category {
            if category.name.trim().is_empty() {
                return Err(CoreError::ValidationError {
                    message: format!("transaction {} has a category with an empty name", self.id),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Transaction {
        Transaction {
            id: 7,
            description: "Conta de Água".to_string(),
            amount: Decimal::from_str("85.40").unwrap(),
            effective_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            kind: TransactionType::Expense,
            recurrence: Recurrence::Monthly,
            category: Some(Category {
                id: 1,
                name: "Moradia".to_string(),
                color: Some("#f97316".to_string()),
                icon: None,
            }),
        }
    }

    #[test]
    fn test_transaction_methods() {
        let tx = sample();
        assert!(tx.is_expense());
        assert!(!tx.is_income());
        assert_eq!(tx.signed_amount(), Decimal::from_str("-85.40").unwrap());
        assert_eq!(tx.category_name(), Some("Moradia"));
        assert_eq!(tx.month0(), 1);
        assert_eq!(tx.year(), 2026);
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r##"{
            "id": 3,
            "description": "Salário",
            "amount": 5000.5,
            "effectiveDate": "2026-02-05",
            "type": "INCOME",
            "recurrence": "MONTHLY",
            "category": {"id": 9, "name": "Trabalho", "color": null, "icon": null, "createdAt": "2025-01-01T00:00:00"},
            "createdAt": "2026-02-01T10:00:00",
            "updatedAt": "2026-02-01T10:00:00"
        }"##;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, 3);
        assert_eq!(tx.amount, Decimal::from_str("5000.5").unwrap());
        assert_eq!(tx.effective_date, NaiveDate::from_ymd_opt(2026, 2, 5).unwrap());
        assert_eq!(tx.kind, TransactionType::Income);
        assert_eq!(tx.recurrence, Recurrence::Monthly);
        assert_eq!(tx.category_name(), Some("Trabalho"));
    }

    #[test]
    fn test_deserialize_without_category() {
        let json = r#"{"id": 1, "description": "x", "amount": "10", "effectiveDate": "2026-01-31", "type": "EXPENSE", "category": null}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert!(tx.category.is_none());
        assert_eq!(tx.recurrence, Recurrence::None);
    }

    #[test]
    fn test_rejects_malformed_date() {
        let json = r#"{"id": 1, "description": "x", "amount": 1, "effectiveDate": "2026-02-30", "type": "EXPENSE"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_validate_negative_amount() {
        let mut tx = sample();
        tx.amount = Decimal::from_str("-1").unwrap();
        assert!(matches!(tx.validate(), Err(CoreError::ValidationError { .. })));
    }

    #[test]
    fn test_validate_empty_category_name() {
        let mut tx = sample();
        if let Some(category) = tx.category.as_mut() {
            category.name = "  ".to_string();
        }
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_type_and_recurrence_from_str() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("DESPESA".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert_eq!("Receita".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("weekly".parse::<Recurrence>().unwrap(), Recurrence::Weekly);
        assert!("hourly".parse::<Recurrence>().is_err());
        assert!(!Recurrence::None.is_recurring());
    }
}
