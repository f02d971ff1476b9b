//! Closed enumerations of the transaction model

use serde::{Deserialize, Serialize};

/// Direction of a transaction; the amount itself is always non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" | "receita" => Ok(TransactionType::Income),
            "expense" | "despesa" => Ok(TransactionType::Expense),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "INCOME"),
            TransactionType::Expense => write!(f, "EXPENSE"),
        }
    }
}

/// Repeat cadence. Carried as data only, never expanded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    /// Every repeating cadence, in display order
    pub const REPEATING: [Recurrence; 4] = [
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Monthly,
        Recurrence::Yearly,
    ];

    pub fn is_recurring(&self) -> bool {
        *self != Recurrence::None
    }
}

impl std::str::FromStr for Recurrence {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" => Ok(Recurrence::Yearly),
            _ => Err(format!("Invalid recurrence: {}", s)),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recurrence::None => write!(f, "NONE"),
            Recurrence::Daily => write!(f, "DAILY"),
            Recurrence::Weekly => write!(f, "WEEKLY"),
            Recurrence::Monthly => write!(f, "MONTHLY"),
            Recurrence::Yearly => write!(f, "YEARLY"),
        }
    }
}
