//! Loading the transaction snapshot handed over by the service of record

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::{CoreError, CoreResult};
use super::models::Transaction;

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Anything that can materialize the full transaction list
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn load(&self) -> CoreResult<Vec<Transaction>>;
}

/// A JSON array of transactions stored in a file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn load(&self) -> CoreResult<Vec<Transaction>> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(CoreError::FileNotFound {
                path: self.path.to_string_lossy().to_string(),
            });
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let transactions = parse_snapshot(&content)?;
        log::debug!(
            "loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }
}

/// Decode and validate a JSON snapshot
pub fn parse_snapshot(content: &str) -> CoreResult<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_str(content)?;
    for t in &transactions {
        t.validate()?;
    }
    Ok(transactions)
}
