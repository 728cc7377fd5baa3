use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::validation::{require_non_blank, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        TransactionId(s.to_string())
    }
}

/// Category derived from the lead phrase of a description ("Transfer from ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Transfer,
    Payment,
    Received,
    Request,
    Incoming,
    Outgoing,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Transfer => write!(f, "transfer"),
            TransactionKind::Payment => write!(f, "payment"),
            TransactionKind::Received => write!(f, "received"),
            TransactionKind::Request => write!(f, "request"),
            TransactionKind::Incoming => write!(f, "incoming"),
            TransactionKind::Outgoing => write!(f, "outgoing"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transfer" => Ok(TransactionKind::Transfer),
            "payment" => Ok(TransactionKind::Payment),
            "received" => Ok(TransactionKind::Received),
            "request" => Ok(TransactionKind::Request),
            "incoming" => Ok(TransactionKind::Incoming),
            "outgoing" => Ok(TransactionKind::Outgoing),
            other => Err(format!("Unknown transaction kind: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Money,
    pub description: String,
    pub derived_type: Option<TransactionKind>,
}

impl Transaction {
    pub fn new(id: TransactionId, amount: Money, description: &str) -> Self {
        Transaction {
            id,
            amount,
            description: description.to_string(),
            derived_type: None,
        }
    }

    pub fn with_kind(mut self, kind: Option<TransactionKind>) -> Self {
        self.derived_type = kind;
        self
    }
}

/// Raw "Add Transaction" form input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnvalidatedTransaction {
    pub amount: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedTransaction {
    pub amount: Money,
    pub description: String,
}

impl ValidatedTransaction {
    pub fn validate(tx: UnvalidatedTransaction) -> Result<ValidatedTransaction, ValidationError> {
        let amount: Money = tx.amount.parse()?;
        if !amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount { field: "amount" });
        }
        let description = require_non_blank("description", &tx.description)?;

        Ok(ValidatedTransaction { amount, description })
    }

    pub fn into_transaction(
        self,
        id: TransactionId,
        derived_type: Option<TransactionKind>,
    ) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            derived_type,
        }
    }
}

/// Next numeric transaction id: one past the largest all-digit id, or `1001`.
/// Non-numeric ids (imported references like `caqjJtrI`) are ignored.
pub fn next_transaction_id(existing: &[Transaction]) -> TransactionId {
    let highest = existing
        .iter()
        .map(|t| t.id.as_str())
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|id| id.parse::<u64>().ok())
        .max();

    let next = highest.map_or(1001, |n| n.saturating_add(1));
    TransactionId(next.to_string())
}
