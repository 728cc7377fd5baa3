use payee_core::{Transaction, TransactionId, User, UserId};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    User,
    Transaction,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::User => write!(f, "User"),
            RecordKind::Transaction => write!(f, "Transaction"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },
    #[error("{kind} id already exists: {id}")]
    DuplicateId { kind: RecordKind, id: String },
    /// Failure of a store that persists outside the process (file, database).
    /// `MemoryStore` never returns it.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Persistence boundary for users and transactions.
///
/// Loads return a snapshot in insertion order; matching code works on that
/// snapshot and never holds on to the store. Appends reject an id that is
/// already present. Deleting a missing id is `StoreError::NotFound` and must
/// leave the collection untouched.
pub trait RecordStore {
    fn load_users(&self) -> Result<Vec<User>, StoreError>;
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    fn append_user(&mut self, user: User) -> Result<(), StoreError>;
    fn append_transaction(&mut self, transaction: Transaction) -> Result<(), StoreError>;
    fn delete_user(&mut self, id: &UserId) -> Result<User, StoreError>;
    fn delete_transaction(&mut self, id: &TransactionId) -> Result<Transaction, StoreError>;
}
