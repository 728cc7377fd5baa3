use payee_core::{Transaction, TransactionId, User, UserId};

use crate::store::{RecordKind, RecordStore, StoreError};

/// In-process record store. Keeps insertion order, which is the tie-break
/// order the matchers rely on.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Vec<User>,
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, rejecting duplicate ids the same way `append_*` would.
    pub fn with_records(
        users: Vec<User>,
        transactions: Vec<Transaction>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for user in users {
            store.append_user(user)?;
        }
        for transaction in transactions {
            store.append_transaction(transaction)?;
        }
        Ok(store)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

impl RecordStore for MemoryStore {
    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.clone())
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.transactions.clone())
    }

    fn append_user(&mut self, user: User) -> Result<(), StoreError> {
        if self.users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::DuplicateId {
                kind: RecordKind::User,
                id: user.id.to_string(),
            });
        }
        tracing::debug!("Appending user {}", user.id);
        self.users.push(user);
        Ok(())
    }

    fn append_transaction(&mut self, transaction: Transaction) -> Result<(), StoreError> {
        if self.transactions.iter().any(|t| t.id == transaction.id) {
            return Err(StoreError::DuplicateId {
                kind: RecordKind::Transaction,
                id: transaction.id.to_string(),
            });
        }
        tracing::debug!("Appending transaction {}", transaction.id);
        self.transactions.push(transaction);
        Ok(())
    }

    fn delete_user(&mut self, id: &UserId) -> Result<User, StoreError> {
        let idx = self
            .users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: RecordKind::User,
                id: id.to_string(),
            })?;
        tracing::debug!("Deleting user {id}");
        Ok(self.users.remove(idx))
    }

    fn delete_transaction(&mut self, id: &TransactionId) -> Result<Transaction, StoreError> {
        let idx = self
            .transactions
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: RecordKind::Transaction,
                id: id.to_string(),
            })?;
        tracing::debug!("Deleting transaction {id}");
        Ok(self.transactions.remove(idx))
    }
}
