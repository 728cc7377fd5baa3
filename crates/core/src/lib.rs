pub mod money;
pub mod transaction;
pub mod user;
pub mod validation;

pub use money::Money;
pub use transaction::{
    next_transaction_id, Transaction, TransactionId, TransactionKind, UnvalidatedTransaction,
    ValidatedTransaction,
};
pub use user::{next_user_id, User, UserId};
pub use validation::ValidationError;
