use payee_core::{
    next_transaction_id, next_user_id, Transaction, TransactionId, UnvalidatedTransaction,
    User, UserId, ValidatedTransaction, ValidationError,
};
use payee_match::{matching, SearchHit, UserMatch};
use payee_storage::{RecordStore, StoreError};
use serde::Serialize;
use std::fmt;

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Conflict,
    Storage,
}

#[derive(Debug, Serialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    /// Input field at fault, for `InvalidInput`.
    pub field: Option<String>,
    pub message: String,
}

impl CommandError {
    fn invalid(field: &str, message: String) -> Self {
        CommandError {
            kind: ErrorKind::InvalidInput,
            field: Some(field.to_string()),
            message,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ValidationError> for CommandError {
    fn from(e: ValidationError) -> Self {
        CommandError::invalid(e.field(), e.to_string())
    }
}

impl From<StoreError> for CommandError {
    fn from(e: StoreError) -> Self {
        let kind = match &e {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::DuplicateId { .. } => ErrorKind::Conflict,
            StoreError::Backend(_) => ErrorKind::Storage,
        };
        CommandError {
            kind,
            field: None,
            message: e.to_string(),
        }
    }
}

// ── Matching commands ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserMatchOutput {
    pub input: String,
    /// Set when the input named a stored transaction; `None` for raw text.
    pub transaction_id: Option<TransactionId>,
    pub description: String,
    pub extracted_names: Vec<String>,
    pub min_score: f32,
    pub top_k: usize,
    pub matches: Vec<UserMatch>,
}

/// Match users for a transaction id or a raw description.
///
/// The input is first tried as a transaction id (trimmed, case-insensitive).
/// Anything that is not a known id is treated as description text, so an
/// unknown id simply extracts no names and matches nobody.
pub fn find_user_matches<S: RecordStore>(
    state: &AppState<S>,
    input: &str,
) -> Result<UserMatchOutput, CommandError> {
    let transactions = state.store.load_transactions()?;
    let needle = input.trim().to_lowercase();
    let stored = transactions
        .iter()
        .find(|t| t.id.as_str().trim().to_lowercase() == needle);

    let (transaction_id, description) = match stored {
        Some(t) => (Some(t.id.clone()), t.description.clone()),
        None => (None, input.to_string()),
    };

    let extracted_names = state.config.extractor().extract(&description);
    let users = state.store.load_users()?;
    let settings = &state.config.users;
    let matches = matching::create_user_matcher(&state.config).match_users(
        &extracted_names,
        &users,
        settings.top_k,
        settings.min_score,
    );

    tracing::info!(
        "User match for {:?}: {} name(s) extracted, {} match(es)",
        input,
        extracted_names.len(),
        matches.len()
    );

    Ok(UserMatchOutput {
        input: input.to_string(),
        transaction_id,
        description,
        extracted_names,
        min_score: settings.min_score,
        top_k: settings.top_k,
        matches,
    })
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub threshold: f32,
    pub limit: Option<usize>,
    /// Number of words in the query; zero explains an empty result.
    pub query_tokens: usize,
    pub hits: Vec<SearchHit>,
}

/// Rank stored transactions against `query`. `threshold` falls back to the
/// configured default.
pub fn find_similar_transactions<S: RecordStore>(
    state: &AppState<S>,
    query: &str,
    threshold: Option<f32>,
) -> Result<SearchOutput, CommandError> {
    let threshold = threshold.unwrap_or(state.config.search.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CommandError::invalid(
            "threshold",
            format!("threshold must be within [0, 1], got {threshold}"),
        ));
    }

    let transactions = state.store.load_transactions()?;
    let hits = matching::create_transaction_search(&state.config).find_similar(
        query,
        &transactions,
        threshold,
    );
    let query_tokens = payee_match::similarity::tokens(query).count();

    tracing::info!(
        "Similarity search {:?} at {threshold}: {} hit(s) of {}",
        query,
        hits.len(),
        transactions.len()
    );

    Ok(SearchOutput {
        query: query.to_string(),
        threshold,
        limit: state.config.search.limit,
        query_tokens,
        hits,
    })
}

// ── Record commands ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AddTransactionOutput {
    pub transaction: Transaction,
    /// Names found in the description, shown back for verification.
    pub extracted_names: Vec<String>,
    pub suggested_users: Vec<UserMatch>,
}

pub fn add_transaction<S: RecordStore>(
    state: &mut AppState<S>,
    input: UnvalidatedTransaction,
) -> Result<AddTransactionOutput, CommandError> {
    let validated = ValidatedTransaction::validate(input)?;

    let existing = state.store.load_transactions()?;
    let id = next_transaction_id(&existing);
    let kind = payee_match::classify(&validated.description);
    let transaction = validated.into_transaction(id, kind);

    let extracted_names = state.config.extractor().extract(&transaction.description);
    let users = state.store.load_users()?;
    let suggested_users = matching::create_user_matcher(&state.config).match_users(
        &extracted_names,
        &users,
        state.config.users.top_k,
        state.config.users.min_score,
    );

    state.store.append_transaction(transaction.clone())?;
    tracing::info!("Added transaction {} ({})", transaction.id, transaction.amount);

    Ok(AddTransactionOutput {
        transaction,
        extracted_names,
        suggested_users,
    })
}

pub fn add_user<S: RecordStore>(state: &mut AppState<S>, name: &str) -> Result<User, CommandError> {
    let existing = state.store.load_users()?;
    let user = User::new(next_user_id(&existing), name)?;

    state.store.append_user(user.clone())?;
    tracing::info!("Added user {} ({})", user.id, user.full_name);
    Ok(user)
}

pub fn delete_user<S: RecordStore>(state: &mut AppState<S>, id: &str) -> Result<User, CommandError> {
    let removed = state.store.delete_user(&UserId::from(id.trim())).map_err(|e| {
        tracing::warn!("Delete user failed: {e}");
        CommandError::from(e)
    })?;
    tracing::info!("Deleted user {}", removed.id);
    Ok(removed)
}

pub fn delete_transaction<S: RecordStore>(
    state: &mut AppState<S>,
    id: &str,
) -> Result<Transaction, CommandError> {
    let removed = state
        .store
        .delete_transaction(&TransactionId::from(id.trim()))
        .map_err(|e| {
            tracing::warn!("Delete transaction failed: {e}");
            CommandError::from(e)
        })?;
    tracing::info!("Deleted transaction {}", removed.id);
    Ok(removed)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
