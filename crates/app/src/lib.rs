use payee_match::MatchConfig;
use payee_storage::RecordStore;

pub mod commands;
pub mod export;

pub use commands::CommandError;
pub use export::ExportPayload;

/// Everything a command needs: the record store and the matching knobs.
pub struct AppState<S: RecordStore> {
    pub store: S,
    pub config: MatchConfig,
}

impl<S: RecordStore> AppState<S> {
    pub fn new(store: S, config: MatchConfig) -> Self {
        Self { store, config }
    }
}
