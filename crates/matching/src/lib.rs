pub mod config;
pub mod extract;
pub mod search;
pub mod similarity;
pub mod user_match;
pub(crate) mod util;

pub use config::{ConfigError, ExtractConfig, MatchConfig, SearchConfig, UserMatchConfig};
pub use extract::{classify, extract_names, NameExtractor};
pub use search::{find_similar, SearchHit, TransactionSearch};
pub use similarity::{score, HybridScorer, ScoreWeights, Scorer, TokenScorer};
pub use user_match::{match_users, UserMatch, UserMatcher};

pub mod matching {
    use crate::*;

    pub fn create_user_matcher(config: &MatchConfig) -> UserMatcher {
        UserMatcher::new(config.scorer())
    }

    pub fn create_transaction_search(config: &MatchConfig) -> TransactionSearch {
        TransactionSearch::new(config.scorer(), config.extractor(), &config.search)
    }
}
