use std::collections::HashSet;

use payee_core::Transaction;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::extract::NameExtractor;
use crate::similarity::{tokens, HybridScorer, Scorer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub transaction: Transaction,
    pub score: f32,
    /// Query words that also occur in the description, in query order.
    pub matched_terms: Vec<String>,
}

/// Ranks stored transactions against free-text queries.
///
/// Each description is scored against the query as a whole. With
/// `match_extracted_names` on, every name pulled out of the description is
/// scored too and the best of those scores counts, so a bare "Liam Johnson"
/// query still finds "From Liam J. Johnson for Deel, ref ...".
pub struct TransactionSearch<S: Scorer = HybridScorer> {
    scorer: S,
    extractor: NameExtractor,
    match_extracted_names: bool,
    limit: Option<usize>,
}

impl Default for TransactionSearch {
    fn default() -> Self {
        Self::new(HybridScorer::default(), NameExtractor::default(), &SearchConfig::default())
    }
}

impl<S: Scorer> TransactionSearch<S> {
    pub fn new(scorer: S, extractor: NameExtractor, config: &SearchConfig) -> Self {
        Self {
            scorer,
            extractor,
            match_extracted_names: config.match_extracted_names,
            limit: config.limit,
        }
    }

    pub fn find_similar(
        &self,
        query: &str,
        transactions: &[Transaction],
        threshold: f32,
    ) -> Vec<SearchHit> {
        let query_terms = unique_tokens(query);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = transactions
            .iter()
            .filter_map(|tx| {
                let score = self.score_transaction(query, tx);
                (score >= threshold).then(|| SearchHit {
                    transaction: tx.clone(),
                    score,
                    matched_terms: matched_terms(&query_terms, &tx.description),
                })
            })
            .collect();

        // Stable: equal scores stay in store order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }
        hits
    }

    fn score_transaction(&self, query: &str, tx: &Transaction) -> f32 {
        let description_score = self.scorer.score(query, &tx.description);
        if !self.match_extracted_names {
            return description_score;
        }
        self.extractor
            .extract(&tx.description)
            .iter()
            .map(|name| self.scorer.score(query, name))
            .fold(description_score, f32::max)
    }
}

/// Searches with the default scorer, extractor and no result cap.
pub fn find_similar(query: &str, transactions: &[Transaction], threshold: f32) -> Vec<SearchHit> {
    TransactionSearch::new(HybridScorer::default(), NameExtractor::default(), &SearchConfig::default())
        .find_similar(query, transactions, threshold)
}

fn unique_tokens(s: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens(s).filter(|t| seen.insert(t.clone())).collect()
}

fn matched_terms(query_terms: &[String], description: &str) -> Vec<String> {
    let words: HashSet<String> = tokens(description).collect();
    query_terms
        .iter()
        .filter(|t| words.contains(*t))
        .cloned()
        .collect()
}
