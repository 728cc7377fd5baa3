use payee_core::User;
use serde::{Deserialize, Serialize};

use crate::similarity::{HybridScorer, Scorer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMatch {
    pub user: User,
    /// The candidate name that produced the best score.
    pub matched_name: String,
    pub score: f32,
}

pub struct UserMatcher<S: Scorer = HybridScorer> {
    scorer: S,
}

impl Default for UserMatcher {
    fn default() -> Self {
        Self::new(HybridScorer::default())
    }
}

impl<S: Scorer> UserMatcher<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Ranks `users` against the extracted candidate names.
    ///
    /// A user's score is its best score against any candidate. Results are
    /// filtered to `min_score`, sorted descending with ties kept in `users`
    /// order, and cut to `top_k`.
    pub fn match_users<C: AsRef<str>>(
        &self,
        candidates: &[C],
        users: &[User],
        top_k: usize,
        min_score: f32,
    ) -> Vec<UserMatch> {
        if candidates.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let mut matches: Vec<UserMatch> = users
            .iter()
            .filter(|u| !u.full_name.trim().is_empty())
            .filter_map(|user| {
                let (name, score) = self.best_candidate(candidates, &user.full_name)?;
                (score >= min_score).then(|| UserMatch {
                    user: user.clone(),
                    matched_name: name.to_string(),
                    score,
                })
            })
            .collect();

        // `sort_by` is stable, which keeps equal scores in input order.
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        matches
    }

    /// First candidate reaching the highest score for `full_name`.
    fn best_candidate<'c, C: AsRef<str>>(
        &self,
        candidates: &'c [C],
        full_name: &str,
    ) -> Option<(&'c str, f32)> {
        let mut best: Option<(&str, f32)> = None;
        for candidate in candidates {
            let candidate = candidate.as_ref();
            let score = self.scorer.score(candidate, full_name);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best
    }
}

/// Ranks users with the default scorer.
pub fn match_users<C: AsRef<str>>(
    candidates: &[C],
    users: &[User],
    top_k: usize,
    min_score: f32,
) -> Vec<UserMatch> {
    UserMatcher::new(HybridScorer::default()).match_users(candidates, users, top_k, min_score)
}
