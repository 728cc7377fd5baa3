use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{require_non_blank, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
}

impl User {
    /// Builds a user from form input; the name is trimmed and must not be blank.
    pub fn new(id: UserId, full_name: &str) -> Result<Self, ValidationError> {
        Ok(User {
            id,
            full_name: require_non_blank("name", full_name)?,
        })
    }
}

/// Next id in the `USER{n}` sequence.
///
/// `n` is one past the largest digit run found in any existing id, so ids
/// imported from elsewhere (e.g. `XUMMkD3fvH`) still push the counter forward.
/// An empty collection starts at `USER1001`.
pub fn next_user_id(existing: &[User]) -> UserId {
    let highest = existing
        .iter()
        .flat_map(|u| digit_runs(u.id.as_str()))
        .max();

    let next = highest.map_or(1001, |n| n.saturating_add(1));
    UserId(format!("USER{next}"))
}

fn digit_runs(s: &str) -> impl Iterator<Item = u64> + '_ {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse::<u64>().ok())
}
