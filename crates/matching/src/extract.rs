use std::sync::OnceLock;

use payee_core::TransactionKind;
use regex::Regex;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// "From X", "Payment from X", "Transfer to X", ...
re!(re_keyword,
    r"(?i)\b(?:(deel\s+payment|payment|transfer|received|request)\s+)?(from|to)\s+");
// Where a name captured after a keyword stops. "or" is the common "for" typo.
re!(re_terminator,
    r"(?i)[,;]|\b(?:for|or|ref|via|invoice|on|with|debit|credit|from|to)\b");
// Anything that cannot be part of a name: digits, symbols, stray punctuation.
re!(re_noise,
    r"[^\p{L}\p{M}\s'.\-]");
// Two or more capitalised words in a row.
re!(re_capitalized_run,
    r"\b\p{Lu}\p{Ll}+(?:\s+\p{Lu}\p{Ll}+)+\b");

/// The receiving company, its legal suffixes, and the bank's error marker.
pub const DEFAULT_IGNORE_TERMS: &[&str] = &["Deel", "Limited", "Ltd", "ERR"];

const KEYWORD_WORDS: &[&str] = &["from", "to", "payment", "transfer", "received", "request", "for", "ref"];

/// Pulls candidate payer names out of free-text transaction descriptions.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    /// Lowercased.
    ignore_terms: Vec<String>,
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_TERMS)
    }
}

impl NameExtractor {
    pub fn new<I, S>(ignore_terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ignore_terms: ignore_terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Candidate names in order of appearance. Never fails; no match is an
    /// empty vector.
    ///
    /// Keyword rules ("From <Name>", "Payment to <Name>") run first and claim
    /// their span. The capitalised-word fallback only looks at text no keyword
    /// rule has claimed, so the same name is never reported twice.
    pub fn extract(&self, description: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        for m in re_keyword().find_iter(description) {
            let rest = &description[m.end()..];
            let len = re_terminator().find(rest).map_or(rest.len(), |t| t.start());
            claimed.push((m.start(), m.end() + len));

            if let Some(name) = self.clean_capture(&rest[..len], false) {
                found.push((m.start(), name));
            }
        }

        for m in re_capitalized_run().find_iter(description) {
            let overlaps = claimed
                .iter()
                .any(|&(start, end)| m.start() < end && start < m.end());
            if overlaps {
                continue;
            }
            if let Some(name) = self.clean_capture(m.as_str(), true) {
                found.push((m.start(), name));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);

        let mut seen: Vec<String> = Vec::new();
        found
            .into_iter()
            .filter_map(|(_, name)| {
                let key = name.to_lowercase();
                if seen.contains(&key) {
                    None
                } else {
                    seen.push(key);
                    Some(name)
                }
            })
            .collect()
    }

    /// Strips noise from a raw capture and decides whether it still looks
    /// like a name.
    fn clean_capture(&self, raw: &str, generic: bool) -> Option<String> {
        let replaced = re_noise().replace_all(raw, " ");

        let tokens: Vec<String> = replaced
            .split_whitespace()
            .filter_map(clean_token)
            .filter(|t| !self.is_ignored(t))
            .filter(|t| !generic || !KEYWORD_WORDS.contains(&t.to_lowercase().as_str()))
            .collect();

        if tokens.is_empty() || (generic && tokens.len() < 2) {
            return None;
        }

        let name = tokens.join(" ");
        // Keyword captures may be lowercase or in an uncased script.
        if generic && !name.starts_with(char::is_uppercase) {
            return None;
        }
        Some(name)
    }

    fn is_ignored(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        self.ignore_terms.iter().any(|t| *t == lower)
    }
}

/// Trims stray punctuation, keeping the period of a single-letter initial.
fn clean_token(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(|c: char| matches!(c, '.' | '-' | '\''));
    if trimmed.is_empty() {
        return None;
    }
    let is_initial = trimmed.chars().count() == 1 && token.ends_with('.');
    if is_initial {
        Some(format!("{trimmed}."))
    } else {
        Some(trimmed.to_string())
    }
}

/// Candidate names using the default ignore list.
pub fn extract_names(description: &str) -> Vec<String> {
    NameExtractor::default().extract(description)
}

/// Derives the transaction category from the first keyword phrase.
pub fn classify(description: &str) -> Option<TransactionKind> {
    let caps = re_keyword().captures(description)?;
    let direction = caps.get(2)?.as_str().to_lowercase();
    if direction == "to" {
        return Some(TransactionKind::Outgoing);
    }

    // "Deel payment" is categorised by its last word.
    let kind = caps
        .get(1)
        .and_then(|lead| lead.as_str().split_whitespace().last())
        .and_then(|word| word.to_lowercase().parse().ok())
        .unwrap_or(TransactionKind::Incoming);
    Some(kind)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
