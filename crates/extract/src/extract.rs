use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tally_core::{Currency, Money};

use crate::types::{CandidateAmount, RankedCandidates, TotalMatch};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Digits with optional comma grouping, a point, exactly two decimals.
re!(re_decimal_amount, r"[0-9][0-9,]*\.[0-9]{2}");

/// Values at or below this are page numbers, quantities and the like.
pub const DEFAULT_CANDIDATE_THRESHOLD: Money = Money::TEN;
pub const DEFAULT_CANDIDATE_LIMIT: usize = 5;

// ── Primary pattern ───────────────────────────────────────────────────────────

/// Matches `Total` followed by the invoice currency and an amount, e.g.
/// `Total: £1,234.56` or `Total - US$99.00`. The first hit wins.
#[derive(Debug, Clone)]
pub struct TotalMatcher {
    pattern: Regex,
}

impl TotalMatcher {
    pub fn new(currency: &Currency) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"Total\s*[:\-]?\s*{}([0-9,]+\.[0-9]{{2}})",
            regex::escape(currency.symbol())
        ))?;
        Ok(Self { pattern })
    }

    pub fn find(&self, text: &str) -> Option<TotalMatch> {
        let c = self.pattern.captures(text)?;
        let raw = c.get(1)?.as_str();
        let amount = Money::parse_grouped(raw).ok()?;
        Some(TotalMatch { raw: raw.to_string(), amount })
    }
}

// ── Candidate ranking ─────────────────────────────────────────────────────────

/// Fallback heuristic for documents the primary pattern missed: every
/// two-decimal amount above the threshold, distinct, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRanker {
    threshold: Money,
    limit: usize,
}

impl Default for CandidateRanker {
    fn default() -> Self {
        Self { threshold: DEFAULT_CANDIDATE_THRESHOLD, limit: DEFAULT_CANDIDATE_LIMIT }
    }
}

impl CandidateRanker {
    pub fn new(threshold: Money, limit: usize) -> Self {
        Self { threshold, limit }
    }

    pub fn rank(&self, text: &str) -> RankedCandidates {
        let mut seen = HashSet::new();
        let mut values: Vec<Money> = re_decimal_amount()
            .find_iter(text)
            .filter_map(|m| match Money::parse_grouped(m.as_str()) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(amount = m.as_str(), error = %e, "amount skipped");
                    None
                }
            })
            .filter(|v| *v > self.threshold)
            .filter(|v| seen.insert(*v))
            .collect();

        values.sort_by(|a, b| b.cmp(a));
        values.truncate(self.limit);

        RankedCandidates::new(values.into_iter().map(CandidateAmount::new).collect())
    }
}

/// Rank with the default threshold (10.00) and limit (5).
pub fn rank_candidates(text: &str) -> RankedCandidates {
    CandidateRanker::default().rank(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
