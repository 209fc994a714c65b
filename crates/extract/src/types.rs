use serde::Serialize;
use std::path::{Path, PathBuf};
use tally_core::{display_name, Money};

/// One plausible total found in a document's text.
/// Only the ranker builds these, so `value` always clears the noise threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAmount {
    value: Money,
    label: String,
}

impl CandidateAmount {
    pub(crate) fn new(value: Money) -> Self {
        Self { value, label: value.to_grouped_string() }
    }

    pub fn value(&self) -> Money {
        self.value
    }

    /// Display form: two decimals with thousands separators (`1,234.56`).
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Distinct candidates, largest first, at most the ranker's limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankedCandidates {
    candidates: Vec<CandidateAmount>,
}

impl RankedCandidates {
    pub(crate) fn new(candidates: Vec<CandidateAmount>) -> Self {
        Self { candidates }
    }

    /// The largest candidate, proposed by default for confirmation.
    pub fn best_guess(&self) -> Option<&CandidateAmount> {
        self.candidates.first()
    }

    pub fn get(&self, index: usize) -> Option<&CandidateAmount> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateAmount> {
        self.candidates.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.candidates.iter().map(CandidateAmount::label).collect()
    }

    pub fn values(&self) -> Vec<Money> {
        self.candidates.iter().map(CandidateAmount::value).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl<'a> IntoIterator for &'a RankedCandidates {
    type Item = &'a CandidateAmount;
    type IntoIter = std::slice::Iter<'a, CandidateAmount>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// A hit on the primary `Total <currency><amount>` pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalMatch {
    /// The amount text exactly as captured, separators included.
    pub raw: String,
    pub amount: Money,
}

/// A PDF and the text extracted from all of its pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    /// Page texts joined by newlines. Empty when the file has no text layer.
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }

    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Matched { path: PathBuf, total: TotalMatch },
    /// The primary pattern failed; the document goes to review.
    Unmatched(Document),
}

/// Everything a reviewer needs to decide on one unmatched document.
#[derive(Debug, Clone)]
pub struct ReviewRequest<'a> {
    pub path: &'a Path,
    pub text: &'a str,
    pub candidates: RankedCandidates,
}

impl ReviewRequest<'_> {
    pub fn file_name(&self) -> String {
        display_name(self.path)
    }
}
