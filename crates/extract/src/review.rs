use tally_core::Money;
use thiserror::Error;

use crate::types::ReviewRequest;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("IO error during review: {0}")]
    Io(#[from] std::io::Error),
    #[error("Review aborted")]
    Aborted,
}

/// What a reviewer decided for one unmatched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// One of the ranked candidates.
    Select(Money),
    /// A value typed in by hand.
    Manual(Money),
    /// Leave the document out of the results.
    Reject,
}

/// The human-in-the-loop step for documents the primary pattern missed.
pub trait Reviewer {
    fn review(&mut self, request: &ReviewRequest<'_>) -> Result<ReviewDecision, ReviewError>;
}

/// Non-interactive reviewer: takes the best guess, rejects when there is none.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestGuessReviewer;

impl Reviewer for BestGuessReviewer {
    fn review(&mut self, request: &ReviewRequest<'_>) -> Result<ReviewDecision, ReviewError> {
        Ok(match request.candidates.best_guess() {
            Some(best) => ReviewDecision::Select(best.value()),
            None => ReviewDecision::Reject,
        })
    }
}

/// Rejects every document; used when review is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkipReviewer;

impl Reviewer for SkipReviewer {
    fn review(&mut self, _request: &ReviewRequest<'_>) -> Result<ReviewDecision, ReviewError> {
        Ok(ReviewDecision::Reject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rank_candidates;
    use std::path::Path;

    fn request<'a>(path: &'a Path, text: &'a str) -> ReviewRequest<'a> {
        ReviewRequest { path, text, candidates: rank_candidates(text) }
    }

    #[test]
    fn best_guess_selects_largest() {
        let path = Path::new("/inv/a.pdf");
        let text = "Amount 120.00 Fee 15.00";
        let decision = BestGuessReviewer.review(&request(path, text)).unwrap();
        assert_eq!(decision, ReviewDecision::Select(Money::from_cents(12000)));
    }

    #[test]
    fn best_guess_rejects_without_candidates() {
        let path = Path::new("/inv/a.pdf");
        let decision = BestGuessReviewer.review(&request(path, "Page 1.00")).unwrap();
        assert_eq!(decision, ReviewDecision::Reject);
    }

    #[test]
    fn skip_always_rejects() {
        let path = Path::new("/inv/a.pdf");
        let decision = SkipReviewer.review(&request(path, "999.00")).unwrap();
        assert_eq!(decision, ReviewDecision::Reject);
    }
}
