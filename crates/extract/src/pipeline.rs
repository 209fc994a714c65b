use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tally_core::{Currency, MoneyError, TotalSource, TotalsLedger};
use thiserror::Error;

use crate::extract::{CandidateRanker, TotalMatcher};
use crate::review::{ReviewDecision, ReviewError, Reviewer};
use crate::scan::{self, ScanError};
use crate::text::{TextError, TextExtractor};
use crate::types::{Document, DocumentOutcome, RankedCandidates, ReviewRequest, TotalMatch};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Text(#[from] TextError),
    #[error("Text extractor panicked on {0}")]
    ExtractorPanic(PathBuf),
    #[error("Invalid total pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error("Cannot record total for {path}: {source}")]
    Ledger {
        path: PathBuf,
        #[source]
        source: MoneyError,
    },
}

/// A file that could not be processed; the scan carries on without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// The outcome of one folder scan, before review.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Totals found by the primary pattern.
    pub ledger: TotalsLedger,
    /// Documents the primary pattern missed, in scan order.
    pub unmatched: Vec<Document>,
    pub failures: Vec<FileFailure>,
    pub files_seen: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub selected: usize,
    pub manual: usize,
    pub rejected: usize,
    /// Documents never shown because the reviewer aborted.
    pub unreviewed: usize,
}

impl ReviewSummary {
    pub fn accepted(&self) -> usize {
        self.selected + self.manual
    }
}

/// Orchestrates: enumerate → read → extract text → primary match, then the
/// review of whatever the primary pattern missed.
pub struct InvoicePipeline<E: TextExtractor> {
    extractor: E,
    matcher: TotalMatcher,
    ranker: CandidateRanker,
}

impl<E: TextExtractor> InvoicePipeline<E> {
    pub fn new(extractor: E, matcher: TotalMatcher) -> Self {
        Self { extractor, matcher, ranker: CandidateRanker::default() }
    }

    pub fn for_currency(extractor: E, currency: &Currency) -> Result<Self, PipelineError> {
        Ok(Self::new(extractor, TotalMatcher::new(currency)?))
    }

    pub fn with_ranker(mut self, ranker: CandidateRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// Process a file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<DocumentOutcome, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(path, &bytes)
    }

    /// Process the raw bytes of a PDF already in memory.
    pub fn process_bytes(&self, path: &Path, data: &[u8]) -> Result<DocumentOutcome, PipelineError> {
        let text = self.extract_text(path, data)?;

        match self.matcher.find(&text) {
            Some(total) => {
                tracing::debug!(path = %path.display(), total = %total.amount, "total matched");
                Ok(DocumentOutcome::Matched { path: path.to_path_buf(), total })
            }
            None => {
                tracing::debug!(path = %path.display(), "no total match, queued for review");
                Ok(DocumentOutcome::Unmatched(Document::new(path, text)))
            }
        }
    }

    /// Primary match and ranked candidates for one document, computed
    /// whether or not the primary pattern hits.
    pub fn inspect_bytes(
        &self,
        path: &Path,
        data: &[u8],
    ) -> Result<(Option<TotalMatch>, RankedCandidates), PipelineError> {
        let text = self.extract_text(path, data)?;
        Ok((self.matcher.find(&text), self.ranker.rank(&text)))
    }

    // Third-party PDF readers can panic on malformed files; one bad file must
    // not take the whole scan down.
    fn extract_text(&self, path: &Path, data: &[u8]) -> Result<String, PipelineError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.extractor.extract_text(data)))
            .map_err(|_| PipelineError::ExtractorPanic(path.to_path_buf()))?
            .map_err(PipelineError::from)
    }

    /// Scan `root` recursively. `on_progress(done, total)` is called after
    /// every file. Files that fail are logged and reported, never fatal.
    pub async fn scan_folder<F>(&self, root: &Path, mut on_progress: F) -> Result<ScanReport, PipelineError>
    where
        F: FnMut(usize, usize),
    {
        let files = scan::find_pdfs(root)?;
        let total = files.len();
        tracing::info!(folder = %root.display(), files = total, "scanning for invoices");

        let mut report = ScanReport { files_seen: total, ..ScanReport::default() };

        for (index, path) in files.into_iter().enumerate() {
            match self.process_file(&path).await {
                Ok(DocumentOutcome::Matched { path, total }) => {
                    if let Err(e) = report.ledger.record(&path, total.amount, TotalSource::Matched) {
                        tracing::warn!(path = %path.display(), error = %e, "skipping file");
                        report.failures.push(FileFailure { path, reason: e.to_string() });
                    }
                }
                Ok(DocumentOutcome::Unmatched(document)) => report.unmatched.push(document),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping file");
                    report.failures.push(FileFailure { path, reason: e.to_string() });
                }
            }
            on_progress(index + 1, total);
        }

        tracing::info!(
            matched = report.ledger.len(),
            unmatched = report.unmatched.len(),
            failed = report.failures.len(),
            "scan complete"
        );
        Ok(report)
    }

    /// Hand each unmatched document to `reviewer` together with its ranked
    /// candidates and record every accepted value in `ledger`.
    ///
    /// `ReviewError::Aborted` ends the review early: everything recorded so
    /// far stays in `ledger` and the rest is counted as `unreviewed`. Other
    /// reviewer errors are returned, again leaving earlier entries in place.
    pub fn review_unmatched<R: Reviewer + ?Sized>(
        &self,
        ledger: &mut TotalsLedger,
        documents: &[Document],
        reviewer: &mut R,
    ) -> Result<ReviewSummary, PipelineError> {
        let mut summary = ReviewSummary::default();

        for (index, document) in documents.iter().enumerate() {
            let request = ReviewRequest {
                path: &document.path,
                text: &document.text,
                candidates: self.ranker.rank(&document.text),
            };

            let decision = match reviewer.review(&request) {
                Ok(decision) => decision,
                Err(ReviewError::Aborted) => {
                    summary.unreviewed = documents.len() - index;
                    tracing::warn!(remaining = summary.unreviewed, "review aborted");
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            let (total, source) = match decision {
                ReviewDecision::Select(total) => (total, TotalSource::Selected),
                ReviewDecision::Manual(total) => (total, TotalSource::Manual),
                ReviewDecision::Reject => {
                    tracing::info!(path = %document.path.display(), "rejected in review");
                    summary.rejected += 1;
                    continue;
                }
            };
            ledger
                .record(document.path.clone(), total, source)
                .map_err(|e| PipelineError::Ledger { path: document.path.clone(), source: e })?;
            match source {
                TotalSource::Manual => summary.manual += 1,
                _ => summary.selected += 1,
            }
        }

        Ok(summary)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
