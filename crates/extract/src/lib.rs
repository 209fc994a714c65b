pub mod extract;
pub mod pipeline;
pub mod review;
pub mod scan;
pub mod text;
pub mod types;

pub use extract::{
    rank_candidates, CandidateRanker, TotalMatcher, DEFAULT_CANDIDATE_LIMIT,
    DEFAULT_CANDIDATE_THRESHOLD,
};
pub use pipeline::{FileFailure, InvoicePipeline, PipelineError, ReviewSummary, ScanReport};
pub use review::{BestGuessReviewer, ReviewDecision, ReviewError, Reviewer, SkipReviewer};
pub use scan::{find_pdfs, ScanError};
pub use text::{MockExtractor, PlainTextExtractor, TextError, TextExtractor};
pub use types::{
    CandidateAmount, Document, DocumentOutcome, RankedCandidates, ReviewRequest, TotalMatch,
};

#[cfg(feature = "pdf")]
pub use text::pdf_backend::PdfTextExtractor;
