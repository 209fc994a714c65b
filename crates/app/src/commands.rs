use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io;
use std::path::Path;
use tally_core::{Currency, CURRENCY_PRESETS};
use tally_export::{export_to_path, render_table};
use tally_extract::{
    BestGuessReviewer, InvoicePipeline, PdfTextExtractor, PlainTextExtractor, RankedCandidates,
    Reviewer, SkipReviewer, TextExtractor, TotalMatch,
};

use crate::cli::{CandidatesArgs, ExtractArgs};
use crate::config::{Config, ReviewMode};
use crate::prompt::TerminalReviewer;

// ── extract ───────────────────────────────────────────────────────────────────

pub async fn extract(args: ExtractArgs, mut config: Config) -> Result<()> {
    config.apply_args(&args);

    let pipeline = InvoicePipeline::for_currency(PdfTextExtractor::new(), &config.currency)?
        .with_ranker(config.ranker());
    let mut reviewer = reviewer_for(&config);
    run_extract(&pipeline, reviewer.as_mut(), &args, &config).await
}

async fn run_extract<E, R>(
    pipeline: &InvoicePipeline<E>,
    reviewer: &mut R,
    args: &ExtractArgs,
    config: &Config,
) -> Result<()>
where
    E: TextExtractor,
    R: Reviewer + ?Sized,
{
    let progress = progress_bar(args.no_progress)?;
    let report = pipeline
        .scan_folder(&args.folder, |done, total| {
            progress.set_length(total as u64);
            progress.set_position(done as u64);
        })
        .await
        .with_context(|| format!("failed to scan {}", args.folder.display()))?;
    progress.finish_and_clear();

    for failure in &report.failures {
        eprintln!("Error processing {}: {}", failure.path.display(), failure.reason);
    }

    // Review problems never cost the totals already in the ledger.
    let mut ledger = report.ledger;
    if !report.unmatched.is_empty() {
        println!("{} file(s) need review.", report.unmatched.len());
        match pipeline.review_unmatched(&mut ledger, &report.unmatched, reviewer) {
            Ok(summary) => {
                tracing::info!(
                    accepted = summary.accepted(),
                    rejected = summary.rejected,
                    unreviewed = summary.unreviewed,
                    "review finished"
                );
                if summary.unreviewed > 0 {
                    eprintln!("Review stopped early; {} file(s) left out.", summary.unreviewed);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "review failed, keeping totals recorded so far");
                eprintln!("Review failed: {e}");
            }
        }
    }

    if ledger.is_empty() {
        println!("No totals were found in the PDFs.");
        return Ok(());
    }

    print!("{}", render_table(&ledger, &config.currency));
    println!(
        "Totals extracted successfully! Grand total: {}{}",
        config.currency,
        ledger.grand_total().to_grouped_string()
    );

    if let Some(output) = &args.output {
        export_to_path(output, &ledger, &config.export)
            .with_context(|| format!("failed to save {}", output.display()))?;
        println!("Results saved to {}", output.display());
    }
    Ok(())
}

fn reviewer_for(config: &Config) -> Box<dyn Reviewer> {
    match config.review {
        ReviewMode::Interactive => Box::new(TerminalReviewer::new(
            io::stdin().lock(),
            io::stdout(),
            config.review_text_lines,
        )),
        ReviewMode::BestGuess => Box::new(BestGuessReviewer),
        ReviewMode::Skip => Box::new(SkipReviewer),
    }
}

fn progress_bar(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.green/white} {pos}/{len} files [{elapsed}]")?
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    Ok(bar)
}

// ── candidates ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CandidatesReport<'a> {
    file: &'a Path,
    currency: &'a Currency,
    primary: Option<TotalMatch>,
    best_guess: Option<String>,
    candidates: RankedCandidates,
}

pub fn candidates(args: CandidatesArgs, config: Config) -> Result<()> {
    let currency = args
        .currency
        .as_deref()
        .map(Currency::new)
        .unwrap_or_else(|| config.currency.clone());

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let is_pdf = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    let (primary, candidates) = if is_pdf {
        inspect(PdfTextExtractor::new(), &currency, &config, &args.file, &bytes)?
    } else {
        inspect(PlainTextExtractor, &currency, &config, &args.file, &bytes)?
    };

    let report = CandidatesReport {
        file: &args.file,
        currency: &currency,
        primary,
        best_guess: candidates.best_guess().map(|c| c.label().to_string()),
        candidates,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_candidates(&report));
    }
    Ok(())
}

fn inspect<E: TextExtractor>(
    extractor: E,
    currency: &Currency,
    config: &Config,
    path: &Path,
    bytes: &[u8],
) -> Result<(Option<TotalMatch>, RankedCandidates)> {
    let pipeline = InvoicePipeline::for_currency(extractor, currency)?.with_ranker(config.ranker());
    pipeline
        .inspect_bytes(path, bytes)
        .with_context(|| format!("failed to read text from {}", path.display()))
}

fn format_candidates(report: &CandidatesReport<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("File: {}\n", report.file.display()));
    match &report.primary {
        Some(m) => out.push_str(&format!(
            "Primary match: Total {}{}\n",
            report.currency,
            m.amount.to_grouped_string()
        )),
        None => out.push_str(&format!("Primary match: none for currency {}\n", report.currency)),
    }
    if report.candidates.is_empty() {
        out.push_str("No candidate totals found.\n");
    } else {
        out.push_str("Candidates:\n");
        for (i, c) in report.candidates.iter().enumerate() {
            let marker = if i == 0 { "  (best guess)" } else { "" };
            out.push_str(&format!("  [{}] {}{marker}\n", i + 1, c.label()));
        }
    }
    out
}

// ── currencies ────────────────────────────────────────────────────────────────

pub fn currencies(config: &Config) {
    for symbol in CURRENCY_PRESETS {
        let marker = if symbol == config.currency.symbol() { "  (default)" } else { "" };
        println!("{symbol}{marker}");
    }
    if !config.currency.is_preset() {
        println!("{}  (default, custom)", config.currency);
    }
}
