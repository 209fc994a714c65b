use std::fmt::Write;
use tally_core::{display_name, Currency, TotalsLedger};

const HEADERS: [&str; 3] = ["Filename", "Total", "Source"];

/// Plain-text results table: file name (no directories), total, and how the
/// total was obtained, with a grand total line underneath.
pub fn render_table(ledger: &TotalsLedger, currency: &Currency) -> String {
    let rows: Vec<[String; 3]> = ledger
        .iter()
        .map(|(path, entry)| {
            [display_name(path), entry.total.to_grouped_string(), entry.source.to_string()]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let [name_w, total_w, source_w] = widths;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_w$}  {:>total_w$}  {}",
        HEADERS[0], HEADERS[1], HEADERS[2]
    );
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(name_w),
        "-".repeat(total_w),
        "-".repeat(source_w)
    );
    for [name, total, source] in &rows {
        let _ = writeln!(out, "{name:<name_w$}  {total:>total_w$}  {source}");
    }
    let _ = writeln!(
        out,
        "\nGrand total: {}{}",
        currency,
        ledger.grand_total().to_grouped_string()
    );
    out
}
