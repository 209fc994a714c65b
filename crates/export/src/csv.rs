use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tally_core::{Currency, Money, TotalsLedger};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("No data to save")]
    NoRows,
}

/// How amounts are written in the total column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountStyle {
    /// `1234.56`
    #[default]
    Plain,
    /// `£1234.56`
    CurrencyPrefixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvExportProfile {
    pub identifier_header: String,
    pub total_header: String,
    /// Append a `Grand Total` row after the documents.
    pub grand_total_row: bool,
    pub amount_style: AmountStyle,
    pub currency: Currency,
    pub delimiter: String,
}

impl Default for CsvExportProfile {
    fn default() -> Self {
        Self {
            identifier_header: "Filename (Full Path)".to_string(),
            total_header: "Total".to_string(),
            grand_total_row: true,
            amount_style: AmountStyle::Plain,
            currency: Currency::default(),
            delimiter: ",".to_string(),
        }
    }
}

impl CsvExportProfile {
    fn format_amount(&self, amount: Money) -> String {
        match self.amount_style {
            AmountStyle::Plain => amount.to_string(),
            AmountStyle::CurrencyPrefixed => amount.with_symbol(self.currency.symbol()),
        }
    }

    fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

/// Write `ledger` as two-column CSV: full path, total; one row per document
/// in acceptance order, then the optional grand total trailer.
pub fn export_csv<W: Write>(
    writer: W,
    ledger: &TotalsLedger,
    profile: &CsvExportProfile,
) -> Result<(), ExportError> {
    if ledger.is_empty() {
        return Err(ExportError::NoRows);
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(profile.delimiter_byte())
        .from_writer(writer);

    wtr.write_record([profile.identifier_header.as_str(), profile.total_header.as_str()])?;
    for (path, entry) in ledger.iter() {
        wtr.write_record([path.display().to_string(), profile.format_amount(entry.total)])?;
    }
    if profile.grand_total_row {
        wtr.write_record([
            "Grand Total".to_string(),
            profile.format_amount(ledger.grand_total()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_to_path(
    path: &Path,
    ledger: &TotalsLedger,
    profile: &CsvExportProfile,
) -> Result<(), ExportError> {
    if ledger.is_empty() {
        return Err(ExportError::NoRows);
    }
    let file = std::fs::File::create(path)?;
    export_csv(std::io::BufWriter::new(file), ledger, profile)?;
    tracing::info!(path = %path.display(), rows = ledger.len(), "results saved");
    Ok(())
}
