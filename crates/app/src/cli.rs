use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ReviewMode;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Extract invoice totals from a folder of PDFs and export them to CSV"
)]
pub struct Cli {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a folder, review unmatched invoices, print and optionally save the totals.
    Extract(ExtractArgs),
    /// Show the primary match and ranked candidate totals for one file.
    Candidates(CandidatesArgs),
    /// List the preset currency symbols.
    Currencies,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Folder searched recursively for `*.pdf` files.
    pub folder: PathBuf,

    /// Currency symbol as printed on the invoices (e.g. `£` or `US$`).
    #[arg(long, short)]
    pub currency: Option<String>,

    /// Write the results to this CSV file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub review: Option<ReviewMode>,

    /// Leave the `Grand Total` row out of the CSV.
    #[arg(long, default_value_t = false)]
    pub no_grand_total: bool,

    /// Write CSV amounts with the currency symbol in front.
    #[arg(long, default_value_t = false)]
    pub currency_prefix: bool,

    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CandidatesArgs {
    /// A PDF, or a `.txt` file holding already-extracted text.
    pub file: PathBuf,

    #[arg(long, short)]
    pub currency: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
