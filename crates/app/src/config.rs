use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally_core::{Currency, Money};
use tally_export::{AmountStyle, CsvExportProfile};
use tally_extract::{CandidateRanker, DEFAULT_CANDIDATE_LIMIT, DEFAULT_CANDIDATE_THRESHOLD};
use thiserror::Error;

use crate::cli::ExtractArgs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// What happens to documents the primary pattern missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewMode {
    /// Ask on the terminal for every unmatched file.
    #[default]
    Interactive,
    /// Accept the largest candidate without asking.
    BestGuess,
    /// Leave unmatched files out.
    Skip,
}

/// `config.toml`; every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: Currency,
    pub review: ReviewMode,
    pub candidate_threshold: Money,
    pub candidate_limit: usize,
    /// Lines of extracted text shown per file during interactive review.
    pub review_text_lines: usize,
    pub export: CsvExportProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            review: ReviewMode::default(),
            candidate_threshold: DEFAULT_CANDIDATE_THRESHOLD,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            review_text_lines: 40,
            export: CsvExportProfile::default(),
        }
    }
}

impl Config {
    /// Load from `explicit` if given (it must exist), otherwise from the
    /// platform config directory, falling back to defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Command-line flags win over file values.
    pub fn apply_args(&mut self, args: &ExtractArgs) {
        if let Some(symbol) = &args.currency {
            self.currency = Currency::new(symbol.as_str());
        }
        if let Some(mode) = args.review {
            self.review = mode;
        }
        if args.no_grand_total {
            self.export.grand_total_row = false;
        }
        if args.currency_prefix {
            self.export.amount_style = AmountStyle::CurrencyPrefixed;
        }
        // The export always speaks the scan's currency.
        self.export.currency = self.currency.clone();
    }

    pub fn ranker(&self) -> CandidateRanker {
        CandidateRanker::new(self.candidate_threshold, self.candidate_limit)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "tally", "Tally")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(folder: &str) -> ExtractArgs {
        ExtractArgs {
            folder: PathBuf::from(folder),
            currency: None,
            output: None,
            review: None,
            no_grand_total: false,
            currency_prefix: false,
            no_progress: true,
        }
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c = Config::from_toml("").unwrap();
        assert_eq!(c.currency, Currency::default());
        assert_eq!(c.review, ReviewMode::Interactive);
        assert_eq!(c.candidate_threshold, Money::TEN);
        assert_eq!(c.candidate_limit, 5);
        assert!(c.export.grand_total_row);
    }

    #[test]
    fn parses_all_keys() {
        let c = Config::from_toml(
            r#"
            currency = "US$"
            review = "best-guess"
            candidate_threshold = "25.00"
            candidate_limit = 3
            review_text_lines = 10

            [export]
            grand_total_row = false
            amount_style = "currency_prefixed"
            delimiter = ";"
            "#,
        )
        .unwrap();
        assert_eq!(c.currency.symbol(), "US$");
        assert_eq!(c.review, ReviewMode::BestGuess);
        assert_eq!(c.candidate_threshold, Money::from_cents(2500));
        assert_eq!(c.candidate_limit, 3);
        assert_eq!(c.review_text_lines, 10);
        assert!(!c.export.grand_total_row);
        assert_eq!(c.export.amount_style, AmountStyle::CurrencyPrefixed);
        assert_eq!(c.export.delimiter, ";");
        assert_eq!(c.export.identifier_header, "Filename (Full Path)");
    }

    #[test]
    fn rejects_unknown_review_mode() {
        assert!(Config::from_toml(r#"review = "sometimes""#).is_err());
    }

    #[test]
    fn args_override_file_values() {
        let mut c = Config::from_toml(r#"currency = "€""#).unwrap();
        let mut a = args("/inv");
        a.currency = Some("$".into());
        a.review = Some(ReviewMode::Skip);
        a.no_grand_total = true;
        a.currency_prefix = true;
        c.apply_args(&a);

        assert_eq!(c.currency.symbol(), "$");
        assert_eq!(c.review, ReviewMode::Skip);
        assert!(!c.export.grand_total_row);
        assert_eq!(c.export.amount_style, AmountStyle::CurrencyPrefixed);
        assert_eq!(c.export.currency.symbol(), "$");
    }

    #[test]
    fn absent_args_keep_file_values() {
        let mut c = Config::from_toml("currency = \"₹\"\nreview = \"skip\"").unwrap();
        c.apply_args(&args("/inv"));
        assert_eq!(c.currency.symbol(), "₹");
        assert_eq!(c.review, ReviewMode::Skip);
        assert_eq!(c.export.currency.symbol(), "₹");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "candidate_limit = 2\n").unwrap();
        let c = Config::load(Some(&path)).unwrap();
        assert_eq!(c.candidate_limit, 2);
        assert_eq!(c.ranker(), CandidateRanker::new(Money::TEN, 2));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "candidate_limit = [").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Parse { .. })));
    }
}
