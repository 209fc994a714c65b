use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::money::{Money, MoneyError};

/// How an accepted total was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalSource {
    /// The primary `Total <currency><amount>` pattern matched.
    Matched,
    /// A reviewer picked one of the ranked candidates.
    Selected,
    /// A reviewer typed the amount in.
    Manual,
}

impl fmt::Display for TotalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalSource::Matched => write!(f, "matched"),
            TotalSource::Selected => write!(f, "selected"),
            TotalSource::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalEntry {
    pub total: Money,
    pub source: TotalSource,
}

/// Accepted totals keyed by document path, in the order they were accepted,
/// together with their running grand total.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TotalsLedger {
    entries: IndexMap<PathBuf, TotalEntry>,
    grand_total: Money,
}

impl TotalsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the accepted total for `path`. Recording the same path again
    /// replaces the earlier value (keeping its position) and adjusts the sum.
    /// On overflow of the grand total the ledger is left unchanged.
    pub fn record(
        &mut self,
        path: impl Into<PathBuf>,
        total: Money,
        source: TotalSource,
    ) -> Result<(), MoneyError> {
        let path = path.into();
        let base = match self.entries.get(&path) {
            Some(previous) => self.grand_total.checked_sub(previous.total)?,
            None => self.grand_total,
        };
        self.grand_total = base.checked_add(total)?;
        self.entries.insert(path, TotalEntry { total, source });
        Ok(())
    }

    pub fn get(&self, path: &Path) -> Option<&TotalEntry> {
        self.entries.get(path)
    }

    pub fn grand_total(&self) -> Money {
        self.grand_total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &TotalEntry)> {
        self.entries.iter().map(|(p, e)| (p.as_path(), e))
    }

}

/// File name without its directory, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
