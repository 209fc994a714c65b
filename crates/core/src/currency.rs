use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbols offered by default, in display order. The first is the default.
pub const CURRENCY_PRESETS: [&str; 6] = ["£", "$", "€", "₹", "¥", "₽"];

/// The currency symbol exactly as it is printed on the invoices, e.g. `£` or `US$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Currency(symbol.into().trim().to_string())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }

    pub fn is_preset(&self) -> bool {
        CURRENCY_PRESETS.contains(&self.0.as_str())
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::new(CURRENCY_PRESETS[0])
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Currency::new(s)
    }
}
