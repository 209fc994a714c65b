pub mod currency;
pub mod ledger;
pub mod money;

pub use currency::{Currency, CURRENCY_PRESETS};
pub use ledger::{display_name, TotalEntry, TotalSource, TotalsLedger};
pub use money::{Money, MoneyError};
