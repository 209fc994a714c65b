pub mod csv;
pub mod table;

pub use crate::csv::{export_csv, export_to_path, AmountStyle, CsvExportProfile, ExportError};
pub use table::render_table;
