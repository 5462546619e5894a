//! Spreadsheet import onto a form schema.
//!
//! Rows arrive already parsed (header to raw value). This crate decides which
//! columns can feed which fields, turns rows into submission objects, and
//! discovers choice options that are missing from the schema.

mod discovery;
mod error;
mod hints;
mod importer;
mod preview;
mod suggest;
mod transform;

pub use discovery::{OptionsToAdd, apply_options_to_add, collect_options_to_add, new_options};
pub use error::{IngestError, Result};
pub use hints::{ColumnInference, is_column_compatible, split_multi, value_fits};
pub use importer::{ImportMapper, ImportOutcome, RejectedRow};
pub use preview::{DEFAULT_PREVIEW_ROWS, ImportPreview, ImportRow};
pub use suggest::{ColumnSuggestion, DEFAULT_MIN_CONFIDENCE, normalize_text, suggest_column_mapping};
pub use transform::{ColumnMapping, UNMAPPED, transform_row, transform_value};
