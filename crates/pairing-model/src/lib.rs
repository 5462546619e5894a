//! Shared vocabulary for the founder/investor pairing workspace.
//!
//! Pure data: field definitions, option lists and match criteria entries.
//! Behavior lives in `pairing-validate`, `pairing-map` and `pairing-ingest`.

pub mod error;
pub mod field;
pub mod lookup;
pub mod matching;
pub mod options;

pub use error::{ModelError, Result};
pub use field::{FieldDefinition, FieldSchema, FieldType, NumericBounds, Side};
pub use lookup::CaseInsensitiveSet;
pub use matching::{MatchField, MatchFieldPatch, MatchType, normalize_weight};
pub use options::{FieldOption, OptionSet};
