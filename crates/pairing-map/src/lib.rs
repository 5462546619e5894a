//! Founder/investor field matching.
//!
//! - [`compat`]: which field pairs are structurally comparable
//! - [`criteria`]: the stored, user-weighted pairings for a pipeline

pub mod compat;
pub mod criteria;
mod error;

pub use compat::{CompatibilityMatrix, compatible_fields, is_compatible};
pub use criteria::MatchCriteria;
pub use error::MappingError;
