//! Founder/investor pairing pipeline facade.
//!
//! [`PipelineSession`] ties the pairing crates together for one pipeline:
//! submission validation on both forms, field mapping for match criteria, and
//! spreadsheet import. [`config`] and [`logging`] carry the deployment
//! settings and the tracing setup.

pub mod config;
pub mod logging;
mod session;

pub use config::PairingSettings;
pub use session::PipelineSession;

pub use pairing_ingest as ingest;
pub use pairing_map as map;
pub use pairing_model as model;
pub use pairing_validate as validate;
