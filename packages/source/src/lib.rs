#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! BDIFF fire log loading.
//!
//! The fire log is a delimited text export of the BDIFF database with one
//! row per fire. [`bdiff::load_fire_log`] resolves the configured columns
//! from the header row and normalizes every row into a
//! [`fire_map_fire_models::FireEvent`].

pub mod bdiff;
pub mod config;
pub mod parsing;
pub mod progress;

pub use bdiff::{FireLog, load_fire_log, read_fire_log};
pub use config::{FireColumns, FireLogConfig};

/// Errors that can occur while loading the fire log.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The configured delimiter is not a single ASCII character.
    #[error("Invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(char),

    /// A configured column is absent from the header row.
    #[error("Missing column '{column}' in fire log header")]
    MissingColumn {
        /// Configured column name.
        column: String,
    },

    /// A row could not be normalized.
    #[error("Line {line}: {message}")]
    Row {
        /// 1-based line number in the source file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// The fire log has no usable rows.
    #[error("Fire log contains no fire events")]
    Empty,
}
