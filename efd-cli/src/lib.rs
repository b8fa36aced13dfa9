//! Library entry for efd-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use anyhow::{Context, Result};
use efd_core::{DecodePolicy, LookupTables};
use std::fs;
use tracing::info;

/// Output format of the export command
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array, one object per frame
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Decode settings shared by every command
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    /// Reject unrecognised codes instead of passing them through
    pub strict: bool,

    /// JSON lookup tables replacing the embedded ones
    pub tables: Option<String>,
}

impl DecodeOptions {
    /// The codec policy selected by these options
    pub fn policy(&self) -> DecodePolicy {
        if self.strict {
            DecodePolicy::Strict
        } else {
            DecodePolicy::Lenient
        }
    }

    /// Load the lookup tables (embedded unless overridden)
    pub fn load_tables(&self) -> Result<LookupTables> {
        match &self.tables {
            Some(path) => {
                info!("Loading lookup tables from {}", path);
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read lookup tables: {}", path))?;
                LookupTables::from_json(&json)
                    .with_context(|| format!("Invalid lookup tables: {}", path))
            }
            None => LookupTables::embedded().context("Embedded lookup tables are invalid"),
        }
    }
}
