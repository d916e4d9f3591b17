//! Error types for pedigree loading and inference.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Error opening or reading an input file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the header or a record is too short.
    #[error("missing field '{field}' at row {row}")]
    MissingField { row: usize, field: String },

    #[error("invalid trait marker '{value}' at row {row}")]
    InvalidTrait { row: usize, value: String },

    #[error("person '{0}' appears more than once")]
    DuplicatePerson(String),

    /// Mother and father must be given together or not at all.
    #[error("person '{0}' has only one parent recorded")]
    OneSidedParents(String),

    #[error("person '{person}' references unknown parent '{parent}'")]
    UnknownParent { person: String, parent: String },

    #[error("person '{0}' is recorded as their own parent")]
    SelfParent(String),

    #[error("person '{0}' has the same mother and father")]
    SameParents(String),

    /// Following parent links from this person leads back to them.
    #[error("pedigree contains an ancestry loop through '{person}'")]
    CyclicPedigree { person: String },

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("pedigree of {size} people exceeds the enumerable maximum of {max}")]
    PopulationTooLarge { size: usize, max: usize },

    /// No evidence-consistent hypothesis carries any probability mass for
    /// this person, so their distribution cannot be normalized.
    #[error("evidence is unsatisfiable for '{person}'")]
    UnsatisfiableEvidence { person: String },
}

/// Result type alias for heredity operations.
pub type Result<T> = std::result::Result<T, Error>;
