use std::path::PathBuf;

use thiserror::Error;

use crate::model::EntityKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid model: {0}")]
    Validation(String),
    #[error("Format error: {0}")]
    Format(String),
    #[error("Reference error: {0}")]
    Reference(String),
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to read '{}': {source}", file.display())]
    NamedFileIO {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {source}", file.display())]
    AtLine {
        file: PathBuf,
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps the error with the file and 1-based line number it was raised at
    pub(crate) fn at(self, file: impl Into<PathBuf>, line: usize) -> Self {
        Error::AtLine {
            file: file.into(),
            line,
            source: Box::new(self),
        }
    }

    /// The error with all location context stripped
    pub fn innermost(&self) -> &Error {
        match self {
            Error::AtLine { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Line number of the outermost location context, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
