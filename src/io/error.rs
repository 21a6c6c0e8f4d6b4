use super::Format;
use crate::model::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line {line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("corrupt {format} file: {details}")]
    Corrupt { format: Format, details: String },

    #[error("failed to decode metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("metadata is missing required entry '{key}'")]
    MissingMetadata { key: String },

    #[error("invalid input '{capability}': {details}")]
    CapabilityMissing {
        capability: &'static str,
        details: &'static str,
    },

    #[error("invalid input 'metadata': Integrator not found.")]
    IntegratorNotFound,

    #[error("thermodynamic log has no '{column}' column")]
    MissingColumn { column: String },

    #[error("trajectory contains no frames")]
    EmptyTrajectory,

    #[error("failed to parse parser configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("inconsistent simulation data: {0}")]
    Model(#[from] ModelError),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn corrupt(format: Format, details: impl Into<String>) -> Self {
        Self::Corrupt {
            format,
            details: details.into(),
        }
    }

    pub fn missing_metadata(key: impl Into<String>) -> Self {
        Self::MissingMetadata { key: key.into() }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
