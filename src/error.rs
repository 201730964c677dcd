use std::path::PathBuf;

use thiserror::Error;

use crate::state::region::OrbitId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("index {index} outside [{min}, {max})")]
    OutOfRange { index: usize, min: usize, max: usize },

    #[error("mapping has {got} entries, cursor range holds {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("cursor range [{min}, {max}) is empty")]
    EmptyRange { min: usize, max: usize },

    #[error("no data for orbit {0}")]
    NoSuchOrbit(OrbitId),

    #[error("{label} already holds {limit} crossings for orbit {orbit}")]
    EntryFull {
        orbit: OrbitId,
        label: &'static str,
        limit: usize,
    },

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize annotations: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("unrecognised timestamp: {0:?}")]
    InvalidTimestamp(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Parse {
            path: path.into(),
            source,
        }
    }

    /// Absence of data for an orbit is expected while paging and gets a
    /// placeholder render instead of an error report.
    pub fn is_absence(&self) -> bool {
        matches!(self, Error::NoSuchOrbit(_))
    }
}
