use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The `#CHROM` column-header line was never found.
    #[error("malformed header: {0}")]
    InputFormat(String),

    #[error("missing column {column:?}: row has {found} fields but the header declares {expected}")]
    MissingColumn {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed INFO entry {0:?}: empty key")]
    MalformedInfo(String),

    #[error("line {line}")]
    Record {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("could not open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: niffler::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            // already positioned, or not about a single row
            e @ Error::Record { .. } | e @ Error::Io(_) => e,
            e => Error::Record {
                line,
                source: Box::new(e),
            },
        }
    }

    /// The underlying error, looking through line-number wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Record { source, .. } => source.root(),
            e => e,
        }
    }
}
