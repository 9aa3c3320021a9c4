use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// `clean` was called before `tokenize` produced anything.
    #[error("token collection is empty, run tokenize first")]
    EmptyTokenState,

    #[error("failed to read document {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
