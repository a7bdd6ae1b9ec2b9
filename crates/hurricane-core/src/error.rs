// File: crates/hurricane-core/src/error.rs
// Summary: Error taxonomy shared by the loader and the renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by [`Error::Parse`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error(
        "unsupported file format '{extension}' for {}; supported extensions: {}",
        path.display(),
        supported.join(", ")
    )]
    UnsupportedFormat {
        path: PathBuf,
        extension: String,
        supported: Vec<&'static str>,
    },

    #[error("failed to parse {} as {format}: {source}", path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("column '{column}' not found; available columns: {}", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("render failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
