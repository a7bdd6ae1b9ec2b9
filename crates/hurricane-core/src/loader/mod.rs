// File: crates/hurricane-core/src/loader/mod.rs
// Summary: Extension-dispatched loading of delimited text and array containers into a Dataset.

mod delimited;
mod grid;
mod npy;
#[cfg(feature = "netcdf")]
mod netcdf_io;

use std::path::Path;

use log::info;

use crate::dataset::{Dataset, Layout};
use crate::error::{BoxError, Error, Result};

/// Parser selected from a file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
    Npy,
    Npz,
    #[cfg(feature = "netcdf")]
    NetCdf,
}

/// Closed extension table; anything absent here is unsupported.
const EXTENSIONS: &[(&str, Format)] = &[
    ("csv", Format::Csv),
    ("tsv", Format::Tsv),
    ("npy", Format::Npy),
    ("npz", Format::Npz),
    #[cfg(feature = "netcdf")]
    ("nc", Format::NetCdf),
    #[cfg(feature = "netcdf")]
    ("nc4", Format::NetCdf),
    #[cfg(feature = "netcdf")]
    ("h5", Format::NetCdf),
    #[cfg(feature = "netcdf")]
    ("hdf5", Format::NetCdf),
];

impl Format {
    /// Every extension recognized by this build, lower-case, without the dot.
    pub fn supported_extensions() -> Vec<&'static str> {
        EXTENSIONS.iter().map(|(ext, _)| *ext).collect()
    }

    /// Look up a bare extension (case-insensitive, no leading dot).
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS.iter().find(|(e, _)| *e == ext).map(|(_, f)| *f)
    }

    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| Error::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: if ext.is_empty() { "<none>".to_string() } else { format!(".{ext}") },
            supported: Self::supported_extensions(),
        })
    }

    /// Layout of the zero-row dataset an empty file of this format loads as.
    fn empty_layout(&self) -> Layout {
        match self {
            Format::Csv | Format::Tsv => Layout::Table,
            _ => Layout::Grid { dims: Vec::new() },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Csv => "CSV",
            Format::Tsv => "TSV",
            Format::Npy => "NumPy array",
            Format::Npz => "NumPy archive",
            #[cfg(feature = "netcdf")]
            Format::NetCdf => "netCDF",
        }
    }
}

/// Load `path` into a [`Dataset`], choosing the parser from its extension.
///
/// The path is checked before any parser runs; parser failures come back as
/// [`Error::Parse`] carrying the underlying cause.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound { path: path.to_path_buf() });
    }
    let format = Format::from_path(path)?;

    let size = std::fs::metadata(path)
        .map_err(|e| Error::Parse { path: path.to_path_buf(), format: format.name(), source: e.into() })?
        .len();
    if size == 0 {
        info!("{} is empty; loaded 0 rows ({})", path.display(), format.name());
        return Ok(Dataset::from_columns(format.empty_layout(), Vec::new())?);
    }

    let parsed: std::result::Result<Dataset, BoxError> = match format {
        Format::Csv => delimited::read(path, b','),
        Format::Tsv => delimited::read(path, b'\t'),
        Format::Npy => npy::read_npy(path),
        Format::Npz => npy::read_npz(path),
        #[cfg(feature = "netcdf")]
        Format::NetCdf => netcdf_io::read(path),
    };

    let dataset = parsed.map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        format: format.name(),
        source,
    })?;
    info!(
        "loaded {} rows x {} columns from {} ({})",
        dataset.len(),
        dataset.columns().len(),
        path.display(),
        format.name()
    );
    Ok(dataset)
}
