//! File storage primitives and sidecar naming.
//!
//! Each source file gets its own sidecar (`<file>.freq`) next to its payload
//! (`<file>.huf`), so concurrent runs over different files never share a
//! metadata location.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use huffpack_core::error::MetadataError;
use huffpack_core::{Error, MetadataRecord, Result};

/// Extension appended to the packed payload
pub const PACKED_EXT: &str = "huf";

/// Extension appended to the metadata sidecar
pub const SIDECAR_EXT: &str = "freq";

/// Extension appended to a restored file
pub const RESTORED_EXT: &str = "restored";

/// Read a whole file.
///
/// # Errors
/// `Error::InputRead` if the file cannot be read.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(Error::InputRead)
}

/// Create or truncate `path` and write `bytes` to it.
///
/// # Errors
/// `Error::OutputWrite` if the file cannot be created or written.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(Error::OutputWrite)?;
    file.write_all(bytes).map_err(Error::OutputWrite)?;
    file.sync_all().map_err(Error::OutputWrite)
}

/// Persist a sidecar record.
///
/// # Errors
/// `Error::MetadataWrite` if the file cannot be created or written.
pub fn write_sidecar(path: &Path, record: &MetadataRecord) -> Result<()> {
    let mut file = fs::File::create(path).map_err(Error::MetadataWrite)?;
    record.write_to(&mut file)?;
    file.sync_all().map_err(Error::MetadataWrite)
}

/// Load and parse a sidecar record.
///
/// # Errors
/// - `MetadataError::Missing` if the file does not exist
/// - `Error::InputRead` for other read failures
/// - parse errors from [`MetadataRecord::from_bytes`]
pub fn read_sidecar(path: &Path) -> Result<MetadataRecord> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::Metadata(MetadataError::Missing),
        _ => Error::InputRead(e),
    })?;
    MetadataRecord::from_bytes(&bytes)
}

/// `path` with `.ext` appended to the full file name.
pub fn with_appended_ext(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Where `compress` writes the payload for `source`.
pub fn packed_path(source: &Path) -> PathBuf {
    with_appended_ext(source, PACKED_EXT)
}

/// Where `compress` writes the sidecar for `source`.
pub fn sidecar_path(source: &Path) -> PathBuf {
    with_appended_ext(source, SIDECAR_EXT)
}

/// Where `decompress` writes the restored copy of `packed`.
pub fn restored_path(packed: &Path) -> PathBuf {
    with_appended_ext(packed, RESTORED_EXT)
}

/// Sidecar locations to try for a packed file, in order.
///
/// First `<name>.huf.freq`, then `<name>.freq` when the packed file ends
/// in `.huf` (the name `compress` produces).
pub fn sidecar_candidates(packed: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![with_appended_ext(packed, SIDECAR_EXT)];
    if packed.extension().is_some_and(|ext| ext == PACKED_EXT) {
        candidates.push(sidecar_path(&packed.with_extension("")));
    }
    candidates
}

/// First existing sidecar for `packed`, if any.
pub fn find_sidecar(packed: &Path) -> Option<PathBuf> {
    sidecar_candidates(packed)
        .into_iter()
        .find(|candidate| candidate.is_file())
}
