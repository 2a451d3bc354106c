use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;

/// File name of the message store inside its data directory.
pub(crate) const STORE_FILE: &str = "messages.bin";

/// Builds the store file path inside a data directory.
///
/// Example:
/// `./db` → `./db/messages.bin`
pub(crate) fn store_path<P: AsRef<Path>>(dir: P) -> PathBuf {
	dir.as_ref().join(STORE_FILE)
}

/// Reads a whole file, returning `None` when it does not exist.
pub(crate) fn read_if_exists<P: AsRef<Path>>(path: P) -> io::Result<Option<Vec<u8>>> {
	match fs::read(path) {
		Ok(bytes) => Ok(Some(bytes)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e),
	}
}

/// Writes `bytes` to `path` atomically.
///
/// - Writes into a temporary file created next to the target
/// - Flushes and renames it over the target
///
/// Readers never observe a half-written file.
pub(crate) fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), StoreError> {
	let path = path.as_ref();
	let parent = path.parent().unwrap_or_else(|| Path::new("."));
	fs::create_dir_all(parent)?;

	let mut tmp = NamedTempFile::new_in(parent)?;
	tmp.write_all(bytes)?;
	tmp.as_file().sync_all()?;
	tmp.persist(path)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_file_reads_as_none() {
		let dir = tempfile::tempdir().unwrap();
		assert!(read_if_exists(dir.path().join("absent")).unwrap().is_none());
	}

	#[test]
	fn atomic_write_creates_parent_and_replaces() {
		let dir = tempfile::tempdir().unwrap();
		let path = store_path(dir.path().join("nested"));
		write_atomic(&path, b"first").unwrap();
		write_atomic(&path, b"second").unwrap();
		assert_eq!(read_if_exists(&path).unwrap().unwrap(), b"second");
	}
}
