use std::collections::BTreeMap;
use std::fs;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use log::debug;

use super::CorpusSource;
use crate::error::StoreError;
use crate::io::{read_if_exists, store_path, write_atomic};

/// Builds the store key of a message: `"{channel_id}-msg-{ts}"`.
pub fn message_key(channel_id: &str, ts: &str) -> String {
	format!("{}-msg-{}", channel_id, ts)
}

fn channel_prefix(channel_id: &str) -> String {
	format!("{}-msg-", channel_id)
}

/// Key-ordered store of raw message text.
///
/// Keys follow `message_key`, so one channel's messages form a contiguous,
/// timestamp-ordered range. The whole map is persisted with `postcard`
/// into `<dir>/messages.bin`.
#[derive(Debug, Default)]
pub struct MessageStore {
	/// Target file, `None` for an in-memory store.
	path: Option<PathBuf>,
	entries: BTreeMap<String, String>,
}

impl MessageStore {
	/// Opens the store in `dir`, creating the directory if needed.
	///
	/// # Errors
	/// Fails if the directory cannot be created or the store file is unreadable
	/// or corrupt.
	pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
		fs::create_dir_all(&dir)?;
		let path = store_path(&dir);
		let entries = match read_if_exists(&path)? {
			Some(bytes) => postcard::from_bytes(&bytes)?,
			None => BTreeMap::new(),
		};
		debug!("opened {} with {} messages", path.display(), entries.len());
		Ok(Self { path: Some(path), entries })
	}

	/// Creates a store that is never written to disk.
	pub fn in_memory() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Stores `text` under `key`, replacing any previous value.
	pub fn put(&mut self, key: String, text: String) {
		self.entries.insert(key, text);
	}

	/// Iterates over one channel's `(key, text)` pairs in key order.
	pub fn channel_range<'a>(&'a self, channel_id: &str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
		let prefix = channel_prefix(channel_id);
		self.entries
			.range::<String, _>((Bound::Included(prefix.clone()), Bound::Unbounded))
			.take_while(move |(key, _)| key.starts_with(&prefix))
			.map(|(key, text)| (key.as_str(), text.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Writes the store to disk atomically. No-op for in-memory stores.
	pub fn save(&self) -> Result<(), StoreError> {
		let Some(path) = &self.path else {
			return Ok(());
		};
		let bytes = postcard::to_stdvec(&self.entries)?;
		write_atomic(path, &bytes)?;
		debug!("saved {} messages to {}", self.entries.len(), path.display());
		Ok(())
	}
}

impl CorpusSource for MessageStore {
	fn channel_messages(&self, channel_id: &str) -> Vec<&str> {
		self.channel_range(channel_id).map(|(_, text)| text).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_format() {
		assert_eq!(message_key("C01", "1700000000.000100"), "C01-msg-1700000000.000100");
	}

	#[test]
	fn channel_range_is_ordered_and_isolated() {
		let mut store = MessageStore::in_memory();
		store.put(message_key("C1", "3.0"), "third".into());
		store.put(message_key("C1", "1.0"), "first".into());
		store.put(message_key("C10", "2.0"), "other channel".into());
		store.put(message_key("C2", "2.0"), "also other".into());
		store.put(message_key("C1", "2.0"), "second".into());

		assert_eq!(store.channel_messages("C1"), vec!["first", "second", "third"]);
		assert_eq!(store.channel_messages("C10"), vec!["other channel"]);
		assert!(store.channel_messages("C3").is_empty());
	}

	#[test]
	fn put_overwrites() {
		let mut store = MessageStore::in_memory();
		store.put("k".into(), "old".into());
		store.put("k".into(), "new".into());
		assert_eq!(store.get("k"), Some("new"));
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn save_and_reopen() {
		let dir = tempfile::tempdir().unwrap();
		let data = dir.path().join("db");

		let mut store = MessageStore::open(&data).unwrap();
		assert!(store.is_empty());
		store.put(message_key("C1", "1.5"), "hello world".into());
		store.save().unwrap();

		let reopened = MessageStore::open(&data).unwrap();
		assert_eq!(reopened.len(), 1);
		assert!(reopened.contains(&message_key("C1", "1.5")));
		assert_eq!(reopened.get(&message_key("C1", "1.5")), Some("hello world"));
	}

	#[test]
	fn corrupt_file_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(store_path(dir.path()), [0xff, 0xff, 0xff]).unwrap();
		assert!(matches!(MessageStore::open(dir.path()), Err(StoreError::Codec(_))));
	}

	#[test]
	fn in_memory_save_is_noop() {
		let mut store = MessageStore::in_memory();
		store.put("k".into(), "v".into());
		store.save().unwrap();
	}
}
