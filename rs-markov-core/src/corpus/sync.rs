use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use serde::Deserialize;

use super::store::{MessageStore, message_key};
use crate::error::SyncError;

/// Number of messages requested per history page.
pub const PAGE_SIZE: usize = 1000;

/// One event from a channel's history.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub subtype: Option<String>,
	pub ts: String,
	#[serde(default)]
	pub text: String,
}

impl ChatMessage {
	/// Builds a plain user message.
	pub fn plain(ts: &str, text: &str) -> Self {
		Self { kind: "message".to_owned(), subtype: None, ts: ts.to_owned(), text: text.to_owned() }
	}

	/// A plain message is a `message` event without a subtype
	/// (joins, bot posts, edits and the like all carry one).
	pub fn is_plain(&self) -> bool {
		self.kind == "message" && self.subtype.is_none()
	}
}

/// A page of history, newest message first.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct HistoryPage {
	#[serde(default)]
	pub messages: Vec<ChatMessage>,
	#[serde(default)]
	pub has_more: bool,
}

/// A channel as listed by the chat service.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChannelInfo {
	pub id: String,
	pub name: String,
}

/// Remote chat service holding the channel history.
pub trait ChatService {
	/// Returns up to `limit` messages strictly older than `latest`, newest first.
	fn history(&self, channel_id: &str, latest: &str, limit: usize) -> Result<HistoryPage, SyncError>;

	/// Lists every channel visible to the caller.
	fn channels(&self) -> Result<Vec<ChannelInfo>, SyncError>;
}

fn parse_ts(ts: &str) -> Result<f64, SyncError> {
	ts.parse::<f64>().map_err(|_| SyncError::InvalidTimestamp(ts.to_owned()))
}

fn now_ts() -> String {
	let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
	format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Pulls the messages of `channel_id` that are newer than the store's copy.
///
/// Pages backwards from now. Stops at the first plain message already in
/// the store, since everything older was stored by a previous run, or when
/// the service reports no more history.
///
/// Returns the number of messages added.
///
/// # Errors
/// Propagates service failures and rejects unparseable timestamps.
pub fn update_channel<S>(channel_id: &str, service: &S, store: &mut MessageStore) -> Result<usize, SyncError>
where
	S: ChatService + ?Sized,
{
	let mut added = 0;
	let mut latest = now_ts();
	let mut latest_value = parse_ts(&latest)?;

	loop {
		let page = service.history(channel_id, &latest, PAGE_SIZE)?;
		let mut moved = false;

		for message in &page.messages {
			if message.is_plain() {
				let key = message_key(channel_id, &message.ts);
				if store.contains(&key) {
					return Ok(added);
				}
				store.put(key, message.text.clone());
				added += 1;
			}

			// Move the cursor further back in history.
			let value = parse_ts(&message.ts)?;
			if value < latest_value {
				latest_value = value;
				latest = message.ts.clone();
				moved = true;
			}
		}

		if !page.has_more {
			return Ok(added);
		}
		if !moved {
			warn!("{}: history cursor did not move, stopping at {}", channel_id, latest);
			return Ok(added);
		}
	}
}

/// Updates every channel in turn, saving the store after each one.
///
/// A channel is only persisted once its update completed, so a failed run
/// never leaves a gap that the next run would stop in front of.
///
/// Returns `(channel_id, added)` for each channel.
pub fn pull_messages<S, I>(channel_ids: I, service: &S, store: &mut MessageStore) -> Result<Vec<(String, usize)>, SyncError>
where
	S: ChatService + ?Sized,
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	let mut report = Vec::new();
	for channel_id in channel_ids {
		let channel_id = channel_id.as_ref();
		let added = update_channel(channel_id, service, store)?;
		store.save()?;
		debug!("{}: added {}", channel_id, added);
		report.push((channel_id.to_owned(), added));
	}
	Ok(report)
}

/// Resolves a human-readable channel name to its id.
///
/// Returns `Ok(None)` when no channel has that name.
pub fn resolve_channel_id<S>(service: &S, name: &str) -> Result<Option<String>, SyncError>
where
	S: ChatService + ?Sized,
{
	Ok(service
		.channels()?
		.into_iter()
		.find(|channel| channel.name == name)
		.map(|channel| channel.id))
}
