use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use rs_markov_core::SyncError;
use rs_markov_core::corpus::sync::{ChannelInfo, ChatService, HistoryPage};

pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Blocking client for the Slack Web API.
pub struct SlackClient {
	client: Client,
	base_url: String,
	token: String,
}

#[derive(Deserialize)]
struct ChannelList {
	#[serde(default)]
	channels: Vec<ChannelInfo>,
	#[serde(default)]
	response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize)]
struct ResponseMetadata {
	#[serde(default)]
	next_cursor: String,
}

fn transport(err: reqwest::Error) -> SyncError {
	SyncError::Transport(err.to_string())
}

/// Checks the `ok` flag every Web API response carries, then decodes the body.
fn decode<T: DeserializeOwned>(method: &str, body: Value) -> Result<T, SyncError> {
	if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
		let error = body.get("error").and_then(Value::as_str).unwrap_or("unknown_error");
		return Err(SyncError::Service(format!("{method}: {error}")));
	}
	serde_json::from_value(body).map_err(|e| SyncError::Service(format!("{method}: malformed response: {e}")))
}

impl SlackClient {
	/// Creates a client with a 30 second timeout.
	pub fn new(base_url: &str, token: &str) -> Result<Self, SyncError> {
		let client = Client::builder()
			.timeout(Duration::from_secs(30))
			.build()
			.map_err(transport)?;
		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_owned(),
			token: token.to_owned(),
		})
	}

	fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T, SyncError> {
		debug!("GET {}/{}", self.base_url, method);
		let body: Value = self
			.client
			.get(format!("{}/{}", self.base_url, method))
			.bearer_auth(&self.token)
			.query(params)
			.send()
			.map_err(transport)?
			.error_for_status()
			.map_err(transport)?
			.json()
			.map_err(transport)?;
		decode(method, body)
	}
}

impl ChatService for SlackClient {
	fn history(&self, channel_id: &str, latest: &str, limit: usize) -> Result<HistoryPage, SyncError> {
		self.call(
			"conversations.history",
			&[
				("channel", channel_id.to_owned()),
				("latest", latest.to_owned()),
				("inclusive", "false".to_owned()),
				("limit", limit.to_string()),
			],
		)
	}

	fn channels(&self) -> Result<Vec<ChannelInfo>, SyncError> {
		let mut channels = Vec::new();
		let mut cursor = String::new();
		loop {
			let mut params = vec![("exclude_archived", "true".to_owned()), ("limit", "1000".to_owned())];
			if !cursor.is_empty() {
				params.push(("cursor", cursor.clone()));
			}
			let page: ChannelList = self.call("conversations.list", &params)?;
			channels.extend(page.channels);

			cursor = page.response_metadata.map(|m| m.next_cursor).unwrap_or_default();
			if cursor.is_empty() {
				return Ok(channels);
			}
		}
	}
}
