//! Raw message corpus: persistence, access for training and synchronisation.

/// Key-ordered persistent store of raw message text.
pub mod store;

/// Pulling channel history from a chat service into the store.
pub mod sync;

use std::collections::HashSet;

use log::debug;

use crate::error::MarkovError;
use crate::model::markov_model::MarkovModel;

/// Supplies the stored raw message texts of a channel.
///
/// Each stored message is returned exactly once per call, so training over
/// a set of distinct channels never double-weights a message.
pub trait CorpusSource {
	fn channel_messages(&self, channel_id: &str) -> Vec<&str>;
}

/// Builds a model of the given order from every stored message of `channel_ids`.
///
/// Each channel is trained into its own model, then merged into the result.
/// A channel listed more than once is only trained the first time, so no
/// stored message is weighted twice.
///
/// # Errors
/// Returns `MarkovError::InvalidOrder` if `order == 0`.
pub fn build_model<S, I>(source: &S, channel_ids: I, order: usize) -> Result<MarkovModel, MarkovError>
where
	S: CorpusSource + ?Sized,
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	let mut model = MarkovModel::new(order)?;
	let mut seen = HashSet::new();
	for channel_id in channel_ids {
		let channel_id = channel_id.as_ref();
		if !seen.insert(channel_id.to_owned()) {
			debug!("{}: listed twice, skipping", channel_id);
			continue;
		}

		let messages = source.channel_messages(channel_id);
		debug!("{}: training on {} messages", channel_id, messages.len());
		let mut partial_model = MarkovModel::new(order)?;
		for message in messages {
			partial_model.train(message);
		}
		model.merge(&partial_model)?;
	}
	Ok(model)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::corpus::store::{MessageStore, message_key};
	use crate::model::context::Context;
	use crate::model::token::Token;
	use std::collections::HashMap;

	struct FixedCorpus(HashMap<&'static str, Vec<&'static str>>);

	impl CorpusSource for FixedCorpus {
		fn channel_messages(&self, channel_id: &str) -> Vec<&str> {
			self.0.get(channel_id).cloned().unwrap_or_default()
		}
	}

	#[test]
	fn trains_every_message_of_selected_channels() {
		let corpus = FixedCorpus(HashMap::from([
			("C1", vec!["hi there", "hi you"]),
			("C2", vec!["hi all"]),
			("C3", vec!["ignored"]),
		]));

		let model = build_model(&corpus, ["C1", "C2"], 1).unwrap();
		let table = model.table();
		assert_eq!(table.count(&Context::start(), &Token::word("hi")), 3);
		assert_eq!(table.count(&Context::start(), &Token::word("ignored")), 0);
		assert_eq!(table.total(&Context::of_words(&["hi"])), 3);
	}

	#[test]
	fn repeated_channel_is_trained_once() {
		let mut store = MessageStore::in_memory();
		store.put(message_key("C1", "1.0"), "hello".to_owned());

		let model = build_model(&store, ["C1", "C1"], 1).unwrap();
		assert_eq!(model.table().count(&Context::start(), &Token::word("hello")), 1);
		assert_eq!(model.table().count(&Context::of_words(&["hello"]), &Token::Stop), 1);
	}

	#[test]
	fn unknown_channel_yields_untrained_model() {
		let corpus = FixedCorpus(HashMap::new());
		let model = build_model(&corpus, ["nope"], 2).unwrap();
		assert!(model.table().is_empty());
	}

	#[test]
	fn order_is_validated() {
		let corpus = FixedCorpus(HashMap::new());
		assert_eq!(
			build_model(&corpus, Vec::<String>::new(), 0),
			Err(MarkovError::InvalidOrder(0))
		);
	}
}
