use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::context::Context;
use super::frequency_table::FrequencyTable;
use super::generation_config::GenerationConfig;
use super::token::{Token, tokenize};
use crate::error::MarkovError;

/// Word-level Markov model of order `n`.
///
/// # Responsibilities
/// - Train on raw messages (normalize, append stop, count transitions)
/// - Generate sentences by a weighted random walk from the start context
///
/// # Invariants
/// - `order` is always >= 1
/// - Contexts stored in `table` hold at most `order` tokens
///
/// Generation only borrows the model, so a trained model can be shared
/// between threads as long as each caller brings its own random source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkovModel {
	/// Maximum number of preceding tokens used as context.
	order: usize,

	table: FrequencyTable,
}

impl MarkovModel {
	/// Creates an empty model of the given order.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidOrder` if `order == 0`.
	pub fn new(order: usize) -> Result<Self, MarkovError> {
		if order == 0 {
			return Err(MarkovError::InvalidOrder(order));
		}
		Ok(Self { order, table: FrequencyTable::new() })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Read access to the trained counts.
	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	/// Adds one message to the model.
	///
	/// # Notes
	/// - Rejected tokens are dropped, not replaced.
	/// - A message without surviving tokens still records `[Start] -> Stop`.
	/// - Training the same message twice doubles its counts.
	pub fn train(&mut self, message: &str) {
		let tokens = tokenize(message)
			.into_iter()
			.map(Token::Word)
			.chain(std::iter::once(Token::Stop));

		let mut prior = Context::start();
		for token in tokens {
			self.table.increment(&prior, token.clone());
			prior.advance(token, self.order);
		}
	}

	/// Generates one line using the thread-local random source, without a step cap.
	///
	/// # Errors
	/// Returns `MarkovError::UnknownContext` if the walk reaches an untrained
	/// context (always the case for an untrained model).
	pub fn generate(&self) -> Result<String, MarkovError> {
		self.generate_with(&mut rand::rng(), None)
	}

	/// Generates one line from an injected random source.
	///
	/// The walk starts at `[Start]`, samples continuations weighted by their
	/// counts and ends when `Stop` is drawn. Words are joined with single spaces.
	///
	/// # Errors
	/// - `MarkovError::UnknownContext` if a context has no transitions
	/// - `MarkovError::DidNotTerminate` if `max_steps` words were emitted
	///   without drawing `Stop`
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, max_steps: Option<usize>) -> Result<String, MarkovError> {
		let mut prior = Context::start();
		let mut words: Vec<&str> = Vec::new();

		loop {
			let word = match self.table.sample_next(&prior, rng)? {
				Token::Word(word) => word,
				Token::Stop => break,
				// Start is never trained as a continuation.
				Token::Start => return Err(MarkovError::UnknownContext(prior)),
			};

			if max_steps.is_some_and(|cap| words.len() >= cap) {
				return Err(MarkovError::DidNotTerminate { steps: words.len() });
			}
			words.push(word);
			prior.advance(Token::Word(word.to_owned()), self.order);
		}

		Ok(words.join(" "))
	}

	/// Generates `config.lines()` lines.
	///
	/// Every line draws from its own random stream: a `StdRng` seeded with
	/// `config.line_seed(index)` when a seed is set, otherwise the
	/// thread-local random source. A seeded line is reproducible on its own.
	///
	/// # Errors
	/// - `MarkovError::OrderMismatch` if `config.order()` differs from the model's
	/// - otherwise stops at and returns the first generation error
	pub fn lines(&self, config: &GenerationConfig) -> Result<Vec<String>, MarkovError> {
		if config.order() != self.order {
			return Err(MarkovError::OrderMismatch { expected: self.order, found: config.order() });
		}

		(0..config.lines())
			.map(|index| match config.line_seed(index) {
				Some(seed) => self.generate_with(&mut StdRng::seed_from_u64(seed), config.max_steps()),
				None => self.generate_with(&mut rand::rng(), config.max_steps()),
			})
			.collect()
	}

	/// Merges another model of the same order into this one, summing counts.
	///
	/// # Errors
	/// Returns `MarkovError::OrderMismatch` if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), MarkovError> {
		if self.order != other.order {
			return Err(MarkovError::OrderMismatch { expected: self.order, found: other.order });
		}
		self.table.merge(&other.table);
		Ok(())
	}
}
