use std::collections::{BTreeMap, HashMap};

use rand::Rng;

use super::context::Context;
use super::state::State;
use super::token::Token;
use crate::error::MarkovError;

/// Trained mapping from a context to its weighted next-token choices.
///
/// # Responsibilities
/// - Count how often each token followed each context
/// - Sample a continuation proportionally to those counts
/// - Merge with another table (counts are summed)
///
/// # Invariants
/// - Counts never decrease
/// - Every stored context has at least one transition with count >= 1
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	states: HashMap<Context, State>,
}

impl FrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Raises the count of `token` under `context` by one, creating the entry if needed.
	pub fn increment(&mut self, context: &Context, token: Token) {
		match self.states.get_mut(context) {
			Some(state) => state.add_transition(token),
			None => {
				let mut state = State::default();
				state.add_transition(token);
				self.states.insert(context.clone(), state);
			}
		}
	}

	/// Samples one continuation of `context`, weighted by count.
	///
	/// # Errors
	/// Returns `MarkovError::UnknownContext` when `context` was never trained.
	pub fn sample_next<R: Rng + ?Sized>(&self, context: &Context, rng: &mut R) -> Result<&Token, MarkovError> {
		self.states
			.get(context)
			.and_then(|state| state.predict(rng))
			.ok_or_else(|| MarkovError::UnknownContext(context.clone()))
	}

	/// Returns how many times `token` followed `context` (0 if never).
	pub fn count(&self, context: &Context, token: &Token) -> u64 {
		self.states.get(context).map_or(0, |state| state.count(token))
	}

	/// Returns every recorded continuation of `context` with its count.
	pub fn transitions(&self, context: &Context) -> Option<&BTreeMap<Token, u64>> {
		self.states.get(context).map(State::transitions)
	}

	/// Returns the sum of all counts recorded under `context`.
	pub fn total(&self, context: &Context) -> u64 {
		self.states.get(context).map_or(0, State::total)
	}

	/// Iterates over every trained context.
	pub fn contexts(&self) -> impl Iterator<Item = &Context> {
		self.states.keys()
	}

	/// Number of distinct trained contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Merges another table into this one, summing matching counts.
	pub fn merge(&mut self, other: &Self) {
		for (context, state) in &other.states {
			self.states.entry(context.clone()).or_default().merge(state);
		}
	}
}
