use std::collections::BTreeMap;

use rand::Rng;

use super::token::Token;

/// The observed continuations of a single context.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during training
/// - Pick the next token using weighted random sampling
/// - Merge with the state of the same context from another table
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - `total` is the sum of all occurrence counts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
	/// Outgoing transitions indexed by the next token.
	/// Example: { Word("the") => 42, Stop => 3 }
	transitions: BTreeMap<Token, u64>,
	total: u64,
}

impl State {
	/// Records one occurrence of a transition toward `next`.
	pub fn add_transition(&mut self, next: Token) {
		self.add_transitions(next, 1);
	}

	fn add_transitions(&mut self, next: Token, occurrence: u64) {
		*self.transitions.entry(next).or_insert(0) += occurrence;
		self.total += occurrence;
	}

	/// Picks the next token with probability proportional to its count.
	///
	/// Draws `r` in `0..total`, then walks the transitions in token order
	/// subtracting each count until `r` falls inside a bucket.
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..self.total);
		for (next, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(next);
			}
			r -= occurrence;
		}

		// Unreachable while `total` matches the counts.
		self.transitions.keys().next_back()
	}

	pub fn count(&self, next: &Token) -> u64 {
		self.transitions.get(next).copied().unwrap_or(0)
	}

	pub fn transitions(&self) -> &BTreeMap<Token, u64> {
		&self.transitions
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	/// Merges another state of the same context into this one.
	///
	/// Transition occurrence counts are summed.
	pub fn merge(&mut self, other: &Self) {
		for (next, occurrence) in &other.transitions {
			self.add_transitions(next.clone(), *occurrence);
		}
	}
}
