use crate::error::MarkovError;

/// Default cap on the number of words in one generated line.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Validated settings for one generation session.
///
/// # Invariants
/// - `order` and `lines` are strictly positive
/// - `max_steps == None` means generation is unbounded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
	order: usize,
	lines: usize,
	max_steps: Option<usize>,
	seed: Option<u64>,
}

impl GenerationConfig {
	/// Creates a configuration with the default step cap and no seed.
	///
	/// # Errors
	/// - `MarkovError::InvalidOrder` if `order == 0`
	/// - `MarkovError::InvalidLineCount` if `lines == 0`
	pub fn new(order: usize, lines: usize) -> Result<Self, MarkovError> {
		if order == 0 {
			return Err(MarkovError::InvalidOrder(order));
		}
		if lines == 0 {
			return Err(MarkovError::InvalidLineCount(lines));
		}
		Ok(Self { order, lines, max_steps: Some(DEFAULT_MAX_STEPS), seed: None })
	}

	/// Sets the step cap; `None` disables it.
	pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
		self.max_steps = max_steps;
		self
	}

	/// Fixes the random seed so output is reproducible.
	pub fn with_seed(mut self, seed: Option<u64>) -> Self {
		self.seed = seed;
		self
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn lines(&self) -> usize {
		self.lines
	}

	pub fn max_steps(&self) -> Option<usize> {
		self.max_steps
	}

	pub fn seed(&self) -> Option<u64> {
		self.seed
	}

	/// Seed of the line at `index`, derived from `seed()`.
	pub fn line_seed(&self, index: usize) -> Option<u64> {
		self.seed.map(|seed| seed.wrapping_add(index as u64))
	}
}
