use std::fmt;

use super::token::Token;

/// An ordered window of at most `order` preceding tokens.
///
/// Every message starts from `[Start]`; the start marker slides out as
/// tokens are appended. Equality and hashing are element-wise and
/// order-sensitive, which makes a `Context` usable as a map key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context {
	tokens: Vec<Token>,
}

impl Context {
	/// The initial context of every message: `[Start]`.
	pub fn start() -> Self {
		Self { tokens: vec![Token::Start] }
	}

	/// Builds a context from an explicit token sequence.
	pub fn from_tokens(tokens: Vec<Token>) -> Self {
		Self { tokens }
	}

	/// Shorthand for a context made only of words.
	pub fn of_words(words: &[&str]) -> Self {
		Self { tokens: words.iter().map(|w| Token::word(w)).collect() }
	}

	/// Appends `token`, then keeps only the last `order` tokens.
	pub fn advance(&mut self, token: Token, order: usize) {
		self.tokens.push(token);
		if self.tokens.len() > order {
			let excess = self.tokens.len() - order;
			self.tokens.drain(..excess);
		}
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("(")?;
		for (i, token) in self.tokens.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{token}")?;
		}
		f.write_str(")")
	}
}
