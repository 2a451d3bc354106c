use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Starts with an ASCII letter; the trailing run of non-letters is left
/// outside the capture. Internal non-letters (`don't`, `co-op`) are kept.
static WORD: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([a-zA-Z].*?)[^a-zA-Z]*$").expect("static regex"));

/// A canonical token.
///
/// - `Start` only ever appears in contexts, as the seed of every message.
/// - `Word` holds a normalized lowercase word.
/// - `Stop` ends every trained message and terminates generation.
///
/// The derived ordering (`Start < Word(_) < Stop`, words lexicographic) keeps
/// transition iteration stable, so a seeded random source reproduces output.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
	Start,
	Word(String),
	Stop,
}

impl Token {
	/// Builds a word token.
	pub fn word(text: &str) -> Self {
		Token::Word(text.to_owned())
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Start => f.write_str("<START>"),
			Token::Word(w) => f.write_str(w),
			Token::Stop => f.write_str("<STOP>"),
		}
	}
}

/// Maps a raw whitespace-delimited token to its canonical form.
///
/// Returns `None` (reject) when:
/// - the token is a mention (starts with `@`)
/// - the token does not start with an ASCII letter
///
/// Otherwise strips the trailing run of non-letters and lowercases the rest.
pub fn normalize(raw: &str) -> Option<String> {
	if raw.starts_with('@') {
		return None;
	}
	let captures = WORD.captures(raw)?;
	Some(captures.get(1)?.as_str().to_lowercase())
}

/// Splits a message on whitespace and keeps the normalized survivors, in order.
pub fn tokenize(message: &str) -> Vec<String> {
	message.split_whitespace().filter_map(normalize).collect()
}
