//! The URL chain: the not-yet-consumed remainder of a request path.

use std::collections::VecDeque;
use std::fmt;

use percent_encoding::percent_decode_str;

use crate::key::Key;

/// Ordered tokens still awaiting consumption, always worked from the front.
///
/// Resolution shifts tokens off the front one at a time. A relationship hop
/// that resolves an identifier substitutes it by unshifting the resolved key
/// back onto the front, so the next resource sees the chain exactly as if the
/// request had named that identifier directly. Nothing else mutates a chain.
///
/// # Examples
///
/// ```
/// use traverso_http::{Key, UrlChain};
///
/// let mut chain = UrlChain::from_path("/widgets/42/parts");
/// assert_eq!(chain.len(), 3);
/// assert_eq!(chain.shift(), Some(Key::from("widgets")));
/// assert_eq!(chain.peek_first(), Some(&Key::from("42")));
///
/// chain.shift();
/// chain.unshift(Key::Int(7));
/// assert_eq!(chain.peek_first(), Some(&Key::Int(7)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlChain {
	tokens: VecDeque<Key>,
}

impl UrlChain {
	/// An empty chain.
	pub fn new() -> Self {
		Self {
			tokens: VecDeque::new(),
		}
	}

	/// Split a URL path into percent-decoded string tokens.
	///
	/// Empty segments produced by leading, trailing, or doubled slashes are
	/// skipped, so `/widgets/42/` and `widgets//42` both yield two tokens.
	///
	/// # Examples
	///
	/// ```
	/// use traverso_http::{Key, UrlChain};
	///
	/// let chain = UrlChain::from_path("/posts/hello%20world/");
	/// let tokens: Vec<_> = chain.iter().cloned().collect();
	/// assert_eq!(tokens, vec![Key::from("posts"), Key::from("hello world")]);
	/// ```
	pub fn from_path(path: &str) -> Self {
		path.split('/')
			.filter(|segment| !segment.is_empty())
			.map(|segment| Key::Str(percent_decode_str(segment).decode_utf8_lossy().into_owned()))
			.collect()
	}

	/// Remove and return the front token.
	pub fn shift(&mut self) -> Option<Key> {
		self.tokens.pop_front()
	}

	/// Push a token onto the front.
	pub fn unshift(&mut self, token: Key) {
		self.tokens.push_front(token);
	}

	/// Look at the front token without consuming it.
	pub fn peek_first(&self) -> Option<&Key> {
		self.tokens.front()
	}

	/// Number of tokens not yet consumed.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// True once every token has been consumed.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Front-to-back view of the remaining tokens.
	pub fn iter(&self) -> impl Iterator<Item = &Key> {
		self.tokens.iter()
	}
}

impl fmt::Display for UrlChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for token in &self.tokens {
			if !first {
				write!(f, "/")?;
			}
			write!(f, "{}", token)?;
			first = false;
		}
		Ok(())
	}
}

impl FromIterator<Key> for UrlChain {
	fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
		Self {
			tokens: iter.into_iter().collect(),
		}
	}
}
