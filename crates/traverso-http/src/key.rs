//! Identifier keys and coercion to a controller's declared key type.

use std::fmt;

use serde::Serialize;
use traverso_exception::{Error, Result};

/// A single URL-chain token.
///
/// Tokens parsed from a request path start life as [`Key::Str`]. Relationship
/// traversal substitutes resolver output back onto the chain, so a token may
/// also be an already-typed identifier. Once a value is a `Key` the engine no
/// longer cares where it came from.
///
/// # Examples
///
/// ```
/// use traverso_http::Key;
///
/// let segment = Key::from("144");
/// assert_eq!(segment.as_str(), Some("144"));
/// assert_eq!(Key::from(42).to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Key {
	Str(String),
	Int(i64),
	Float(f64),
}

impl Key {
	/// Borrow the token as a string when it is one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Key::Str(value) => Some(value),
			_ => None,
		}
	}

	/// True for raw path segments and string identifiers.
	pub fn is_str(&self) -> bool {
		matches!(self, Key::Str(_))
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Str(value) => write!(f, "{}", value),
			Key::Int(value) => write!(f, "{}", value),
			Key::Float(value) => write!(f, "{}", value),
		}
	}
}

impl From<&str> for Key {
	fn from(value: &str) -> Self {
		Key::Str(value.to_string())
	}
}

impl From<String> for Key {
	fn from(value: String) -> Self {
		Key::Str(value)
	}
}

impl From<i64> for Key {
	fn from(value: i64) -> Self {
		Key::Int(value)
	}
}

impl From<f64> for Key {
	fn from(value: f64) -> Self {
		Key::Float(value)
	}
}

/// Key type a controller declares for its identifiers.
///
/// String segments shifted off the chain are coerced to this type before a
/// controller sees them. The set is closed on purpose: a registration cannot
/// name a key type the engine does not know how to coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
	/// Identifiers stay as the raw decoded segment.
	#[default]
	Str,
	/// Identifiers parse as signed integers.
	Int,
	/// Identifiers parse as floating point numbers.
	Float,
}

impl KeyKind {
	/// Name used in log fields and error detail.
	pub fn as_str(&self) -> &'static str {
		match self {
			KeyKind::Str => "str",
			KeyKind::Int => "int",
			KeyKind::Float => "float",
		}
	}
}

/// Coerce a chain token to the declared key kind.
///
/// Only string tokens are converted. A token that is already typed, for
/// example one produced by a relationship resolver, passes through untouched
/// regardless of the declared kind.
///
/// # Examples
///
/// ```
/// use traverso_http::{coerce, Key, KeyKind};
///
/// assert_eq!(coerce(Key::from("42"), KeyKind::Int), Ok(Key::Int(42)));
/// assert_eq!(coerce(Key::Int(7), KeyKind::Str), Ok(Key::Int(7)));
/// assert!(coerce(Key::from("x"), KeyKind::Int).is_err());
/// ```
pub fn coerce(key: Key, kind: KeyKind) -> Result<Key> {
	match (key, kind) {
		(Key::Str(value), KeyKind::Int) => value.parse::<i64>().map(Key::Int).map_err(|_| {
			Error::InvalidIdentifier(format!("expected an integer identifier, got '{}'", value))
		}),
		(Key::Str(value), KeyKind::Float) => value.parse::<f64>().map(Key::Float).map_err(|_| {
			Error::InvalidIdentifier(format!("expected a float identifier, got '{}'", value))
		}),
		(key, _) => Ok(key),
	}
}
