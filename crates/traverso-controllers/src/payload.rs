//! What controllers hand back and the boundary that renders it.

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Result of a successfully invoked action.
///
/// A controller either produces a value or reports validation failures. Both
/// are success at the dispatch level; turning either into a wire response is
/// the packager's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
	Value(Value),
	Errors(ErrorList),
}

impl From<Value> for Payload {
	fn from(value: Value) -> Self {
		Payload::Value(value)
	}
}

impl From<ErrorList> for Payload {
	fn from(errors: ErrorList) -> Self {
		Payload::Errors(errors)
	}
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
	/// Field the failure concerns, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
	pub message: String,
}

impl ErrorDetail {
	/// A failure not tied to a particular field.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			field: None,
			message: message.into(),
		}
	}

	/// A failure on a named field.
	pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field: Some(field.into()),
			message: message.into(),
		}
	}
}

/// Ordered list of validation failures, preserved in the order reported.
///
/// # Examples
///
/// ```
/// use traverso_controllers::{ErrorDetail, ErrorList};
///
/// let mut errors = ErrorList::new();
/// errors.push(ErrorDetail::for_field("name", "must not be empty"));
/// errors.push(ErrorDetail::new("quota exceeded"));
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.iter().next().unwrap().field.as_deref(), Some("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorList(Vec<ErrorDetail>);

impl ErrorList {
	/// Status a packager must use when rendering an error list.
	pub const STATUS: StatusCode = StatusCode::UNPROCESSABLE_ENTITY;

	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, detail: ErrorDetail) {
		self.0.push(detail);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &ErrorDetail> {
		self.0.iter()
	}
}

impl FromIterator<ErrorDetail> for ErrorList {
	fn from_iter<I: IntoIterator<Item = ErrorDetail>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl From<Vec<ErrorDetail>> for ErrorList {
	fn from(details: Vec<ErrorDetail>) -> Self {
		Self(details)
	}
}

/// Boundary between the engine and a response format.
///
/// The engine resolves and invokes; a packager owns the shape of what goes
/// over the wire. Implementations live with the transport, not here.
pub trait Packager: Send + Sync {
	type Output;

	fn package(&self, payload: Payload) -> Self::Output;
}
