//! Error types shared across the Traverso engine.
//!
//! Every fallible operation in the engine returns [`Result`], and every
//! failure is one of the five [`Error`] variants. Resolution never panics on
//! malformed input: anything a client can cause maps to a 4xx variant, and
//! anything only a broken deployment can cause maps to
//! [`Error::ServerMisconfiguration`].

use http::StatusCode;
use thiserror::Error;

/// Convenience alias used by all engine crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced while resolving or invoking a resource action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// No action could be determined for the request method and URL shape.
	#[error("Method not allowed: {0}")]
	MethodNotAllowed(String),

	/// The URL was structurally invalid for the traversal it attempted.
	#[error("Bad request: {0}")]
	BadRequest(String),

	/// The URL was well formed but named something that does not exist.
	#[error("Not found: {0}")]
	NotFound(String),

	/// The deployment is broken, for example a relation names an
	/// unregistered resource. Never caused by client input.
	#[error("Server misconfiguration: {0}")]
	ServerMisconfiguration(String),

	/// An identifier segment could not be coerced to the declared key type.
	#[error("Invalid identifier: {0}")]
	InvalidIdentifier(String),
}

impl Error {
	/// HTTP status a transport adapter should answer with.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use traverso_exception::Error;
	///
	/// let err = Error::NotFound("no entry for key \"second\"".to_string());
	/// assert_eq!(err.status(), StatusCode::NOT_FOUND);
	/// ```
	pub fn status(&self) -> StatusCode {
		match self {
			Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
			Error::BadRequest(_) => StatusCode::BAD_REQUEST,
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::ServerMisconfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
			Error::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
		}
	}

	/// True when the failure is attributable to the client request.
	pub fn is_client_error(&self) -> bool {
		self.status().is_client_error()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Error::MethodNotAllowed("x".into()), StatusCode::METHOD_NOT_ALLOWED)]
	#[case(Error::BadRequest("x".into()), StatusCode::BAD_REQUEST)]
	#[case(Error::NotFound("x".into()), StatusCode::NOT_FOUND)]
	#[case(Error::ServerMisconfiguration("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
	#[case(Error::InvalidIdentifier("x".into()), StatusCode::BAD_REQUEST)]
	fn test_status_mapping(#[case] error: Error, #[case] expected: StatusCode) {
		assert_eq!(error.status(), expected);
	}

	#[test]
	fn test_display_includes_detail() {
		let err = Error::InvalidIdentifier("expected an integer identifier, got \"x\"".to_string());
		assert_eq!(
			err.to_string(),
			"Invalid identifier: expected an integer identifier, got \"x\""
		);
	}

	#[test]
	fn test_misconfiguration_is_not_a_client_error() {
		assert!(Error::BadRequest("x".into()).is_client_error());
		assert!(!Error::ServerMisconfiguration("x".into()).is_client_error());
	}
}
