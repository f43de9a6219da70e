//! The controller trait and the invocation handed to it.

use traverso_exception::Result;
use traverso_http::{Key, KeyKind, ResourceRequest};

use crate::action::{Action, ActionSet};
use crate::payload::Payload;
use crate::relation::Relation;

/// Everything a controller receives when its resolved action runs.
///
/// The identifier, when present, has already been coerced to the
/// controller's declared key kind, and the request's chain has been fully
/// consumed up to this resource.
#[derive(Debug)]
pub struct Invocation<'a> {
	action: Action,
	id: Option<Key>,
	request: &'a ResourceRequest,
}

impl<'a> Invocation<'a> {
	pub fn new(action: Action, id: Option<Key>, request: &'a ResourceRequest) -> Self {
		Self {
			action,
			id,
			request,
		}
	}

	pub fn action(&self) -> &Action {
		&self.action
	}

	pub fn id(&self) -> Option<&Key> {
		self.id.as_ref()
	}

	pub fn request(&self) -> &ResourceRequest {
		self.request
	}

	/// Take ownership of the identifier.
	pub fn into_id(self) -> Option<Key> {
		self.id
	}
}

/// A resource handler.
///
/// One controller instance serves one resolution pass over one resource. The
/// dispatcher instantiates controllers through the registry, asks them what
/// they declare, and invokes [`Controller::handle`] once resolution lands on
/// a terminal action. Relationship accessors never reach `handle`; they are
/// intercepted and delegated to the target resource.
///
/// # Examples
///
/// ```
/// use traverso_controllers::{ActionSet, Controller, Invocation, Payload};
/// use traverso_exception::Result;
///
/// #[derive(Default)]
/// struct Widgets;
///
/// impl Controller for Widgets {
///     fn actions(&self) -> ActionSet {
///         ActionSet::standard()
///     }
///
///     fn handle(&self, invocation: Invocation<'_>) -> Result<Payload> {
///         Ok(Payload::Value(serde_json::json!({
///             "action": invocation.action().as_str(),
///         })))
///     }
/// }
/// ```
pub trait Controller: Send + Sync {
	/// Key type identifiers for this resource coerce to.
	fn key_kind(&self) -> KeyKind {
		KeyKind::Str
	}

	/// Action names this controller answers to.
	fn actions(&self) -> ActionSet;

	/// Declared sub-resources, if any.
	fn relations(&self) -> Vec<Relation> {
		Vec::new()
	}

	/// Run the resolved action.
	fn handle(&self, invocation: Invocation<'_>) -> Result<Payload>;
}
