//! Action resolution: from a method and a chain to an action and identifier.

use http::Method;

use traverso_controllers::{Action, Controller};
use traverso_exception::{Error, Result};
use traverso_http::{Key, UrlChain, coerce};

/// Outcome of resolving one controller's slice of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
	pub action: Action,
	/// Identifier taken from the chain, coerced to the controller's key kind.
	pub id: Option<Key>,
}

/// Determine which action a request selects on `controller`.
///
/// Consumes at most two tokens from the front of the chain. The first token,
/// when present, is either a declared action name or an identifier:
///
/// - A string token matching a declared action or relation accessor selects
///   that action. The following token, unless it is itself a declared name,
///   is taken as the identifier.
/// - Any other token is taken as the identifier, provided it could coerce to
///   the controller's key kind. The following token must then be a declared
///   name or absent; anything else fails with method-not-allowed.
///
/// When no token named an action, the HTTP verb picks one from the fallback
/// table based on whether an identifier was taken. The identifier is coerced
/// last, so an explicitly named action with a malformed identifier reports
/// the bad identifier rather than a method mismatch.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use traverso_controllers::{Action, ActionSet, Controller, Invocation, Payload};
/// use traverso_dispatch::determine_action;
/// use traverso_exception::Result;
/// use traverso_http::{Key, KeyKind, UrlChain};
///
/// #[derive(Default)]
/// struct Widgets;
///
/// impl Controller for Widgets {
///     fn key_kind(&self) -> KeyKind {
///         KeyKind::Int
///     }
///     fn actions(&self) -> ActionSet {
///         ActionSet::standard()
///     }
///     fn handle(&self, _invocation: Invocation<'_>) -> Result<Payload> {
///         Ok(Payload::Value(serde_json::Value::Null))
///     }
/// }
///
/// let mut chain = UrlChain::from_path("/42");
/// let resolution = determine_action(&Widgets, &Method::GET, &mut chain).unwrap();
/// assert_eq!(resolution.action, Action::Show);
/// assert_eq!(resolution.id, Some(Key::Int(42)));
/// assert!(chain.is_empty());
/// ```
pub fn determine_action(
	controller: &dyn Controller,
	method: &Method,
	chain: &mut UrlChain,
) -> Result<Resolution> {
	let key_kind = controller.key_kind();
	let actions = controller.actions();
	let accessors: Vec<String> = controller
		.relations()
		.iter()
		.map(|relation| relation.accessor().to_string())
		.collect();
	let declared = |name: &str| actions.contains(name) || accessors.iter().any(|a| a == name);

	let mut action: Option<Action> = None;
	let mut id: Option<Key> = None;

	match chain.shift() {
		None => {}
		Some(Key::Str(name)) if declared(&name) => {
			action = Some(Action::from_name(&name));
			// The next token only counts as an identifier if it could not
			// itself be an action name.
			let ambiguous = matches!(chain.peek_first(), Some(Key::Str(next)) if declared(next));
			if !ambiguous {
				id = chain.shift();
			}
		}
		Some(token) => {
			// Identifier first. The token must at least look like an
			// identifier for this resource, otherwise the URL selects
			// nothing recognizable.
			coerce(token.clone(), key_kind).map_err(|_| {
				Error::MethodNotAllowed(format!(
					"'{}' is neither a declared action nor a valid identifier",
					token
				))
			})?;
			id = Some(token);

			match chain.shift() {
				None => {}
				Some(Key::Str(name)) if declared(&name) => {
					action = Some(Action::from_name(&name));
				}
				Some(trailing) => {
					return Err(Error::MethodNotAllowed(format!(
						"unexpected segment '{}' after identifier",
						trailing
					)));
				}
			}
		}
	}

	let action = match action {
		Some(action) => action,
		None => Action::from_verb(method, id.is_some()).ok_or_else(|| {
			Error::MethodNotAllowed(format!("no fallback action for method {}", method))
		})?,
	};

	let id = id.map(|key| coerce(key, key_kind)).transpose()?;

	Ok(Resolution { action, id })
}
