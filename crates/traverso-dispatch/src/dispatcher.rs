//! The dispatcher: resolution, relationship hops, and invocation.

use std::sync::Arc;

use traverso_controllers::{Invocation, Payload, Relation, RelationKind};
use traverso_exception::{Error, Result};
use traverso_http::{Key, ResourceRequest, coerce};

use crate::registry::{Registry, global_registry};
use crate::resolve::{Resolution, determine_action};

/// Drives one request through the registry until an action is invoked.
///
/// Dispatching a resource resolves its controller's action and either
/// invokes it or, when the action named a relation, follows the hop: the
/// relation's resolver produces the related identifier, the identifier is
/// substituted onto the front of the chain, and dispatch re-enters on the
/// target resource. Every hop consumes at least one original chain token, so
/// traversal always terminates.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use traverso_controllers::{ActionSet, Controller, Invocation, Payload};
/// use traverso_dispatch::{Dispatcher, Registry};
/// use traverso_exception::Result;
/// use traverso_http::ResourceRequest;
///
/// #[derive(Default)]
/// struct Widgets;
///
/// impl Controller for Widgets {
///     fn actions(&self) -> ActionSet {
///         ActionSet::standard()
///     }
///     fn handle(&self, invocation: Invocation<'_>) -> Result<Payload> {
///         Ok(Payload::Value(serde_json::json!({
///             "action": invocation.action().as_str(),
///         })))
///     }
/// }
///
/// let registry = Registry::builder().controller::<Widgets>("widgets").build();
/// let dispatcher = Dispatcher::new(registry.into());
///
/// let mut request = ResourceRequest::new(Method::GET, "/42");
/// let payload = dispatcher.dispatch("widgets", &mut request).unwrap();
/// assert_eq!(payload, Payload::Value(serde_json::json!({ "action": "show" })));
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
	registry: Arc<Registry>,
}

impl Dispatcher {
	pub fn new(registry: Arc<Registry>) -> Self {
		Self { registry }
	}

	/// A dispatcher over the installed global registry.
	///
	/// Fails when no registry has been installed yet. The snapshot taken
	/// here is used for the dispatcher's whole lifetime.
	pub fn from_global() -> Result<Self> {
		Ok(Self::new(global_registry()?))
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Resolve and run the request against `resource`.
	///
	/// Re-entered for every relationship hop. The request's chain must hold
	/// the tokens following the resource name; the name itself is not part
	/// of the chain.
	pub fn dispatch(&self, resource: &str, request: &mut ResourceRequest) -> Result<Payload> {
		let controller = self.registry.resolve(resource)?.instantiate();
		let method = request.method.clone();
		let Resolution { action, id } =
			determine_action(controller.as_ref(), &method, request.chain_mut())?;
		tracing::debug!(resource, action = %action, id = ?id, "action resolved");

		let relation = controller
			.relations()
			.into_iter()
			.find(|relation| relation.accessor() == action.as_str());
		if let Some(relation) = relation {
			return self.traverse(relation, id.as_ref(), request);
		}

		let actions = controller.actions();
		if !actions.contains(action.as_str()) && !actions.has_catch_all() {
			return Err(Error::MethodNotAllowed(format!(
				"resource '{}' does not perform '{}'",
				resource, action
			)));
		}
		controller.handle(Invocation::new(action, id, request))
	}

	/// Follow one relationship hop and delegate to its target.
	fn traverse(
		&self,
		relation: Relation,
		parent_id: Option<&Key>,
		request: &mut ResourceRequest,
	) -> Result<Payload> {
		tracing::debug!(
			accessor = relation.accessor(),
			target = relation.target(),
			kind = relation.kind().name(),
			"following relation"
		);

		match relation.kind() {
			RelationKind::Single(resolver) => {
				let related = resolver(parent_id)?;
				request.chain_mut().unshift(related);
			}
			RelationKind::Indexed(resolver) => {
				let items = resolver(parent_id)?;
				let index = match request.chain().peek_first() {
					None => {
						return Err(Error::BadRequest(format!(
							"relation '{}' requires an index segment",
							relation.accessor()
						)));
					}
					Some(Key::Int(index)) => *index,
					Some(Key::Str(segment)) => segment.parse::<i64>().map_err(|_| {
						Error::BadRequest(format!("index segment '{}' is not an integer", segment))
					})?,
					Some(other) => {
						return Err(Error::BadRequest(format!(
							"index segment '{}' is not an integer",
							other
						)));
					}
				};
				let slot = usize::try_from(index)
					.ok()
					.filter(|slot| *slot < items.len())
					.ok_or_else(|| {
						Error::NotFound(format!(
							"no element at index {} in '{}'",
							index,
							relation.accessor()
						))
					})?;
				request.chain_mut().shift();
				request.chain_mut().unshift(items[slot].clone());
			}
			RelationKind::Member(resolver) => {
				let members = resolver(parent_id)?;
				let candidate = request.chain_mut().shift().ok_or_else(|| {
					Error::BadRequest(format!(
						"relation '{}' requires a member identifier segment",
						relation.accessor()
					))
				})?;
				let target_kind = self.registry.resolve(relation.target())?.key_kind();
				let candidate = coerce(candidate, target_kind)?;
				if !members.contains(&candidate) {
					return Err(Error::NotFound(format!(
						"'{}' is not a member of '{}'",
						candidate,
						relation.accessor()
					)));
				}
				request.chain_mut().unshift(candidate);
			}
			RelationKind::Keyed(resolver) => {
				let entries = resolver(parent_id)?;
				let token = request.chain_mut().shift().ok_or_else(|| {
					Error::BadRequest(format!(
						"relation '{}' requires a key segment",
						relation.accessor()
					))
				})?;
				let name = match token {
					Key::Str(name) => name,
					other => {
						return Err(Error::BadRequest(format!(
							"key segment '{}' does not name an entry of '{}'",
							other,
							relation.accessor()
						)));
					}
				};
				let related = entries.get(&name).cloned().ok_or_else(|| {
					Error::NotFound(format!(
						"no entry for key '{}' in '{}'",
						name,
						relation.accessor()
					))
				})?;
				request.chain_mut().unshift(related);
			}
		}

		self.dispatch(relation.target(), request)
	}
}
