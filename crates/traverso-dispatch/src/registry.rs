//! The controller registry: resource names mapped to controller factories.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use traverso_controllers::Controller;
use traverso_exception::{Error, Result};
use traverso_http::KeyKind;

/// Builds a fresh controller for one resolution pass.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// One registered resource.
///
/// The key kind is snapshotted at registration so traversal can coerce a
/// candidate identifier for a target resource without instantiating its
/// controller first.
#[derive(Clone)]
pub struct ControllerEntry {
	factory: ControllerFactory,
	key_kind: KeyKind,
}

impl ControllerEntry {
	pub fn instantiate(&self) -> Box<dyn Controller> {
		(self.factory)()
	}

	pub fn key_kind(&self) -> KeyKind {
		self.key_kind
	}
}

impl fmt::Debug for ControllerEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ControllerEntry")
			.field("key_kind", &self.key_kind)
			.finish_non_exhaustive()
	}
}

/// Resource name to controller mapping.
///
/// Populated once at startup, then only read. Request handling resolves
/// names against an immutable snapshot, so a registry handed to a dispatcher
/// never changes underneath it.
///
/// # Examples
///
/// ```
/// use traverso_controllers::{ActionSet, Controller, Invocation, Payload};
/// use traverso_dispatch::Registry;
/// use traverso_exception::Result;
///
/// #[derive(Default)]
/// struct Widgets;
///
/// impl Controller for Widgets {
///     fn actions(&self) -> ActionSet {
///         ActionSet::standard()
///     }
///     fn handle(&self, _invocation: Invocation<'_>) -> Result<Payload> {
///         Ok(Payload::Value(serde_json::Value::Null))
///     }
/// }
///
/// let registry = Registry::builder().controller::<Widgets>("widgets").build();
/// assert!(registry.is_registered("widgets"));
/// assert!(registry.resolve("gadgets").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
	entries: HashMap<String, ControllerEntry>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	/// Register a controller type constructible with `Default`.
	pub fn register<C>(&mut self, name: impl Into<String>)
	where
		C: Controller + Default + 'static,
	{
		self.register_factory(name, Arc::new(|| Box::new(C::default()) as Box<dyn Controller>));
	}

	/// Register a resource with an explicit factory.
	///
	/// The factory runs once here so the entry can record the controller's
	/// key kind.
	pub fn register_factory(&mut self, name: impl Into<String>, factory: ControllerFactory) {
		let name = name.into();
		let key_kind = factory().key_kind();
		tracing::debug!(resource = %name, key_kind = key_kind.as_str(), "registered controller");
		self.entries.insert(name, ControllerEntry { factory, key_kind });
	}

	/// Look a resource up, failing as a misconfiguration when absent.
	///
	/// Absence here is never the client's fault: the name either came from
	/// application startup or from a declared relation target.
	pub fn resolve(&self, name: &str) -> Result<&ControllerEntry> {
		self.entries.get(name).ok_or_else(|| {
			Error::ServerMisconfiguration(format!("no controller registered for resource '{}'", name))
		})
	}

	pub fn is_registered(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registered resource names, in no particular order.
	pub fn resources(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}
}

/// Builder used at application startup.
#[derive(Default)]
pub struct RegistryBuilder {
	registry: Registry,
}

impl RegistryBuilder {
	/// Add a controller type constructible with `Default`.
	pub fn controller<C>(mut self, name: impl Into<String>) -> Self
	where
		C: Controller + Default + 'static,
	{
		self.registry.register::<C>(name);
		self
	}

	/// Add a resource with an explicit factory.
	pub fn controller_factory(mut self, name: impl Into<String>, factory: ControllerFactory) -> Self {
		self.registry.register_factory(name, factory);
		self
	}

	pub fn build(self) -> Registry {
		self.registry
	}
}

static GLOBAL_REGISTRY: RwLock<Option<Arc<Registry>>> = RwLock::new(None);

/// Install the process-wide registry.
///
/// Meant to run once during startup. Installing again replaces the previous
/// registry and logs a warning; requests already holding the old snapshot
/// finish against it.
pub fn install_registry(registry: Registry) {
	let mut guard = GLOBAL_REGISTRY.write().unwrap();
	if guard.is_some() {
		tracing::warn!("replacing an already installed controller registry");
	} else {
		tracing::info!(resources = registry.len(), "controller registry installed");
	}
	*guard = Some(Arc::new(registry));
}

/// Snapshot of the installed registry.
pub fn global_registry() -> Result<Arc<Registry>> {
	GLOBAL_REGISTRY
		.read()
		.unwrap()
		.clone()
		.ok_or_else(|| Error::ServerMisconfiguration("no controller registry installed".to_string()))
}

pub fn is_registry_installed() -> bool {
	GLOBAL_REGISTRY.read().unwrap().is_some()
}

/// Remove the installed registry. Intended for test isolation.
pub fn clear_registry() {
	*GLOBAL_REGISTRY.write().unwrap() = None;
}
