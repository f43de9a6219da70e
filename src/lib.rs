//! # Traverso
//!
//! Recursive resource dispatch for REST services.
//!
//! Traverso answers one question: given an HTTP method and a URL path, which
//! controller and which action should run, and with what identifier? It
//! resolves the answer by consuming the path front-to-back, following
//! declared relationships between resources (`/widgets/42/parts/3`) until a
//! terminal action is reached, then invokes it. The engine performs no I/O
//! and knows nothing about transports; feed it requests from any server.
//!
//! ## Core Concepts
//!
//! - **Controller**: a resource handler declaring its actions, relations,
//!   and identifier key kind
//! - **URL Chain**: the unconsumed remainder of the path, worked strictly
//!   from the front
//! - **Registry**: the startup-time map from resource names to controllers
//! - **Dispatcher**: resolves actions and follows relationship hops until a
//!   terminal action is invoked
//!
//! ## Quick Example
//!
//! ```
//! use http::Method;
//! use traverso::{
//!     ActionSet, Controller, Dispatcher, Invocation, Key, KeyKind, Payload, Registry, Relation,
//!     ResourceRequest, Result,
//! };
//!
//! #[derive(Default)]
//! struct Widgets;
//!
//! impl Controller for Widgets {
//!     fn key_kind(&self) -> KeyKind {
//!         KeyKind::Int
//!     }
//!
//!     fn actions(&self) -> ActionSet {
//!         ActionSet::standard()
//!     }
//!
//!     fn relations(&self) -> Vec<Relation> {
//!         vec![Relation::indexed("parts", |_| {
//!             Ok(vec![Key::Int(10), Key::Int(20), Key::Int(30)])
//!         })]
//!     }
//!
//!     fn handle(&self, invocation: Invocation<'_>) -> Result<Payload> {
//!         Ok(Payload::Value(serde_json::json!({
//!             "resource": "widgets",
//!             "action": invocation.action().as_str(),
//!             "id": invocation.id(),
//!         })))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Parts;
//!
//! impl Controller for Parts {
//!     fn key_kind(&self) -> KeyKind {
//!         KeyKind::Int
//!     }
//!
//!     fn actions(&self) -> ActionSet {
//!         ActionSet::standard()
//!     }
//!
//!     fn handle(&self, invocation: Invocation<'_>) -> Result<Payload> {
//!         Ok(Payload::Value(serde_json::json!({
//!             "resource": "parts",
//!             "id": invocation.id(),
//!         })))
//!     }
//! }
//!
//! let registry = Registry::builder()
//!     .controller::<Widgets>("widgets")
//!     .controller::<Parts>("parts")
//!     .build();
//! let dispatcher = Dispatcher::new(registry.into());
//!
//! // /42 resolves to show on widgets.
//! let mut request = ResourceRequest::new(Method::GET, "/42");
//! let payload = dispatcher.dispatch("widgets", &mut request).unwrap();
//! assert_eq!(
//!     payload,
//!     Payload::Value(serde_json::json!({ "resource": "widgets", "action": "show", "id": 42 }))
//! );
//!
//! // /42/parts/1 hops through the relation to the second part.
//! let mut request = ResourceRequest::new(Method::GET, "/42/parts/1");
//! let payload = dispatcher.dispatch("widgets", &mut request).unwrap();
//! assert_eq!(
//!     payload,
//!     Payload::Value(serde_json::json!({ "resource": "parts", "id": 20 }))
//! );
//! ```

// Re-export error types
pub use traverso_exception::{Error, Result};

// Re-export the request model
pub use traverso_http::{
	Key, KeyKind, ResourceRequest, ResourceRequestBuilder, UrlChain, coerce, parse_urlencoded,
};

// Re-export the controller model
pub use traverso_controllers::{
	Action, ActionSet, Controller, ErrorDetail, ErrorList, Invocation, KeyedResolver, ManyResolver,
	OneResolver, Packager, Payload, Relation, RelationKind,
};

// Re-export dispatching
pub use traverso_dispatch::{
	ControllerEntry, ControllerFactory, Dispatcher, Registry, RegistryBuilder, Resolution,
	clear_registry, determine_action, global_registry, install_registry, is_registry_installed,
};

// Re-export commonly used external types
pub use bytes::Bytes;
pub use http::{Method, StatusCode};
pub use serde_json;

pub mod prelude {
	//! Everything needed to declare controllers and dispatch requests.

	pub use crate::{
		Action,
		ActionSet,
		Controller,
		Dispatcher,
		Error,
		ErrorDetail,
		ErrorList,
		Invocation,
		Key,
		KeyKind,
		Payload,
		Registry,
		Relation,
		RelationKind,
		ResourceRequest,
		Result,
		UrlChain,
		// Global registry
		clear_registry,
		global_registry,
		install_registry,
		is_registry_installed,
	};

	// External
	pub use http::{Method, StatusCode};
}
