//! Request dispatching for Traverso.
//!
//! Ties the data model together: a [`Registry`] maps resource names to
//! controllers, [`determine_action`] resolves what a request asks of one
//! controller, and the [`Dispatcher`] walks relationship hops until a
//! terminal action is invoked.
//!
//! ```text
//! dispatch(resource, request)
//!     -> registry lookup -> determine_action(controller, method, chain)
//!            -> action is a relation accessor?
//!                 yes -> resolve related id -> unshift -> dispatch(target, request)
//!                 no  -> Controller::handle(invocation) -> Payload
//! ```
//!
//! Resolution is synchronous and performs no I/O. Anything a controller or
//! resolver needs at request time has to be in memory already.

pub mod dispatcher;
pub mod registry;
pub mod resolve;

pub use dispatcher::Dispatcher;
pub use registry::{
	ControllerEntry, ControllerFactory, Registry, RegistryBuilder, clear_registry, global_registry,
	install_registry, is_registry_installed,
};
pub use resolve::{Resolution, determine_action};

// Re-export error types so downstream crates share one vocabulary.
pub use traverso_exception::{Error, Result};
