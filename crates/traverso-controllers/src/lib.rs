//! Controller-side model for the Traverso engine.
//!
//! A controller declares three things: the [`ActionSet`] of names it answers
//! to, the [`Relation`]s connecting it to other resources, and the key kind
//! its identifiers coerce to. Resolution consults those declarations only;
//! nothing here is discovered by reflection at request time.

pub mod action;
pub mod controller;
pub mod payload;
pub mod relation;

pub use action::{Action, ActionSet};
pub use controller::{Controller, Invocation};
pub use payload::{ErrorDetail, ErrorList, Packager, Payload};
pub use relation::{KeyedResolver, ManyResolver, OneResolver, Relation, RelationKind};

// Re-export error types so downstream crates share one vocabulary.
pub use traverso_exception::{Error, Result};
