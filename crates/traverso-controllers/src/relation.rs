//! Relationship descriptors: how one resource reaches another.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use traverso_exception::Result;
use traverso_http::Key;

/// Resolver for a single-link relation: the one related identifier.
pub type OneResolver = Arc<dyn Fn(Option<&Key>) -> Result<Key> + Send + Sync>;

/// Resolver for indexed and member relations: the related identifiers.
pub type ManyResolver = Arc<dyn Fn(Option<&Key>) -> Result<Vec<Key>> + Send + Sync>;

/// Resolver for keyed relations: named slots mapping to identifiers.
pub type KeyedResolver = Arc<dyn Fn(Option<&Key>) -> Result<HashMap<String, Key>> + Send + Sync>;

/// Traversal semantics of a relation.
///
/// Each variant carries the resolver that produces the related identifiers
/// from the parent identifier. Resolvers receive `None` when the parent
/// action resolved without an identifier. They must not perform I/O; any
/// lookup they need has to be closed over at registration time.
#[derive(Clone)]
pub enum RelationKind {
	/// Exactly one related resource. Its identifier is delegated as-is.
	Single(OneResolver),
	/// An ordered collection. The next chain segment is a zero-based index
	/// into the resolved identifiers.
	Indexed(ManyResolver),
	/// A collection addressed by identifier. The next chain segment must
	/// itself be one of the resolved identifiers.
	Member(ManyResolver),
	/// A named collection. The next chain segment is looked up as a key.
	Keyed(KeyedResolver),
}

impl RelationKind {
	/// Name used in log fields and error detail.
	pub fn name(&self) -> &'static str {
		match self {
			RelationKind::Single(_) => "single",
			RelationKind::Indexed(_) => "indexed",
			RelationKind::Member(_) => "member",
			RelationKind::Keyed(_) => "keyed",
		}
	}
}

impl fmt::Debug for RelationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A declared sub-resource of a controller.
///
/// The accessor is the URL segment that selects the relation and defaults to
/// the target resource name. The target must be registered; delegation hands
/// the rest of the chain to its controller.
///
/// # Examples
///
/// ```
/// use traverso_controllers::Relation;
/// use traverso_http::Key;
///
/// let relation = Relation::indexed("parts", |_parent| {
///     Ok(vec![Key::Int(10), Key::Int(20), Key::Int(30)])
/// });
/// assert_eq!(relation.accessor(), "parts");
///
/// let renamed = Relation::single("profiles", |_parent| Ok(Key::Int(1)))
///     .with_accessor("owner");
/// assert_eq!(renamed.accessor(), "owner");
/// assert_eq!(renamed.target(), "profiles");
/// ```
#[derive(Debug, Clone)]
pub struct Relation {
	target: String,
	accessor: String,
	kind: RelationKind,
}

impl Relation {
	fn new(target: String, kind: RelationKind) -> Self {
		Self {
			accessor: target.clone(),
			target,
			kind,
		}
	}

	/// A one-to-one link to `target`.
	pub fn single<F>(target: impl Into<String>, resolver: F) -> Self
	where
		F: Fn(Option<&Key>) -> Result<Key> + Send + Sync + 'static,
	{
		Self::new(target.into(), RelationKind::Single(Arc::new(resolver)))
	}

	/// An index-addressed collection of `target`.
	pub fn indexed<F>(target: impl Into<String>, resolver: F) -> Self
	where
		F: Fn(Option<&Key>) -> Result<Vec<Key>> + Send + Sync + 'static,
	{
		Self::new(target.into(), RelationKind::Indexed(Arc::new(resolver)))
	}

	/// A membership-checked collection of `target`.
	pub fn member<F>(target: impl Into<String>, resolver: F) -> Self
	where
		F: Fn(Option<&Key>) -> Result<Vec<Key>> + Send + Sync + 'static,
	{
		Self::new(target.into(), RelationKind::Member(Arc::new(resolver)))
	}

	/// A name-addressed collection of `target`.
	pub fn keyed<F>(target: impl Into<String>, resolver: F) -> Self
	where
		F: Fn(Option<&Key>) -> Result<HashMap<String, Key>> + Send + Sync + 'static,
	{
		Self::new(target.into(), RelationKind::Keyed(Arc::new(resolver)))
	}

	/// Select this relation by a different URL segment than the target name.
	pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
		self.accessor = accessor.into();
		self
	}

	/// Registered resource name this relation delegates to.
	pub fn target(&self) -> &str {
		&self.target
	}

	/// URL segment that selects this relation.
	pub fn accessor(&self) -> &str {
		&self.accessor
	}

	pub fn kind(&self) -> &RelationKind {
		&self.kind
	}
}
