//! Actions a controller can perform and the set it declares.

use std::collections::BTreeSet;
use std::fmt;

use http::Method;

/// Semantic operation resolved for a request.
///
/// The eight named variants are the canonical collection and member
/// operations. Anything else a controller declares, including relationship
/// accessors, resolves as [`Action::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
	/// List the collection.
	Index,
	/// Fetch one member.
	Show,
	/// Create a new member.
	Create,
	/// Modify one member.
	Update,
	/// Replace the whole collection.
	Replace,
	/// Add to the collection.
	Add,
	/// Delete one member.
	Destroy,
	/// Delete the whole collection.
	Drop,
	/// Any declared non-canonical action.
	Custom(String),
}

impl Action {
	/// Turn a declared name into an action.
	///
	/// # Examples
	///
	/// ```
	/// use traverso_controllers::Action;
	///
	/// assert_eq!(Action::from_name("show"), Action::Show);
	/// assert_eq!(Action::from_name("publish"), Action::Custom("publish".to_string()));
	/// ```
	pub fn from_name(name: &str) -> Self {
		match name {
			"index" => Action::Index,
			"show" => Action::Show,
			"create" => Action::Create,
			"update" => Action::Update,
			"replace" => Action::Replace,
			"add" => Action::Add,
			"destroy" => Action::Destroy,
			"drop" => Action::Drop,
			other => Action::Custom(other.to_string()),
		}
	}

	/// The declared name of this action.
	pub fn as_str(&self) -> &str {
		match self {
			Action::Index => "index",
			Action::Show => "show",
			Action::Create => "create",
			Action::Update => "update",
			Action::Replace => "replace",
			Action::Add => "add",
			Action::Destroy => "destroy",
			Action::Drop => "drop",
			Action::Custom(name) => name,
		}
	}

	/// Fallback action for a request that names no action explicitly.
	///
	/// `detail` is whether an identifier was taken from the chain. Returns
	/// `None` for methods outside the fallback table; resolution turns that
	/// into a method-not-allowed failure.
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use traverso_controllers::Action;
	///
	/// assert_eq!(Action::from_verb(&Method::GET, false), Some(Action::Index));
	/// assert_eq!(Action::from_verb(&Method::GET, true), Some(Action::Show));
	/// assert_eq!(Action::from_verb(&Method::PATCH, true), None);
	/// ```
	pub fn from_verb(method: &Method, detail: bool) -> Option<Self> {
		match (method, detail) {
			(&Method::GET, false) => Some(Action::Index),
			(&Method::GET, true) => Some(Action::Show),
			(&Method::PUT, false) => Some(Action::Replace),
			(&Method::PUT, true) => Some(Action::Update),
			(&Method::POST, false) => Some(Action::Create),
			(&Method::POST, true) => Some(Action::Add),
			(&Method::DELETE, false) => Some(Action::Drop),
			(&Method::DELETE, true) => Some(Action::Destroy),
			_ => None,
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The action names a controller answers to.
///
/// Membership is an ordinary set lookup. A set may additionally declare a
/// catch-all, meaning the controller handles any resolved action itself,
/// which is how fallback handlers are expressed.
///
/// # Examples
///
/// ```
/// use traverso_controllers::ActionSet;
///
/// let actions = ActionSet::new().with("index").with("show").with("publish");
/// assert!(actions.contains("publish"));
/// assert!(!actions.contains("destroy"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSet {
	names: BTreeSet<String>,
	catch_all: bool,
}

impl ActionSet {
	/// An empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// The eight canonical collection and member actions.
	pub fn standard() -> Self {
		[
			"index", "show", "create", "update", "replace", "add", "destroy", "drop",
		]
		.into_iter()
		.collect()
	}

	/// Add a name, builder style.
	pub fn with(mut self, name: impl Into<String>) -> Self {
		self.insert(name);
		self
	}

	/// Mark the set as answering any resolved action.
	pub fn with_catch_all(mut self) -> Self {
		self.catch_all = true;
		self
	}

	pub fn insert(&mut self, name: impl Into<String>) {
		self.names.insert(name.into());
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.contains(name)
	}

	pub fn has_catch_all(&self) -> bool {
		self.catch_all
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Declared names in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for ActionSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self {
			names: iter.into_iter().map(Into::into).collect(),
			catch_all: false,
		}
	}
}
