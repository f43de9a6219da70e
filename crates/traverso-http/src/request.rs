//! The request as the engine sees it: a method, a URL chain, and parameters.

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use percent_encoding::percent_decode_str;

use crate::chain::UrlChain;

/// Parse an `application/x-www-form-urlencoded` string into a map.
///
/// Pairs are split on the first `=` only, so values may themselves contain
/// `=` characters. A key with no `=` maps to the empty string. Keys and
/// values are percent-decoded.
///
/// # Examples
///
/// ```
/// use traverso_http::parse_urlencoded;
///
/// let params = parse_urlencoded("filter=a%3Db=c&flag");
/// assert_eq!(params.get("filter"), Some(&"a=b=c".to_string()));
/// assert_eq!(params.get("flag"), Some(&"".to_string()));
/// ```
pub fn parse_urlencoded(input: &str) -> HashMap<String, String> {
	input
		.split('&')
		.filter(|pair| !pair.is_empty())
		.filter_map(|pair| {
			let mut parts = pair.splitn(2, '=');
			let key = parts.next()?;
			let value = parts.next().unwrap_or("");
			Some((
				percent_decode_str(key).decode_utf8_lossy().into_owned(),
				percent_decode_str(value).decode_utf8_lossy().into_owned(),
			))
		})
		.collect()
}

/// Everything resolution needs from one HTTP request.
///
/// The chain is deliberately not a public field: it may only be consumed
/// through [`UrlChain::shift`] and [`UrlChain::unshift`], reached via
/// [`ResourceRequest::chain_mut`].
///
/// # Examples
///
/// ```
/// use http::Method;
/// use traverso_http::ResourceRequest;
///
/// let request = ResourceRequest::builder()
///     .method(Method::GET)
///     .path("/widgets/42?page=2")
///     .build();
///
/// assert_eq!(request.chain().len(), 2);
/// assert_eq!(request.query_params.get("page"), Some(&"2".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceRequest {
	pub method: Method,
	chain: UrlChain,
	pub body: Bytes,
	pub route_params: HashMap<String, String>,
	pub body_params: HashMap<String, String>,
	pub query_params: HashMap<String, String>,
}

impl ResourceRequest {
	/// A request with the given method and path and nothing else.
	pub fn new(method: Method, path: &str) -> Self {
		Self::builder().method(method).path(path).build()
	}

	/// Start building a request.
	pub fn builder() -> ResourceRequestBuilder {
		ResourceRequestBuilder::new()
	}

	/// The tokens not yet consumed by resolution.
	pub fn chain(&self) -> &UrlChain {
		&self.chain
	}

	/// Mutable access for resolution and relationship hops.
	pub fn chain_mut(&mut self) -> &mut UrlChain {
		&mut self.chain
	}

	/// Look a parameter up across all three maps.
	///
	/// Route parameters win over body parameters, which win over query
	/// parameters.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.route_params
			.get(name)
			.or_else(|| self.body_params.get(name))
			.or_else(|| self.query_params.get(name))
			.map(String::as_str)
	}

	/// Record a route parameter, replacing any previous value.
	pub fn set_route_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.route_params.insert(name.into(), value.into());
	}
}

/// Builder for [`ResourceRequest`].
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use http::Method;
/// use traverso_http::ResourceRequest;
///
/// let request = ResourceRequest::builder()
///     .method(Method::POST)
///     .path("/widgets")
///     .form_body(Bytes::from_static(b"name=gear&size=12"))
///     .build();
///
/// assert_eq!(request.body_params.get("name"), Some(&"gear".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceRequestBuilder {
	method: Method,
	path: String,
	body: Bytes,
	route_params: HashMap<String, String>,
	body_params: HashMap<String, String>,
	query_params: HashMap<String, String>,
}

impl ResourceRequestBuilder {
	pub fn new() -> Self {
		Self {
			method: Method::GET,
			path: String::new(),
			body: Bytes::new(),
			route_params: HashMap::new(),
			body_params: HashMap::new(),
			query_params: HashMap::new(),
		}
	}

	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	/// Request path, optionally with a query string after `?`.
	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Raw form body. Parsed into body parameters at build time.
	pub fn form_body(mut self, body: Bytes) -> Self {
		self.body = body;
		self
	}

	pub fn route_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.route_params.insert(name.into(), value.into());
		self
	}

	pub fn body_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.body_params.insert(name.into(), value.into());
		self
	}

	pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query_params.insert(name.into(), value.into());
		self
	}

	pub fn build(self) -> ResourceRequest {
		let (path, query) = match self.path.split_once('?') {
			Some((path, query)) => (path, Some(query)),
			None => (self.path.as_str(), None),
		};

		let mut query_params = query.map(parse_urlencoded).unwrap_or_default();
		query_params.extend(self.query_params);

		let mut body_params = if self.body.is_empty() {
			HashMap::new()
		} else {
			parse_urlencoded(&String::from_utf8_lossy(&self.body))
		};
		body_params.extend(self.body_params);

		ResourceRequest {
			method: self.method,
			chain: UrlChain::from_path(path),
			body: self.body,
			route_params: self.route_params,
			body_params,
			query_params,
		}
	}
}

impl Default for ResourceRequestBuilder {
	fn default() -> Self {
		Self::new()
	}
}
