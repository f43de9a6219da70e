//! Integration tests for relationship traversal
//!
//! Tests cover:
//! - Single-link delegation and parent id context
//! - Indexed-array selection, bounds, and malformed indexes
//! - Validated-set membership and candidate coercion
//! - Keyed-map lookup and missing keys
//! - Multi-hop chains across three resources

use std::collections::HashMap;

use http::Method;
use traverso_controllers::{ActionSet, Controller, Invocation, Payload, Relation};
use traverso_dispatch::{Dispatcher, Registry};
use traverso_exception::{Error, Result};
use traverso_http::{Key, KeyKind, ResourceRequest};

// ============================================================================
// Test Controllers
// ============================================================================

/// Reports back which id and action reached it.
#[derive(Default)]
struct Echo;

impl Controller for Echo {
	fn key_kind(&self) -> KeyKind {
		KeyKind::Int
	}

	fn actions(&self) -> ActionSet {
		ActionSet::standard()
	}

	fn handle(&self, invocation: Invocation<'_>) -> Result<Payload> {
		Ok(Payload::Value(serde_json::json!({
			"action": invocation.action().as_str(),
			"id": invocation.id(),
		})))
	}
}

#[derive(Default)]
struct Machines;

impl Controller for Machines {
	fn key_kind(&self) -> KeyKind {
		KeyKind::Int
	}

	fn actions(&self) -> ActionSet {
		ActionSet::standard()
	}

	fn relations(&self) -> Vec<Relation> {
		vec![
			Relation::indexed("parts", |_| {
				Ok(vec![Key::Int(10), Key::Int(20), Key::Int(30)])
			}),
			Relation::member("sensors", |_| Ok(vec![Key::Int(1), Key::Int(2), Key::Int(3)])),
			Relation::keyed("slots", |_| {
				Ok(HashMap::from([
					("first".to_string(), Key::Int(1)),
					("second".to_string(), Key::Int(2)),
				]))
			}),
			Relation::single("owners", |id| {
				Ok(match id {
					Some(Key::Int(44)) => Key::Int(900),
					_ => Key::Int(901),
				})
			})
			.with_accessor("owner"),
		]
	}

	fn handle(&self, invocation: Invocation<'_>) -> Result<Payload> {
		Ok(Payload::Value(serde_json::json!({
			"action": invocation.action().as_str(),
			"id": invocation.id(),
		})))
	}
}

/// Middle resource for the three-hop test. Its bolt list depends on the
/// part id it was reached with.
#[derive(Default)]
struct Parts;

impl Controller for Parts {
	fn key_kind(&self) -> KeyKind {
		KeyKind::Int
	}

	fn actions(&self) -> ActionSet {
		ActionSet::standard()
	}

	fn relations(&self) -> Vec<Relation> {
		vec![Relation::indexed("bolts", |id| {
			let base = match id {
				Some(Key::Int(part)) => part * 10,
				_ => 0,
			};
			Ok(vec![Key::Int(base + 1), Key::Int(base + 2)])
		})]
	}

	fn handle(&self, invocation: Invocation<'_>) -> Result<Payload> {
		Ok(Payload::Value(serde_json::json!({
			"action": invocation.action().as_str(),
			"id": invocation.id(),
		})))
	}
}

// ============================================================================
// Helpers
// ============================================================================

fn registry() -> Registry {
	Registry::builder()
		.controller::<Machines>("machines")
		.controller::<Parts>("parts")
		.controller::<Echo>("sensors")
		.controller::<Echo>("slots")
		.controller::<Echo>("owners")
		.controller::<Echo>("bolts")
		.build()
}

fn dispatch(method: Method, path: &str) -> Result<Payload> {
	let dispatcher = Dispatcher::new(registry().into());
	let mut request = ResourceRequest::new(method, path);
	dispatcher.dispatch("machines", &mut request)
}

fn shown(id: i64) -> Payload {
	Payload::Value(serde_json::json!({ "action": "show", "id": id }))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_indexed_relation_selects_by_position() {
	assert_eq!(dispatch(Method::GET, "/44/parts/0").unwrap(), shown(10));
	assert_eq!(dispatch(Method::GET, "/44/parts/1").unwrap(), shown(20));
	assert_eq!(dispatch(Method::GET, "/44/parts/2").unwrap(), shown(30));
}

#[test]
fn test_indexed_relation_out_of_range_is_not_found() {
	let err = dispatch(Method::GET, "/44/parts/5").unwrap_err();
	assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);

	let err = dispatch(Method::GET, "/44/parts/-1").unwrap_err();
	assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[test]
fn test_indexed_relation_non_integer_index_is_bad_request() {
	let err = dispatch(Method::GET, "/44/parts/x").unwrap_err();
	assert!(matches!(err, Error::BadRequest(_)), "got {:?}", err);
}

#[test]
fn test_indexed_relation_missing_index_is_bad_request() {
	let err = dispatch(Method::GET, "/44/parts").unwrap_err();
	assert!(matches!(err, Error::BadRequest(_)), "got {:?}", err);
}

#[test]
fn test_member_relation_accepts_a_member() {
	assert_eq!(dispatch(Method::GET, "/44/sensors/2").unwrap(), shown(2));
}

#[test]
fn test_member_relation_rejects_a_non_member() {
	let err = dispatch(Method::GET, "/44/sensors/9").unwrap_err();
	assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[test]
fn test_member_relation_candidate_coerces_to_the_target_key_kind() {
	// The sensors target declares integer keys, so a candidate that cannot
	// parse is an identifier failure, not a membership failure.
	let err = dispatch(Method::GET, "/44/sensors/two").unwrap_err();
	assert!(matches!(err, Error::InvalidIdentifier(_)), "got {:?}", err);
}

#[test]
fn test_member_relation_missing_candidate_is_bad_request() {
	let err = dispatch(Method::GET, "/44/sensors").unwrap_err();
	assert!(matches!(err, Error::BadRequest(_)), "got {:?}", err);
}

#[test]
fn test_keyed_relation_resolves_a_known_key() {
	assert_eq!(dispatch(Method::GET, "/44/slots/second").unwrap(), shown(2));
	assert_eq!(dispatch(Method::GET, "/44/slots/first").unwrap(), shown(1));
}

#[test]
fn test_keyed_relation_unknown_key_is_not_found() {
	let err = dispatch(Method::GET, "/44/slots/third").unwrap_err();
	assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[test]
fn test_keyed_relation_missing_key_segment_is_bad_request() {
	let err = dispatch(Method::GET, "/44/slots").unwrap_err();
	assert!(matches!(err, Error::BadRequest(_)), "got {:?}", err);
}

#[test]
fn test_single_relation_delegates_with_the_resolved_id() {
	// The owner resolver distinguishes machine 44 from any other machine.
	assert_eq!(dispatch(Method::GET, "/44/owner").unwrap(), shown(900));
	assert_eq!(dispatch(Method::GET, "/45/owner").unwrap(), shown(901));
}

#[test]
fn test_single_relation_without_a_parent_id_passes_none() {
	// A collection-level hop reaches the resolver with no parent id.
	let dispatcher = Dispatcher::new(registry().into());
	let mut request = ResourceRequest::new(Method::GET, "/owner");
	let payload = dispatcher.dispatch("machines", &mut request).unwrap();
	assert_eq!(payload, shown(901));
}

#[test]
fn test_traversal_spans_three_resources() {
	// machines/44 -> parts[1] = 20 -> bolts of part 20 -> index 1 = 202
	assert_eq!(
		dispatch(Method::GET, "/44/parts/1/bolts/1").unwrap(),
		shown(202)
	);
}

#[test]
fn test_verbs_apply_at_the_end_of_traversal() {
	let payload = dispatch(Method::DELETE, "/44/parts/1").unwrap();
	assert_eq!(
		payload,
		Payload::Value(serde_json::json!({ "action": "destroy", "id": 20 }))
	);
}

#[test]
fn test_resolver_failures_propagate_unchanged() {
	#[derive(Default)]
	struct Flaky;
	impl Controller for Flaky {
		fn actions(&self) -> ActionSet {
			ActionSet::standard()
		}
		fn relations(&self) -> Vec<Relation> {
			vec![Relation::single("owners", |_| {
				Err(Error::NotFound("owner record is gone".to_string()))
			})]
		}
		fn handle(&self, _invocation: Invocation<'_>) -> Result<Payload> {
			Ok(Payload::Value(serde_json::Value::Null))
		}
	}

	let registry = Registry::builder()
		.controller::<Flaky>("flaky")
		.controller::<Echo>("owners")
		.build();
	let dispatcher = Dispatcher::new(registry.into());

	let mut request = ResourceRequest::new(Method::GET, "/7/owners");
	let err = dispatcher.dispatch("flaky", &mut request).unwrap_err();
	assert_eq!(err, Error::NotFound("owner record is gone".to_string()));
}

#[test]
fn test_relation_target_must_be_registered() {
	#[derive(Default)]
	struct Dangling;
	impl Controller for Dangling {
		fn actions(&self) -> ActionSet {
			ActionSet::standard()
		}
		fn relations(&self) -> Vec<Relation> {
			vec![Relation::member("nowhere", |_| Ok(vec![Key::Int(1)]))]
		}
		fn handle(&self, _invocation: Invocation<'_>) -> Result<Payload> {
			Ok(Payload::Value(serde_json::Value::Null))
		}
	}

	let registry = Registry::builder().controller::<Dangling>("dangling").build();
	let dispatcher = Dispatcher::new(registry.into());

	let mut request = ResourceRequest::new(Method::GET, "/7/nowhere/1");
	let err = dispatcher.dispatch("dangling", &mut request).unwrap_err();
	assert!(matches!(err, Error::ServerMisconfiguration(_)), "got {:?}", err);
}

#[test]
fn test_equal_requests_resolve_identically() {
	let first = dispatch(Method::GET, "/44/parts/1").unwrap();
	let second = dispatch(Method::GET, "/44/parts/1").unwrap();
	assert_eq!(first, second);
}
