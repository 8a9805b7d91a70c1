//! The per-session status cache.
//!
//! Most replies from the game server carry a `status` object alongside the
//! result: a partial snapshot of server-side state keyed by module name.
//!
//! ```text
//! "status": {
//!     "empire": { "id": "42542", "name": "Antaria", "essentia": 0.8, ... },
//!     "body":   { "id": "1234", "name": "Earth", "water_hour": ... }
//! }
//! ```
//!
//! [`StatusCache`] keeps the latest view of every module it has seen, so
//! entities read their fields from memory instead of asking the server
//! again.
//!
//! # Merge policy
//!
//! Per-module shallow overlay:
//!
//! - Modules absent from an incoming snapshot are left untouched.
//! - For a module present in both, the incoming keys overwrite the cached
//!   ones and every other cached key is kept. A `set_status_message` reply
//!   that only refreshes part of `empire` doesn't erase the rest.
//! - If both the cached and incoming fragment carry an `id` and the ids
//!   differ, the incoming fragment describes a different entity and
//!   replaces the cached one wholesale.
//! - A module seen for the first time, or whose cached or incoming value is
//!   not an object, is stored as-is.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A module's status fragment: field name → value.
pub type Fragment = Map<String, Value>;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// The identifier of one entity within a module (a body id, a building
/// id).
///
/// The server sends ids as strings in some places and numbers in others,
/// so comparisons go through the textual form: `EntityId::from(42)`
/// matches both `"42"` and `42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Creates an id from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Reads an id from a JSON value. Only strings and integers qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Returns `true` if `value` denotes this id.
    pub fn matches(&self, value: &Value) -> bool {
        Self::from_value(value).is_some_and(|other| other == *self)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as an RPC param.
    pub fn to_param(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// StatusCache
// ---------------------------------------------------------------------------

/// Latest known status fragment per module.
///
/// Owned by exactly one [`Session`](crate::Session), which merges every
/// `status` object it receives. Everything else gets `&StatusCache`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusCache {
    modules: BTreeMap<String, Value>,
}

impl StatusCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a whole `status` snapshot (module name → fragment).
    pub fn merge(&mut self, snapshot: &Fragment) {
        for (module, fragment) in snapshot {
            self.merge_module(module, fragment.clone());
        }
    }

    /// Merges one module's fragment according to the overlay policy
    /// described in the module docs.
    pub fn merge_module(&mut self, module: &str, fragment: Value) {
        let Some(cached) = self.modules.get_mut(module) else {
            self.modules.insert(module.to_string(), fragment);
            return;
        };

        match (cached, fragment) {
            (Value::Object(old), Value::Object(new)) => {
                if ids_conflict(old, &new) {
                    tracing::trace!(module, "status fragment for another entity, replacing");
                    *old = new;
                } else {
                    old.extend(new);
                }
            }
            (cached, fragment) => *cached = fragment,
        }
    }

    /// The raw cached value for a module.
    pub fn get(&self, module: &str) -> Option<&Value> {
        self.modules.get(module)
    }

    /// The cached fragment for a module, if it is an object.
    pub fn fragment(&self, module: &str) -> Option<&Fragment> {
        self.modules.get(module)?.as_object()
    }

    /// The cached fragment for a module, trusted only if it belongs to the
    /// expected entity.
    ///
    /// With `expected == None` any fragment is returned. Otherwise the
    /// fragment's own `id` must be present and match; a fragment for some
    /// other entity (or with no id at all) yields `None` so the caller
    /// refreshes from the server.
    pub fn fragment_for(
        &self,
        module: &str,
        expected: Option<&EntityId>,
    ) -> Option<&Fragment> {
        let fragment = self.fragment(module)?;
        match expected {
            None => Some(fragment),
            Some(id) => fragment
                .get("id")
                .is_some_and(|v| id.matches(v))
                .then_some(fragment),
        }
    }

    /// A single field of a module's cached fragment.
    pub fn field(&self, module: &str, field: &str) -> Option<&Value> {
        self.fragment(module)?.get(field)
    }

    /// Returns `true` if anything is cached for the module.
    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Drops a module's cached fragment, returning it.
    pub fn remove(&mut self, module: &str) -> Option<Value> {
        self.modules.remove(module)
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.modules.clear();
    }

    /// Names of all cached modules, in sorted order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Number of cached modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn ids_conflict(old: &Fragment, new: &Fragment) -> bool {
    match (old.get("id"), new.get("id")) {
        (Some(a), Some(b)) => match EntityId::from_value(a) {
            Some(id) => !id.matches(b),
            None => a != b,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> Fragment {
        value.as_object().cloned().expect("test snapshot must be an object")
    }

    // =====================================================================
    // merge()
    // =====================================================================

    #[test]
    fn test_merge_same_module_overlays_keys() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"empire": {"name": "X"}})));
        cache.merge(&snapshot(json!({"empire": {"id": "1"}})));

        assert_eq!(cache.get("empire"), Some(&json!({"name": "X", "id": "1"})));
    }

    #[test]
    fn test_merge_newer_value_wins_for_same_key() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"empire": {"status_message": "old", "essentia": 1}})));
        cache.merge(&snapshot(json!({"empire": {"status_message": "new"}})));

        assert_eq!(cache.field("empire", "status_message"), Some(&json!("new")));
        assert_eq!(cache.field("empire", "essentia"), Some(&json!(1)));
    }

    #[test]
    fn test_merge_different_modules_keeps_both() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"empire": {"name": "X"}})));
        cache.merge(&snapshot(json!({"body": {"id": "7", "size": 45}})));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.field("empire", "name"), Some(&json!("X")));
        assert_eq!(cache.field("body", "size"), Some(&json!(45)));
    }

    #[test]
    fn test_merge_is_shallow_within_a_module() {
        // Nested objects below the module level are replaced, not merged.
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"empire": {"planets": {"1": "Earth", "2": "Mars"}}})));
        cache.merge(&snapshot(json!({"empire": {"planets": {"3": "Venus"}}})));

        assert_eq!(cache.field("empire", "planets"), Some(&json!({"3": "Venus"})));
    }

    #[test]
    fn test_merge_different_entity_id_replaces_fragment() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"body": {"id": "1", "name": "Earth", "orbit": 3}})));
        cache.merge(&snapshot(json!({"body": {"id": "2", "name": "Mars"}})));

        assert_eq!(cache.get("body"), Some(&json!({"id": "2", "name": "Mars"})));
    }

    #[test]
    fn test_merge_fragment_without_id_overlays_onto_identified_entry() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"body": {"id": "1", "orbit": 3}})));
        cache.merge(&snapshot(json!({"body": {"size": 40}})));

        assert_eq!(cache.get("body"), Some(&json!({"id": "1", "orbit": 3, "size": 40})));
    }

    #[test]
    fn test_merge_same_id_in_other_form_still_overlays() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"body": {"id": "1", "orbit": 3}})));
        cache.merge(&snapshot(json!({"body": {"id": 1, "size": 40}})));

        assert_eq!(cache.field("body", "orbit"), Some(&json!(3)));
        assert_eq!(cache.field("body", "size"), Some(&json!(40)));
    }

    #[test]
    fn test_merge_non_object_fragment_is_stored_as_is() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"server": {"time": "t1"}})));
        cache.merge(&snapshot(json!({"server": null})));

        assert_eq!(cache.get("server"), Some(&Value::Null));
        assert!(cache.fragment("server").is_none());
    }

    // =====================================================================
    // fragment_for()
    // =====================================================================

    #[test]
    fn test_fragment_for_without_expected_id_returns_fragment() {
        let mut cache = StatusCache::new();
        cache.merge_module("empire", json!({"name": "X"}));

        assert!(cache.fragment_for("empire", None).is_some());
    }

    #[test]
    fn test_fragment_for_matching_id_returns_fragment() {
        let mut cache = StatusCache::new();
        cache.merge_module("body", json!({"id": 1234, "name": "Earth"}));

        let fragment = cache.fragment_for("body", Some(&EntityId::from(1234)));
        assert_eq!(fragment.and_then(|f| f.get("name")), Some(&json!("Earth")));
    }

    #[test]
    fn test_fragment_for_mismatched_id_returns_none() {
        let mut cache = StatusCache::new();
        cache.merge_module("body", json!({"id": "1234"}));

        assert!(cache.fragment_for("body", Some(&EntityId::from("99"))).is_none());
    }

    #[test]
    fn test_fragment_for_missing_id_field_returns_none() {
        let mut cache = StatusCache::new();
        cache.merge_module("body", json!({"name": "Earth"}));

        assert!(cache.fragment_for("body", Some(&EntityId::from("1"))).is_none());
    }

    #[test]
    fn test_fragment_for_unknown_module_returns_none() {
        let cache = StatusCache::new();
        assert!(cache.fragment_for("body", None).is_none());
    }

    // =====================================================================
    // EntityId
    // =====================================================================

    #[test]
    fn test_entity_id_matches_string_and_number() {
        let id = EntityId::from(42);
        assert!(id.matches(&json!("42")));
        assert!(id.matches(&json!(42)));
        assert!(!id.matches(&json!(43)));
        assert!(!id.matches(&json!(42.5)));
        assert!(!id.matches(&Value::Null));
    }

    #[test]
    fn test_entity_id_from_value_rejects_empty_and_structured() {
        assert_eq!(EntityId::from_value(&json!("")), None);
        assert_eq!(EntityId::from_value(&json!({"id": 1})), None);
        assert_eq!(EntityId::from_value(&json!("7")), Some(EntityId::from("7")));
    }

    #[test]
    fn test_entity_id_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&EntityId::from(5)).unwrap(), "\"5\"");
        assert_eq!(EntityId::from(5).to_param(), json!("5"));
    }

    // =====================================================================
    // housekeeping
    // =====================================================================

    #[test]
    fn test_remove_and_clear() {
        let mut cache = StatusCache::new();
        cache.merge(&snapshot(json!({"empire": {}, "body": {}})));
        assert_eq!(cache.modules().collect::<Vec<_>>(), vec!["body", "empire"]);

        assert!(cache.remove("body").is_some());
        assert!(!cache.contains("body"));

        cache.clear();
        assert!(cache.is_empty());
    }
}
