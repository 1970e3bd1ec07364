//! Durable feature-state codec.
//!
//! The wire form is a flat JSON object with camelCase keys:
//!
//! ```json
//! {
//!   "enabled": true,
//!   "mode": "preview",
//!   "scopeMode": "allowlist",
//!   "scopePaths": ["/shop"],
//!   "payload": { "tokens": { "color.primary": "#0a6cff" } },
//!   "activeId": null,
//!   "dirty": false,
//!   "updatedAt": 1700000000000,
//!   "history": [],
//!   "future": []
//! }
//! ```
//!
//! Decoding never fails loudly. Input that is not a JSON object decodes to
//! `None`; inside an object every field is validated on its own and dropped
//! from the [`PartialState`] if it fails.

use crate::error::StorageResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tabsync_model::{FeatureMode, FeatureState};
use tabsync_types::validate::{self, Field};
use tabsync_types::{ScopeMode, UpdatedAt};
use tracing::debug;

const ENABLED: &str = "enabled";
const MODE: &str = "mode";
const SCOPE_MODE: &str = "scopeMode";
const SCOPE_PATHS: &str = "scopePaths";
const PAYLOAD: &str = "payload";
const ACTIVE_ID: &str = "activeId";
const DIRTY: &str = "dirty";
const UPDATED_AT: &str = "updatedAt";
const HISTORY: &str = "history";
const FUTURE: &str = "future";

/// A feature state with every field optional.
///
/// Produced by decoding untrusted input; `None` means the field was missing
/// or invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialState<M, P> {
    pub enabled: Option<bool>,
    pub mode: Option<M>,
    pub scope_mode: Option<ScopeMode>,
    pub scope_paths: Option<Vec<String>>,
    pub payload: Option<P>,
    pub active_id: Option<Option<String>>,
    pub dirty: Option<bool>,
    pub updated_at: Option<UpdatedAt>,
    pub history: Option<Vec<P>>,
    pub future: Option<Vec<P>>,
}

impl<M, P> Default for PartialState<M, P> {
    fn default() -> Self {
        Self {
            enabled: None,
            mode: None,
            scope_mode: None,
            scope_paths: None,
            payload: None,
            active_id: None,
            dirty: None,
            updated_at: None,
            history: None,
            future: None,
        }
    }
}

impl<M, P> PartialState<M, P> {
    /// Fills every missing field from `base`.
    pub fn merge_over(self, base: FeatureState<M, P>) -> FeatureState<M, P> {
        FeatureState {
            enabled: self.enabled.unwrap_or(base.enabled),
            mode: self.mode.unwrap_or(base.mode),
            scope_mode: self.scope_mode.unwrap_or(base.scope_mode),
            scope_paths: self.scope_paths.unwrap_or(base.scope_paths),
            payload: self.payload.unwrap_or(base.payload),
            active_id: self.active_id.unwrap_or(base.active_id),
            dirty: self.dirty.unwrap_or(base.dirty),
            updated_at: self.updated_at.unwrap_or(base.updated_at),
            history: self.history.unwrap_or(base.history),
            future: self.future.unwrap_or(base.future),
        }
    }

    /// True if no field survived validation.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.mode.is_none()
            && self.scope_mode.is_none()
            && self.scope_paths.is_none()
            && self.payload.is_none()
            && self.active_id.is_none()
            && self.dirty.is_none()
            && self.updated_at.is_none()
            && self.history.is_none()
            && self.future.is_none()
    }
}

/// Builds the wire object for `state`.
pub fn to_value<M: FeatureMode, P: Serialize>(state: &FeatureState<M, P>) -> StorageResult<Value> {
    let mut obj = Map::new();
    obj.insert(ENABLED.into(), Value::Bool(state.enabled));
    obj.insert(MODE.into(), Value::String(state.mode.as_str().into()));
    obj.insert(SCOPE_MODE.into(), Value::String(state.scope_mode.as_str().into()));
    obj.insert(SCOPE_PATHS.into(), serde_json::to_value(&state.scope_paths)?);
    obj.insert(PAYLOAD.into(), serde_json::to_value(&state.payload)?);
    obj.insert(
        ACTIVE_ID.into(),
        state
            .active_id
            .as_ref()
            .map_or(Value::Null, |id| Value::String(id.clone())),
    );
    obj.insert(DIRTY.into(), Value::Bool(state.dirty));
    obj.insert(UPDATED_AT.into(), Value::from(state.updated_at.as_millis()));
    obj.insert(HISTORY.into(), serde_json::to_value(&state.history)?);
    obj.insert(FUTURE.into(), serde_json::to_value(&state.future)?);
    Ok(Value::Object(obj))
}

/// Encodes `state` to the persisted string form.
pub fn encode<M: FeatureMode, P: Serialize>(state: &FeatureState<M, P>) -> StorageResult<String> {
    Ok(to_value(state)?.to_string())
}

/// Decodes a persisted blob. Missing, unparsable or non-object input yields
/// `None`.
pub fn decode<M: FeatureMode, P: DeserializeOwned>(raw: Option<&str>) -> Option<PartialState<M, P>> {
    let raw = raw?;
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode_value(&value),
        Err(e) => {
            debug!("discarding unparsable state blob: {e}");
            None
        }
    }
}

/// Decodes an already-parsed value, e.g. a broadcast message body.
pub fn decode_value<M: FeatureMode, P: DeserializeOwned>(value: &Value) -> Option<PartialState<M, P>> {
    let Some(obj) = value.as_object() else {
        debug!("discarding non-object state value");
        return None;
    };

    Some(PartialState {
        enabled: validate::boolean(obj.get(ENABLED)).into_option(),
        mode: validate::enum_member(obj.get(MODE), M::parse).into_option(),
        scope_mode: validate::scope_mode(obj.get(SCOPE_MODE)).into_option(),
        scope_paths: validate::string_list(obj.get(SCOPE_PATHS)).into_option(),
        payload: opaque(obj.get(PAYLOAD)).into_option(),
        active_id: validate::optional_string(obj.get(ACTIVE_ID)).into_option(),
        dirty: validate::boolean(obj.get(DIRTY)).into_option(),
        updated_at: validate::timestamp(obj.get(UPDATED_AT)).into_option(),
        history: snapshots(obj.get(HISTORY)).into_option(),
        future: snapshots(obj.get(FUTURE)).into_option(),
    })
}

/// A payload: any container, then trusted to deserialize as `P`.
fn opaque<P: DeserializeOwned>(value: Option<&Value>) -> Field<P> {
    match validate::container(value) {
        Field::Valid(v) => P::deserialize(v).ok().into(),
        Field::UseDefault => Field::UseDefault,
    }
}

/// A snapshot stack: an array, then trusted to deserialize as `Vec<P>`.
fn snapshots<P: DeserializeOwned>(value: Option<&Value>) -> Field<Vec<P>> {
    match validate::array(value) {
        Field::Valid(items) => items
            .iter()
            .map(P::deserialize)
            .collect::<Result<Vec<P>, _>>()
            .ok()
            .into(),
        Field::UseDefault => Field::UseDefault,
    }
}
