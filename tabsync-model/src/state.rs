use crate::feature::FeatureMode;
use tabsync_gate::GateInput;
use tabsync_types::{FeatureKind, ScopeMode, UpdatedAt};

/// The replicated state of one feature.
///
/// The whole value is the unit of replication: conflicts are settled by
/// comparing `updated_at` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureState<M, P> {
    /// Master switch for the experimental path.
    pub enabled: bool,
    pub mode: M,
    pub scope_mode: ScopeMode,
    pub scope_paths: Vec<String>,
    pub payload: P,
    /// Element currently selected in the editor.
    pub active_id: Option<String>,
    /// True while the payload has edits that were not saved.
    pub dirty: bool,
    pub updated_at: UpdatedAt,
    /// Prior payloads, oldest first.
    pub history: Vec<P>,
    /// Undone payloads, most recently undone last.
    pub future: Vec<P>,
}

impl<M: FeatureMode, P: PartialEq> FeatureState<M, P> {
    /// A disabled state with an empty allowlist and a zero clock.
    pub fn new(mode: M, payload: P) -> Self {
        Self {
            enabled: false,
            mode,
            scope_mode: ScopeMode::Allowlist,
            scope_paths: Vec::new(),
            payload,
            active_id: None,
            dirty: false,
            updated_at: UpdatedAt::ZERO,
            history: Vec::new(),
            future: Vec::new(),
        }
    }

    /// Compares everything a user could observe, ignoring the clock and the
    /// undo stacks. Two materially equal states render identically.
    pub fn materially_eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled
            && self.mode == other.mode
            && self.scope_mode == other.scope_mode
            && self.scope_paths == other.scope_paths
            && self.active_id == other.active_id
            && self.dirty == other.dirty
            && self.payload == other.payload
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// The fields a route gate reads.
    pub fn gate_input(&self, kind: FeatureKind) -> GateInput<'_> {
        GateInput {
            kind,
            enabled: self.enabled,
            legacy_mode: self.mode.is_legacy(),
            scope_mode: Some(self.scope_mode),
            scope_paths: &self.scope_paths,
        }
    }
}
