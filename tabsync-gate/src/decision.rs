//! Render-variant selection.

use crate::flags::BuildFlags;
use crate::scope::is_in_scope;
use tabsync_types::{FeatureKind, ScopeMode};

/// Which implementation of a gated surface to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderVariant {
    /// The stable component.
    Legacy,
    /// The component driven by the feature's state.
    Experimental,
}

impl RenderVariant {
    #[must_use]
    pub fn is_experimental(self) -> bool {
        self == Self::Experimental
    }

    /// Runs the renderer matching this variant.
    pub fn pick<T>(self, legacy: impl FnOnce() -> T, experimental: impl FnOnce() -> T) -> T {
        match self {
            Self::Legacy => legacy(),
            Self::Experimental => experimental(),
        }
    }
}

/// Why a gate produced its variant. Conditions are checked in declaration
/// order and the first failing one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateReason {
    FeatureDisabled,
    BuildFlagOff,
    LegacyMode,
    OutOfScope,
    /// Every condition passed.
    Enabled,
}

/// Result of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub variant: RenderVariant,
    pub reason: GateReason,
}

impl GateDecision {
    fn legacy(reason: GateReason) -> Self {
        Self {
            variant: RenderVariant::Legacy,
            reason,
        }
    }
}

/// The slice of feature state a gate looks at.
///
/// `scope_mode` is optional so callers holding unvalidated configuration can
/// pass `None`; a missing mode is never in scope.
#[derive(Debug, Clone, Copy)]
pub struct GateInput<'a> {
    pub kind: FeatureKind,
    pub enabled: bool,
    pub legacy_mode: bool,
    pub scope_mode: Option<ScopeMode>,
    pub scope_paths: &'a [String],
}

/// Evaluates gate inputs against the running build's flags.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    flags: BuildFlags,
}

impl Gate {
    #[must_use]
    pub fn new(flags: BuildFlags) -> Self {
        Self { flags }
    }

    #[must_use]
    pub fn flags(&self) -> &BuildFlags {
        &self.flags
    }

    /// Picks the variant for `input` on the route `location`.
    #[must_use]
    pub fn decide(&self, input: &GateInput<'_>, location: &str) -> GateDecision {
        if !input.enabled {
            return GateDecision::legacy(GateReason::FeatureDisabled);
        }
        if !self.flags.is_enabled(input.kind) {
            return GateDecision::legacy(GateReason::BuildFlagOff);
        }
        if input.legacy_mode {
            return GateDecision::legacy(GateReason::LegacyMode);
        }
        let in_scope = input
            .scope_mode
            .is_some_and(|mode| is_in_scope(location, mode, input.scope_paths));
        if !in_scope {
            return GateDecision::legacy(GateReason::OutOfScope);
        }
        GateDecision {
            variant: RenderVariant::Experimental,
            reason: GateReason::Enabled,
        }
    }

    /// Shorthand for `decide(..).variant`.
    #[must_use]
    pub fn variant(&self, input: &GateInput<'_>, location: &str) -> RenderVariant {
        self.decide(input, location).variant
    }
}
