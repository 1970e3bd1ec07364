//! Scoped rollout gating.
//!
//! Decides, per route, whether a feature renders its experimental variant or
//! falls back to the legacy one. Every function here is pure and
//! deterministic, so the same decision can be made on first paint and on
//! every later path change.
//!
//! The experimental variant is selected only when all of these hold:
//! - the feature is enabled in its state,
//! - the feature's build flag is on ([`BuildFlags`]),
//! - the feature's mode is not its legacy sentinel,
//! - the route is in scope ([`is_in_scope`]).
//!
//! Any failing condition selects [`RenderVariant::Legacy`].

mod decision;
mod flags;
mod scope;

pub use decision::{Gate, GateDecision, GateInput, GateReason, RenderVariant};
pub use flags::BuildFlags;
pub use scope::{is_in_scope, path_matches, route_path};
