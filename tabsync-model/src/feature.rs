use crate::state::FeatureState;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use tabsync_types::FeatureKind;

/// A feature's variant selector.
///
/// Modes travel as their string name; the codec only accepts names listed in
/// [`FeatureMode::ALL`].
pub trait FeatureMode: Copy + Eq + Debug + Send + Sync + 'static {
    /// The sentinel that always renders the legacy component.
    const LEGACY: Self;

    /// Every mode, legacy first.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.as_str() == s)
    }

    fn is_legacy(self) -> bool {
        self == Self::LEGACY
    }
}

/// Type-level description of one feature slice.
pub trait Feature: Send + Sync + 'static {
    const KIND: FeatureKind;

    type Mode: FeatureMode;

    /// Feature-specific configuration. Opaque to the sync machinery beyond
    /// equality and serialization.
    type Payload: Clone + PartialEq + Debug + Default + Serialize + DeserializeOwned + Send + Sync;

    /// The hard-coded state every process starts from: disabled, legacy
    /// mode, empty allowlist, default payload, clock at zero.
    fn default_state() -> StateOf<Self> {
        FeatureState::new(Self::Mode::LEGACY, Self::Payload::default())
    }
}

/// The state type of feature `F`.
pub type StateOf<F> = FeatureState<<F as Feature>::Mode, <F as Feature>::Payload>;
