use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The independently toggleable pieces of UI configuration.
///
/// Each kind owns exactly one storage key and one broadcast channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureKind {
    ThemeBuilder,
    Footer,
    Header,
    ProductCardEngine,
    AdvancedSettings,
}

impl FeatureKind {
    /// Every feature, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ThemeBuilder,
        Self::Footer,
        Self::Header,
        Self::ProductCardEngine,
        Self::AdvancedSettings,
    ];

    /// The stable kebab-case name used in keys and channel names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThemeBuilder => "theme-builder",
            Self::Footer => "footer",
            Self::Header => "header",
            Self::ProductCardEngine => "product-card-engine",
            Self::AdvancedSettings => "advanced-settings",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}
