//! The five concrete feature slices.
//!
//! Each feature is a zero-sized marker implementing [`Feature`], a mode enum
//! whose first variant is the legacy sentinel, and a payload struct. Payloads
//! deserialize with `#[serde(default)]` so a blob written by an older build
//! still decodes.

use crate::feature::{Feature, FeatureMode, StateOf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tabsync_types::FeatureKind;

macro_rules! feature_mode {
    ($(#[$meta:meta])* $name:ident { $legacy:ident => $legacy_str:literal $(, $variant:ident => $str:literal)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $legacy,
            $($variant,)*
        }

        impl FeatureMode for $name {
            const LEGACY: Self = Self::$legacy;
            const ALL: &'static [Self] = &[Self::$legacy $(, Self::$variant)*];

            fn as_str(self) -> &'static str {
                match self {
                    Self::$legacy => $legacy_str,
                    $(Self::$variant => $str,)*
                }
            }
        }
    };
}

// ── Theme builder ────────────────────────────────────────────────

feature_mode! {
    /// Theme builder variant.
    ThemeBuilderMode { Default => "default", Preview => "preview", Published => "published" }
}

/// Design tokens edited in the theme builder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemePayload {
    /// Token name to CSS value, e.g. `color.primary` → `#0a6cff`.
    pub tokens: BTreeMap<String, String>,
    pub font_family: Option<String>,
}

pub struct ThemeBuilder;

impl Feature for ThemeBuilder {
    const KIND: FeatureKind = FeatureKind::ThemeBuilder;
    type Mode = ThemeBuilderMode;
    type Payload = ThemePayload;
}

pub type ThemeBuilderState = StateOf<ThemeBuilder>;

// ── Footer ───────────────────────────────────────────────────────

feature_mode! {
    FooterMode { Default => "default", Custom => "custom" }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterPayload {
    pub columns: Vec<FooterColumn>,
    pub copyright: String,
    pub show_newsletter: bool,
}

pub struct Footer;

impl Feature for Footer {
    const KIND: FeatureKind = FeatureKind::Footer;
    type Mode = FooterMode;
    type Payload = FooterPayload;
}

pub type FooterState = StateOf<Footer>;

// ── Header ───────────────────────────────────────────────────────

feature_mode! {
    HeaderMode { Default => "default", Custom => "custom" }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderPayload {
    /// Layout preset name, e.g. `centered-logo`.
    pub layout: String,
    pub sticky: bool,
    pub show_search: bool,
    pub announcement: Option<String>,
}

pub struct Header;

impl Feature for Header {
    const KIND: FeatureKind = FeatureKind::Header;
    type Mode = HeaderMode;
    type Payload = HeaderPayload;
}

pub type HeaderState = StateOf<Header>;

// ── Product card engine ──────────────────────────────────────────

feature_mode! {
    ProductCardMode { Default => "default", Engine => "engine" }
}

/// One block of a product card (image, title, price, badges, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardBlock {
    pub kind: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductCardPayload {
    pub blocks: Vec<CardBlock>,
    /// Image aspect ratio, e.g. `4:5`.
    pub image_ratio: Option<String>,
}

pub struct ProductCardEngine;

impl Feature for ProductCardEngine {
    const KIND: FeatureKind = FeatureKind::ProductCardEngine;
    type Mode = ProductCardMode;
    type Payload = ProductCardPayload;
}

pub type ProductCardEngineState = StateOf<ProductCardEngine>;

// ── Advanced settings ────────────────────────────────────────────

feature_mode! {
    AdvancedSettingsMode { Default => "default", Override => "override" }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettingsPayload {
    pub flags: BTreeMap<String, bool>,
}

pub struct AdvancedSettings;

impl Feature for AdvancedSettings {
    const KIND: FeatureKind = FeatureKind::AdvancedSettings;
    type Mode = AdvancedSettingsMode;
    type Payload = AdvancedSettingsPayload;
}

pub type AdvancedSettingsState = StateOf<AdvancedSettings>;
