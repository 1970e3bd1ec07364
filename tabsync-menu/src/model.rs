//! Menu and category types.

use serde::{Deserialize, Serialize};

/// What a menu item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemKind {
    /// A reference into the category tree.
    Category,
    /// A static link.
    Link,
}

impl MenuItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Link => "link",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "category" => Some(Self::Category),
            "link" => Some(Self::Link),
            _ => None,
        }
    }
}

/// One node of the editable mobile menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MenuItemKind,
    pub title: String,
    pub href: Option<String>,
    /// Target category for `category` items. When absent the id is derived
    /// from a `category-` prefixed item id.
    pub category_id: Option<String>,
    pub icon: Option<String>,
    pub enabled: bool,
    /// For `category` items: take children from the live category subtree
    /// instead of `children`.
    pub include_children: bool,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// An enabled link with no children.
    pub fn link(id: impl Into<String>, title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MenuItemKind::Link,
            title: title.into(),
            href: Some(href.into()),
            category_id: None,
            icon: None,
            enabled: true,
            include_children: false,
            children: Vec::new(),
        }
    }

    /// An enabled category reference with no children.
    pub fn category(id: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MenuItemKind::Category,
            title: String::new(),
            href: None,
            category_id: Some(category_id.into()),
            icon: None,
            enabled: true,
            include_children: false,
            children: Vec::new(),
        }
    }
}

/// One node of the live category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    pub id: String,
    pub name: String,
    pub menu_label: Option<String>,
    pub slug: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub children: Vec<CategoryTreeNode>,
}

impl CategoryTreeNode {
    /// An active leaf category.
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            menu_label: None,
            slug: slug.into(),
            icon: None,
            is_active: true,
            children: Vec::new(),
        }
    }

    /// The label shown in menus: the menu label if set, else the name.
    pub fn label(&self) -> &str {
        match self.menu_label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => &self.name,
        }
    }

    /// The storefront route for this category.
    pub fn href(&self) -> String {
        if self.slug.is_empty() {
            format!("/category/{}", self.id)
        } else {
            format!("/category/{}", self.slug)
        }
    }
}

/// The mobile menu as configured by the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileMenuConfig {
    pub enabled: bool,
    pub items: Vec<MenuItem>,
}
