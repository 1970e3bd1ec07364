//! Defensive parsing of menu and category payloads.
//!
//! Endpoint responses are untrusted. Every item and category is validated on
//! its own; an entry that fails a required check is dropped along with its
//! subtree, while a bad optional field falls back to its default. Nesting
//! deeper than [`MAX_DEPTH`] is cut off.

use crate::model::{CategoryTreeNode, MenuItem, MenuItemKind, MobileMenuConfig};
use crate::resolve::MAX_DEPTH;
use serde_json::{Map, Value};
use tabsync_types::validate;
use tracing::debug;

const MOBILE_MENU: &str = "mobileMenu";
const CATEGORIES: &str = "categories";

/// Parses a mobile menu response.
///
/// Accepts the endpoint envelope `{ "mobileMenu": { ... } }` or the bare
/// config object. Anything else yields a disabled, empty menu.
pub fn normalize_mobile_menu(value: &Value) -> MobileMenuConfig {
    let obj = match value.get(MOBILE_MENU) {
        Some(inner) => inner.as_object(),
        None => value.as_object(),
    };
    let Some(obj) = obj else {
        debug!("mobile menu response is not an object");
        return MobileMenuConfig::default();
    };

    MobileMenuConfig {
        enabled: validate::boolean(obj.get("enabled")).or(false),
        items: menu_items(obj.get("items"), 0),
    }
}

/// Parses a list of menu items. Non-array input yields no items.
pub fn menu_items(value: Option<&Value>, depth: usize) -> Vec<MenuItem> {
    if depth >= MAX_DEPTH {
        return Vec::new();
    }
    validate::array(value)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| menu_item(item, depth))
                .collect()
        })
        .or_else(Vec::new)
}

fn menu_item(value: &Value, depth: usize) -> Option<MenuItem> {
    let obj = value.as_object()?;
    let Some(kind) = validate::enum_member(obj.get("type"), MenuItemKind::parse).into_option()
    else {
        debug!("dropping menu item with unknown type");
        return None;
    };
    let Some(id) = validate::identifier(obj.get("id")).into_option() else {
        debug!("dropping menu item without id");
        return None;
    };

    Some(MenuItem {
        id,
        kind,
        title: validate::string(obj.get("title")).or_else(String::new),
        href: text(obj, "href"),
        category_id: validate::identifier(obj.get("categoryId")).into_option(),
        icon: text(obj, "icon"),
        enabled: validate::boolean(obj.get("enabled")).or(true),
        include_children: validate::boolean(obj.get("includeChildren")).or(false),
        children: menu_items(obj.get("children"), depth + 1),
    })
}

/// Parses a category forest: a bare array or `{ "categories": [...] }`.
pub fn category_forest(value: &Value) -> Vec<CategoryTreeNode> {
    let list = match value {
        Value::Object(obj) => obj.get(CATEGORIES),
        other => Some(other),
    };
    categories(list, 0)
}

fn categories(value: Option<&Value>, depth: usize) -> Vec<CategoryTreeNode> {
    if depth >= MAX_DEPTH {
        return Vec::new();
    }
    validate::array(value)
        .map(|nodes| {
            nodes
                .iter()
                .filter_map(|node| category(node, depth))
                .collect()
        })
        .or_else(Vec::new)
}

fn category(value: &Value, depth: usize) -> Option<CategoryTreeNode> {
    let obj = value.as_object()?;
    let Some(id) = validate::identifier(obj.get("id")).into_option() else {
        debug!("dropping category without id");
        return None;
    };

    Some(CategoryTreeNode {
        id,
        name: validate::string(obj.get("name")).or_else(String::new),
        menu_label: text(obj, "menuLabel"),
        slug: validate::string(obj.get("slug")).or_else(String::new),
        icon: text(obj, "icon"),
        // Unknown activity never shows a category.
        is_active: validate::boolean(obj.get("isActive")).or(false),
        children: categories(obj.get("children"), depth + 1),
    })
}

/// An optional string field; null, missing and non-string all map to `None`.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    validate::optional_string(obj.get(key)).into_option().flatten()
}
