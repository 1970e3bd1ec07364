//! Merges the editable menu with the live category tree.

use crate::model::{CategoryTreeNode, MenuItem, MenuItemKind};
use std::collections::HashMap;
use tracing::trace;

/// Deepest menu level that is resolved. Levels at or below this depth
/// (counting the top level as 0) come out empty.
pub const MAX_DEPTH: usize = 20;

/// Prefix of menu item ids that name their category directly, e.g.
/// `category-5`.
pub const CATEGORY_ID_PREFIX: &str = "category-";

/// Flat lookup of every category in a forest, by id.
///
/// Built in pre-order; if an id appears twice the first occurrence wins.
#[derive(Debug, Default)]
pub struct CategoryIndex<'a> {
    by_id: HashMap<&'a str, &'a CategoryTreeNode>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(forest: &'a [CategoryTreeNode]) -> Self {
        let mut by_id = HashMap::new();
        let mut stack: Vec<&CategoryTreeNode> = forest.iter().rev().collect();
        while let Some(node) = stack.pop() {
            by_id.entry(node.id.as_str()).or_insert(node);
            stack.extend(node.children.iter().rev());
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a CategoryTreeNode> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Produces the rendered menu from the configured `items` and the live
/// category `tree`. Inputs are left untouched and ordering is preserved.
///
/// - disabled items are dropped with their subtree
/// - link items keep their fields and resolve their own children
/// - category items take title, href and icon from the live category and
///   are dropped if it is missing or inactive
/// - `include_children` replaces the item's children with the category's
///   active subtree
pub fn resolve(items: &[MenuItem], tree: &[CategoryTreeNode]) -> Vec<MenuItem> {
    let index = CategoryIndex::new(tree);
    resolve_level(items, &index, 0)
}

fn resolve_level(items: &[MenuItem], index: &CategoryIndex<'_>, depth: usize) -> Vec<MenuItem> {
    if depth >= MAX_DEPTH {
        return Vec::new();
    }
    items
        .iter()
        .filter_map(|item| resolve_item(item, index, depth))
        .collect()
}

fn resolve_item(item: &MenuItem, index: &CategoryIndex<'_>, depth: usize) -> Option<MenuItem> {
    if !item.enabled {
        return None;
    }
    match item.kind {
        MenuItemKind::Link => Some(MenuItem {
            id: item.id.clone(),
            kind: MenuItemKind::Link,
            title: item.title.clone(),
            href: item.href.clone(),
            category_id: item.category_id.clone(),
            icon: item.icon.clone(),
            enabled: true,
            include_children: item.include_children,
            children: resolve_level(&item.children, index, depth + 1),
        }),
        MenuItemKind::Category => {
            let Some(node) = target_category(item).and_then(|id| index.get(id)) else {
                trace!(item = %item.id, "category not found, dropping item");
                return None;
            };
            if !node.is_active {
                trace!(item = %item.id, category = %node.id, "category inactive, dropping item");
                return None;
            }
            let children = if item.include_children {
                category_children(&node.children, depth + 1)
            } else {
                resolve_level(&item.children, index, depth + 1)
            };
            let icon = match item.icon.as_deref() {
                Some(icon) if !icon.is_empty() => Some(icon.to_string()),
                _ => node.icon.clone(),
            };
            let title = match node.label() {
                "" => item.title.clone(),
                label => label.to_string(),
            };
            Some(MenuItem {
                id: item.id.clone(),
                kind: MenuItemKind::Category,
                title,
                href: Some(node.href()),
                category_id: Some(node.id.clone()),
                icon,
                enabled: true,
                include_children: item.include_children,
                children,
            })
        }
    }
}

/// The category an item refers to: `category_id`, else the id after
/// [`CATEGORY_ID_PREFIX`].
fn target_category(item: &MenuItem) -> Option<&str> {
    match item.category_id.as_deref() {
        Some(id) if !id.is_empty() => Some(id),
        _ => item
            .id
            .strip_prefix(CATEGORY_ID_PREFIX)
            .filter(|id| !id.is_empty()),
    }
}

fn category_children(nodes: &[CategoryTreeNode], depth: usize) -> Vec<MenuItem> {
    if depth >= MAX_DEPTH {
        return Vec::new();
    }
    nodes
        .iter()
        .filter(|node| node.is_active)
        .map(|node| MenuItem {
            id: format!("{CATEGORY_ID_PREFIX}{}", node.id),
            kind: MenuItemKind::Category,
            title: node.label().to_string(),
            href: Some(node.href()),
            category_id: Some(node.id.clone()),
            icon: node.icon.clone(),
            enabled: true,
            include_children: true,
            children: category_children(&node.children, depth + 1),
        })
        .collect()
}
