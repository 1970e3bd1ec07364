use pretty_assertions::assert_eq;
use tabsync_menu::{
    resolve, CategoryIndex, CategoryTreeNode, MenuItem, MenuItemKind, MAX_DEPTH,
};

fn shoes_tree() -> Vec<CategoryTreeNode> {
    let mut sneakers = CategoryTreeNode::new("6", "Sneakers", "sneakers");
    sneakers.children = vec![CategoryTreeNode::new("9", "Running", "running")];
    let mut boots = CategoryTreeNode::new("7", "Boots", "boots");
    boots.is_active = false;
    let mut shoes = CategoryTreeNode::new("5", "Shoes", "shoes");
    shoes.children = vec![sneakers, boots];
    vec![shoes, CategoryTreeNode::new("8", "Bags", "bags")]
}

fn titles(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|item| item.title.as_str()).collect()
}

fn nested_links(levels: usize) -> MenuItem {
    let mut item = MenuItem::link(format!("l{levels}"), "leaf", "/leaf");
    for level in (0..levels - 1).rev() {
        let mut parent = MenuItem::link(format!("l{level}"), "level", "/level");
        parent.children = vec![item];
        item = parent;
    }
    item
}

fn depth_of(items: &[MenuItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + depth_of(&item.children))
        .max()
        .unwrap_or(0)
}

// ── Category items ───────────────────────────────────────────────

#[test]
fn category_item_takes_live_fields() {
    let items = vec![MenuItem::category("m1", "5")];
    let out = resolve(&items, &shoes_tree());

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "m1");
    assert_eq!(out[0].kind, MenuItemKind::Category);
    assert_eq!(out[0].title, "Shoes");
    assert_eq!(out[0].href.as_deref(), Some("/category/shoes"));
    assert_eq!(out[0].category_id.as_deref(), Some("5"));
    assert!(out[0].children.is_empty());
}

#[test]
fn include_children_replaces_manual_children_with_live_subtree() {
    let mut item = MenuItem::category("m1", "5");
    item.include_children = true;
    item.children = vec![MenuItem::link("manual", "Manual", "/manual")];

    let out = resolve(&[item], &shoes_tree());
    let children = &out[0].children;

    // Boots is inactive, so only Sneakers remains.
    assert_eq!(titles(children), vec!["Sneakers"]);
    assert_eq!(children[0].id, "category-6");
    assert_eq!(children[0].href.as_deref(), Some("/category/sneakers"));
    assert_eq!(titles(&children[0].children), vec!["Running"]);
}

#[test]
fn without_include_children_manual_children_are_resolved() {
    let mut item = MenuItem::category("m1", "5");
    let mut hidden = MenuItem::link("hidden", "Hidden", "/hidden");
    hidden.enabled = false;
    item.children = vec![
        MenuItem::link("sale", "Sale", "/sale"),
        hidden,
        MenuItem::category("bags", "8"),
    ];

    let out = resolve(&[item], &shoes_tree());
    assert_eq!(titles(&out[0].children), vec!["Sale", "Bags"]);
}

#[test]
fn nested_category_is_found_anywhere_in_the_tree() {
    let out = resolve(&[MenuItem::category("m", "9")], &shoes_tree());
    assert_eq!(titles(&out), vec!["Running"]);
}

#[test]
fn inactive_category_is_dropped() {
    let out = resolve(&[MenuItem::category("m", "7")], &shoes_tree());
    assert!(out.is_empty());
}

#[test]
fn missing_category_is_dropped() {
    let out = resolve(&[MenuItem::category("m", "404")], &shoes_tree());
    assert!(out.is_empty());
}

#[test]
fn category_id_is_derived_from_prefixed_item_id() {
    let mut item = MenuItem::category("category-8", "");
    item.category_id = None;
    let out = resolve(&[item], &shoes_tree());
    assert_eq!(titles(&out), vec!["Bags"]);

    let mut bare = MenuItem::category("8", "");
    bare.category_id = None;
    assert!(resolve(&[bare], &shoes_tree()).is_empty());
}

#[test]
fn menu_label_wins_over_name() {
    let mut tree = shoes_tree();
    tree[0].menu_label = Some("All shoes".into());
    let out = resolve(&[MenuItem::category("m", "5")], &tree);
    assert_eq!(out[0].title, "All shoes");

    tree[0].menu_label = Some("   ".into());
    let out = resolve(&[MenuItem::category("m", "5")], &tree);
    assert_eq!(out[0].title, "Shoes");
}

#[test]
fn item_icon_overrides_only_when_non_empty() {
    let mut tree = shoes_tree();
    tree[0].icon = Some("shoe".into());

    let mut item = MenuItem::category("m", "5");
    let out = resolve(std::slice::from_ref(&item), &tree);
    assert_eq!(out[0].icon.as_deref(), Some("shoe"));

    item.icon = Some(String::new());
    let out = resolve(std::slice::from_ref(&item), &tree);
    assert_eq!(out[0].icon.as_deref(), Some("shoe"));

    item.icon = Some("star".into());
    let out = resolve(&[item], &tree);
    assert_eq!(out[0].icon.as_deref(), Some("star"));
}

#[test]
fn empty_slug_falls_back_to_id_in_href() {
    let tree = vec![CategoryTreeNode::new("42", "Misc", "")];
    let out = resolve(&[MenuItem::category("m", "42")], &tree);
    assert_eq!(out[0].href.as_deref(), Some("/category/42"));
}

// ── Links and ordering ───────────────────────────────────────────

#[test]
fn links_pass_through_in_order() {
    let items = vec![
        MenuItem::link("a", "Home", "/"),
        MenuItem::category("b", "8"),
        MenuItem::link("c", "Contact", "/contact"),
    ];
    let out = resolve(&items, &shoes_tree());
    assert_eq!(titles(&out), vec!["Home", "Bags", "Contact"]);
    assert_eq!(out[0], items[0]);
}

#[test]
fn disabled_item_drops_its_subtree() {
    let mut parent = MenuItem::link("p", "Parent", "/p");
    parent.enabled = false;
    parent.children = vec![MenuItem::link("c", "Child", "/c")];
    assert!(resolve(&[parent], &[]).is_empty());
}

#[test]
fn inputs_are_not_mutated() {
    let mut item = MenuItem::category("m1", "5");
    item.include_children = true;
    let items = vec![item, MenuItem::link("x", "X", "/x")];
    let tree = shoes_tree();
    let (items_before, tree_before) = (items.clone(), tree.clone());

    let _ = resolve(&items, &tree);
    assert_eq!(items, items_before);
    assert_eq!(tree, tree_before);
}

// ── Depth cap ────────────────────────────────────────────────────

#[test]
fn deep_menu_is_truncated() {
    let deep = nested_links(25);
    assert_eq!(depth_of(std::slice::from_ref(&deep)), 25);

    let out = resolve(&[deep], &[]);
    assert_eq!(depth_of(&out), MAX_DEPTH);
}

#[test]
fn deep_category_subtree_is_truncated() {
    let mut node = CategoryTreeNode::new("c24", "leaf", "leaf");
    for level in (0..24).rev() {
        let mut parent = CategoryTreeNode::new(format!("c{level}"), "level", "level");
        parent.children = vec![node];
        node = parent;
    }
    let mut item = MenuItem::category("m", "c0");
    item.include_children = true;

    let out = resolve(&[item], &[node]);
    assert_eq!(depth_of(&out), MAX_DEPTH);
}

// ── Index ────────────────────────────────────────────────────────

#[test]
fn index_covers_every_node() {
    let tree = shoes_tree();
    let index = CategoryIndex::new(&tree);
    assert_eq!(index.len(), 5);
    assert_eq!(index.get("9").map(|n| n.name.as_str()), Some("Running"));
    assert!(index.get("nope").is_none());
}

#[test]
fn index_keeps_first_duplicate_in_pre_order() {
    let mut parent = CategoryTreeNode::new("1", "Parent", "parent");
    parent.children = vec![CategoryTreeNode::new("dup", "Nested", "nested")];
    let tree = vec![parent, CategoryTreeNode::new("dup", "Later", "later")];

    let index = CategoryIndex::new(&tree);
    assert_eq!(index.get("dup").map(|n| n.name.as_str()), Some("Nested"));
}
