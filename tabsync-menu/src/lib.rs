//! Mobile menu for tabsync.
//!
//! The merchant edits a tree of [`MenuItem`]s; some point at static links,
//! others at categories of the live catalogue. This crate fetches both,
//! validates them ([`normalize`]) and merges them into the tree a storefront
//! renders ([`resolve()`]). [`MenuLoader`] ties it together and throws away
//! results a newer load has superseded.

mod error;
mod loader;
mod model;
pub mod normalize;
mod resolve;
mod source;

pub use error::{MenuError, MenuResult};
pub use loader::{LoadScope, LoadTicket, MenuLoader, ResolvedMenu};
pub use model::{CategoryTreeNode, MenuItem, MenuItemKind, MobileMenuConfig};
pub use normalize::{category_forest, normalize_mobile_menu};
pub use resolve::{resolve, CategoryIndex, CATEGORY_ID_PREFIX, MAX_DEPTH};
pub use source::{HttpMenuSource, MenuSource, MenuSourceConfig};
