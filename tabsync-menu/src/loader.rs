//! Cancellable menu loading.

use crate::model::{MenuItem, MobileMenuConfig};
use crate::normalize::{category_forest, normalize_mobile_menu};
use crate::resolve::resolve;
use crate::source::MenuSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Issues [`LoadTicket`]s. Starting a load or unmounting cancels every
/// ticket issued before.
#[derive(Debug, Default)]
pub struct LoadScope {
    current: Mutex<Option<Arc<AtomicBool>>>,
}

impl LoadScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the outstanding ticket and issues a new one.
    pub fn begin(&self) -> LoadTicket {
        let flag = Arc::new(AtomicBool::new(false));
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(flag.clone()) {
                previous.store(true, Ordering::SeqCst);
            }
        }
        LoadTicket { cancelled: flag }
    }

    /// Cancels the outstanding ticket, if any.
    pub fn cancel(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.store(true, Ordering::SeqCst);
            }
        }
    }
}

/// Captured at the start of a load; tells the load whether its result is
/// still wanted.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    cancelled: Arc<AtomicBool>,
}

impl LoadTicket {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A menu ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMenu {
    pub enabled: bool,
    pub items: Vec<MenuItem>,
}

/// Loads, resolves and caches the mobile menu.
pub struct MenuLoader<S> {
    source: S,
    scope: LoadScope,
    resolved: Mutex<Option<ResolvedMenu>>,
}

impl<S: MenuSource> MenuLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            scope: LoadScope::new(),
            resolved: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches menu and categories concurrently and resolves them.
    ///
    /// Returns `None` if another load started or [`MenuLoader::unmount`]
    /// was called while this one was in flight; the cache is then left as
    /// is. A failed fetch degrades to an empty menu or forest.
    pub async fn load(&self) -> Option<ResolvedMenu> {
        let ticket = self.scope.begin();
        let (menu, categories) = tokio::join!(
            self.source.fetch_mobile_menu(),
            self.source.fetch_category_tree()
        );
        if ticket.is_cancelled() {
            debug!("discarding superseded menu load");
            return None;
        }

        let config = match menu {
            Ok(value) => normalize_mobile_menu(&value),
            Err(e) => {
                warn!("failed to fetch mobile menu: {e}");
                MobileMenuConfig::default()
            }
        };
        let forest = match categories {
            Ok(value) => category_forest(&value),
            Err(e) => {
                warn!("failed to fetch category tree: {e}");
                Vec::new()
            }
        };

        let menu = ResolvedMenu {
            enabled: config.enabled,
            items: resolve(&config.items, &forest),
        };
        info!(items = menu.items.len(), "mobile menu resolved");
        if let Ok(mut resolved) = self.resolved.lock() {
            *resolved = Some(menu.clone());
        }
        Some(menu)
    }

    /// The last menu a completed load produced.
    pub fn current(&self) -> Option<ResolvedMenu> {
        self.resolved.lock().ok().and_then(|resolved| resolved.clone())
    }

    /// Cancels any load in flight. Loads started afterwards run normally.
    pub fn unmount(&self) {
        self.scope.cancel();
    }
}
