//! SupplementStore - shared search handle with the reload lifecycle.
//!
//! Concurrency model:
//! - The index lives behind a parking_lot RwLock; searches take the read
//!   lock, so they never block each other.
//! - Background page loads take short write locks per batch. Inserts only
//!   add keys during a load pass, so concurrent searches observe a
//!   monotonically growing index.
//! - clear() plus the first-batch load happen under one write lock; no
//!   reader ever sees a half-rebuilt index.
//! - Overlapping initialize() calls are serialized by an async mutex.
//!
//! Cancellation: every rebuild cancels the previous rebuild's in-flight
//! background load before clearing, so a page fetched against the old
//! dataset can never be inserted into the fresh index. Starting a refresh
//! timer cancels the previous timer; shutdown cancels everything. In all
//! cases the index stays in its last loaded state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::index::{SearchIndex, DEFAULT_SEARCH_LIMIT};
use crate::interface::{ReferenceItem, ReferenceSource, SearchError};

/// Tuning knobs for the reload lifecycle.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Rows fetched per page from the reference source.
    pub page_size: u64,
    /// Pause between background page loads so a reload cannot starve
    /// in-flight searches.
    pub page_delay: Duration,
    /// Interval between scheduled full rebuilds.
    pub refresh_period: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: 1000,
            page_delay: Duration::from_millis(100),
            refresh_period: Duration::from_secs(60 * 60),
        }
    }
}

pub struct SupplementStore {
    index: Arc<RwLock<SearchIndex<ReferenceItem>>>,
    source: Arc<dyn ReferenceSource>,
    config: StoreConfig,
    initialized: AtomicBool,
    init_lock: tokio::sync::Mutex<()>,
    /// Cancelled once, on shutdown; the timer and load tokens below are
    /// its children, so shutdown cancels everything.
    shutdown_token: CancellationToken,
    /// One child token per scheduled timer; replaced (and the old one
    /// cancelled) whenever a new timer is started.
    timer_token: Mutex<Option<CancellationToken>>,
    /// One child token per background page load; replaced (and the old
    /// one cancelled) at the start of every rebuild, so a page fetched
    /// against the previous dataset is dropped instead of inserted.
    load_token: Mutex<Option<CancellationToken>>,
}

impl SupplementStore {
    pub fn new(source: Arc<dyn ReferenceSource>, config: StoreConfig) -> Self {
        Self {
            index: Arc::new(RwLock::new(SearchIndex::new())),
            source,
            config,
            initialized: AtomicBool::new(false),
            init_lock: tokio::sync::Mutex::new(()),
            shutdown_token: CancellationToken::new(),
            timer_token: Mutex::new(None),
            load_token: Mutex::new(None),
        }
    }

    /// Full rebuild: fetch the first page, swap it in under one write
    /// lock, mark the store ready, then page in the remainder in the
    /// background. A first-page fetch failure propagates and leaves the
    /// previous index (and readiness) untouched.
    pub async fn initialize(&self) -> Result<(), SearchError> {
        let _guard = self.init_lock.lock().await;
        self.initialize_locked().await
    }

    async fn initialize_locked(&self) -> Result<(), SearchError> {
        // Stop the previous rebuild's pager before touching the index; an
        // in-flight page from the old dataset must not land after clear().
        let load_token = self.replace_load_token();
        let first_page = self.source.fetch_page(0, self.config.page_size).await?;
        let is_last_page = (first_page.len() as u64) < self.config.page_size;

        {
            let mut index = self.index.write();
            index.clear();
            index.load_items(first_page);
        }
        self.initialized.store(true, Ordering::Release);
        info!(items = self.index.read().len(), "search index ready");

        if !is_last_page {
            self.spawn_background_load(load_token);
        }
        Ok(())
    }

    fn spawn_background_load(&self, token: CancellationToken) {
        let index = Arc::clone(&self.index);
        let source = Arc::clone(&self.source);
        let page_size = self.config.page_size;
        let delay = self.config.page_delay;

        tokio::spawn(async move {
            let mut offset = page_size;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
                let page = match source.fetch_page(offset, page_size).await {
                    Ok(page) => page,
                    Err(err) => {
                        // Keep whatever loaded so far; the next scheduled
                        // reload gets a fresh chance.
                        warn!(%err, offset, "background page fetch failed");
                        break;
                    }
                };
                let fetched = page.len() as u64;
                {
                    let mut index = index.write();
                    // A rebuild may have cancelled this load while the
                    // fetch was in flight; its page describes the old
                    // dataset and must be dropped.
                    if token.is_cancelled() {
                        break;
                    }
                    index.load_items(page);
                }
                if fetched < page_size {
                    info!(items = index.read().len(), "background index load complete");
                    break;
                }
                offset += page_size;
            }
        });
    }

    /// Search the index. A call before the first successful initialize()
    /// triggers one on demand, propagating its failure so the HTTP layer
    /// can degrade instead of silently serving stale emptiness.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Arc<ReferenceItem>>, SearchError> {
        self.ensure_initialized().await?;
        Ok(self.index.read().search(query, limit))
    }

    /// [`search`](Self::search) with the default result cap.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Arc<ReferenceItem>>, SearchError> {
        self.search(query, DEFAULT_SEARCH_LIMIT).await
    }

    async fn ensure_initialized(&self) -> Result<(), SearchError> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        let _guard = self.init_lock.lock().await;
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        self.initialize_locked().await
    }

    /// Insert a single record outside the reload cycle. The next full
    /// rebuild replaces it with whatever the reference source holds.
    pub fn insert(&self, item: ReferenceItem) {
        let name = item.name.clone();
        self.index.write().insert(&name, item);
    }

    /// Schedule recurring full rebuilds every `config.refresh_period`.
    /// Replaces (and cancels) any previously scheduled timer so reloads
    /// never overlap or storm.
    pub fn start_refresh_timer(self: &Arc<Self>) {
        let token = self.replace_timer_token();
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(store.config.refresh_period);
            // The first tick completes immediately; the initial load is
            // initialize()'s job, not the timer's.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(err) = store.initialize().await {
                            warn!(%err, "scheduled index reload failed; keeping previous index");
                        }
                    }
                }
            }
        });
    }

    /// Cancel the refresh timer and any in-flight background load. The
    /// index stays usable in its last loaded state.
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
        if let Some(token) = self.timer_token.lock().take() {
            token.cancel();
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    pub fn all_items(&self) -> Vec<Arc<ReferenceItem>> {
        self.index.read().all_items()
    }

    fn replace_timer_token(&self) -> CancellationToken {
        let mut guard = self.timer_token.lock();
        if let Some(previous) = guard.take() {
            previous.cancel();
        }
        let fresh = self.shutdown_token.child_token();
        *guard = Some(fresh.clone());
        fresh
    }

    fn replace_load_token(&self) -> CancellationToken {
        let mut guard = self.load_token.lock();
        if let Some(previous) = guard.take() {
            previous.cancel();
        }
        let fresh = self.shutdown_token.child_token();
        *guard = Some(fresh.clone());
        fresh
    }
}
