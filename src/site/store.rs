//! Shared site info with merge-on-write and stale-result rejection.
//!
//! Readers get an `Arc<SiteInfo>` snapshot through `arc-swap`; writers go
//! through `seed`, `overwrite` or the refresh pair, all of which merge with
//! the fallback first.
//!
//! Refreshes are issued tickets with increasing generations. A finished
//! refresh is applied only when the store is still alive and nothing newer
//! has been applied since the ticket was issued:
//!
//! ```text
//! begin(1) ── begin(2) ── complete(2) ✓ ── complete(1) ✗ (superseded)
//! begin(3) ── close() ── complete(3) ✗ (store closed)
//! ```

use super::{PartialSiteInfo, SiteInfo, merge_with_fallback};
use crate::{
    api::{ApiResult, Backend},
    debug, log,
};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

/// Proof that a refresh was started; hand it back to `complete_refresh`.
#[derive(Debug)]
#[must_use = "a refresh ticket must be completed"]
pub struct RefreshTicket {
    generation: u64,
}

pub struct SiteInfoStore {
    fallback: SiteInfo,
    current: ArcSwap<SiteInfo>,
    /// Last generation handed out.
    issued: AtomicU64,
    /// Generation of the value in `current`. Locked while swapping.
    applied: Mutex<u64>,
    alive: AtomicBool,
}

impl SiteInfoStore {
    /// New store holding `fallback` until something is written.
    pub fn new(fallback: SiteInfo) -> Self {
        Self {
            current: ArcSwap::from_pointee(fallback.clone()),
            fallback,
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
            alive: AtomicBool::new(true),
        }
    }

    /// Current complete snapshot.
    pub fn current(&self) -> Arc<SiteInfo> {
        self.current.load_full()
    }

    /// Initial data, e.g. fetched once at startup.
    pub fn seed(&self, partial: PartialSiteInfo) {
        self.write_next(partial);
    }

    /// Explicit write by a caller; supersedes in-flight refreshes.
    pub fn overwrite(&self, partial: PartialSiteInfo) {
        self.write_next(partial);
    }

    fn write_next(&self, partial: PartialSiteInfo) {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(generation, partial);
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket {
            generation: self.issued.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Finish a refresh. Returns whether the result was applied.
    ///
    /// Failed fetches keep the current value.
    pub fn complete_refresh(
        &self,
        ticket: RefreshTicket,
        result: ApiResult<PartialSiteInfo>,
    ) -> bool {
        match result {
            Ok(partial) => self.apply(ticket.generation, partial),
            Err(e) => {
                debug!("site"; "refresh {} failed: {}", ticket.generation, e);
                false
            }
        }
    }

    fn apply(&self, generation: u64, partial: PartialSiteInfo) -> bool {
        // Liveness is checked under the lock `close` takes, so no write can
        // land after `close` returns.
        let mut applied = self.applied.lock();
        if !self.is_alive() {
            debug!("site"; "store closed, dropping generation {}", generation);
            return false;
        }
        if generation <= *applied {
            debug!("site"; "generation {} superseded by {}", generation, *applied);
            return false;
        }

        let merged = merge_with_fallback(partial, &self.fallback);
        self.current.store(Arc::new(merged));
        *applied = generation;
        true
    }

    /// Fetch from the backend and apply through the ticket path.
    pub fn refresh_from(&self, backend: &dyn Backend) -> bool {
        let ticket = self.begin_refresh();
        let result = backend.site_info();
        if let Err(e) = &result {
            log!("site"; "site info unavailable: {}", e);
        }
        self.complete_refresh(ticket, result)
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Stop accepting writes. Late refresh results are discarded.
    pub fn close(&self) {
        let _applied = self.applied.lock();
        self.alive.store(false, Ordering::SeqCst);
    }
}
