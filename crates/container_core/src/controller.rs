//! Reactive recompute controller for the container list.
//!
//! # Responsibility
//! - Own both raw collections, the query state and the derived views.
//! - Decide which events recompute views; derivation itself lives in
//!   [`crate::view::engine`].
//! - Surface the load lifecycle, including failures, as explicit state.
//!
//! # Invariants
//! - Recognized triggers: collections loaded, sort order changed, search
//!   submitted. A keystroke only stores the term.
//! - Every recompute derives both views from the same query and publishes
//!   them together as one new snapshot.
//! - After `dispose`, no event mutates state.

use crate::config::{ControllerConfig, SearchCommitPolicy};
use crate::loader::{
    cancel_pair, ingest_payload, CancelSignal, LoadCanceller, LoadError, LoadResult,
};
use crate::model::container::{Collection, ContainerRecord};
use crate::model::query::{QueryState, SortOrder};
use crate::view::engine::compute_view;
use log::{debug, info, warn};
use std::sync::Arc;

/// Event that caused a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    CollectionsLoaded,
    SortOrderChanged,
    SearchSubmitted,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CollectionsLoaded => "collections_loaded",
            Self::SortOrderChanged => "sort_order_changed",
            Self::SearchSubmitted => "search_submitted",
        }
    }
}

/// Lifecycle of the one-shot container load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No load started yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Last load failed; previous collections are kept and a retry is allowed.
    Failed(LoadError),
}

/// Both derived views, published together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerViews {
    pub owned: Vec<ContainerRecord>,
    pub shared: Vec<ContainerRecord>,
    /// Query the views were derived with.
    pub query: QueryState,
    /// Increments on every recompute; `0` before the first one.
    pub revision: u64,
    /// `None` until the first recompute.
    pub trigger: Option<Trigger>,
}

impl ContainerViews {
    pub fn view(&self, collection: Collection) -> &[ContainerRecord] {
        match collection {
            Collection::Owned => &self.owned,
            Collection::Shared => &self.shared,
        }
    }
}

/// Owns list state and recomputes views on recognized triggers.
pub struct ContainerListController {
    config: ControllerConfig,
    owned: Vec<ContainerRecord>,
    shared: Vec<ContainerRecord>,
    query: QueryState,
    submitted_term: String,
    views: Arc<ContainerViews>,
    load_state: LoadState,
    load_canceller: Option<LoadCanceller>,
    disposed: bool,
}

impl Default for ContainerListController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl ContainerListController {
    /// Creates a controller with empty collections and default query.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            owned: Vec::new(),
            shared: Vec::new(),
            query: QueryState::default(),
            submitted_term: String::new(),
            views: Arc::new(ContainerViews::default()),
            load_state: LoadState::Idle,
            load_canceller: None,
            disposed: false,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Current query as edited by the user, submitted or not.
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Latest published views; holders keep a consistent snapshot.
    pub fn views(&self) -> Arc<ContainerViews> {
        Arc::clone(&self.views)
    }

    /// Marks a load as started and hands out its cancellation signal.
    ///
    /// Returns `None` when disposed or when a load is already running.
    /// Allowed again after a failure (retry) or a completed load (reload).
    pub fn begin_load(&mut self) -> Option<CancelSignal> {
        if self.disposed || self.load_state == LoadState::Loading {
            return None;
        }
        let (canceller, signal) = cancel_pair();
        self.load_canceller = Some(canceller);
        self.load_state = LoadState::Loading;
        info!("event=containers_load module=controller status=start");
        Some(signal)
    }

    /// Applies a load outcome.
    ///
    /// Success replaces both collections (after ingestion filtering) and
    /// recomputes. Failure keeps previous collections and views, and only
    /// moves to `LoadState::Failed`. Returns whether views were recomputed.
    pub fn apply_load(&mut self, outcome: LoadResult) -> bool {
        if self.disposed {
            debug!("event=containers_load module=controller status=ignored reason=disposed");
            return false;
        }
        self.load_canceller = None;

        match outcome {
            Ok(payload) => {
                let payload = ingest_payload(payload);
                self.owned = payload.owned;
                self.shared = payload.shared;
                self.load_state = LoadState::Loaded;
                self.recompute(Trigger::CollectionsLoaded);
                true
            }
            Err(err) => {
                warn!(
                    "event=containers_load module=controller status=error code={} retryable={}",
                    err.code(),
                    err.is_retryable()
                );
                self.load_state = LoadState::Failed(err);
                false
            }
        }
    }

    /// Stores a keystroke's search term without recomputing.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.query.search_term = term.into();
    }

    /// Explicit search commit; always recomputes.
    pub fn submit_search(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.submitted_term = self.query.search_term.clone();
        self.recompute(Trigger::SearchSubmitted);
        true
    }

    /// Changes the sort order; recomputes only on an actual change.
    pub fn set_sort_order(&mut self, order: SortOrder) -> bool {
        if self.disposed || self.query.sort_order == order {
            return false;
        }
        if order == SortOrder::Unrecognized {
            warn!("event=sort_select module=controller status=fallback order=identity");
        }
        self.query.sort_order = order;
        self.recompute(Trigger::SortOrderChanged);
        true
    }

    /// Changes the sort order from a raw selector value.
    pub fn select_sort_value(&mut self, value: &str) -> bool {
        self.set_sort_order(SortOrder::from_wire(value))
    }

    /// Tears down: cancels a running load and freezes all state.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(canceller) = self.load_canceller.take() {
            canceller.cancel();
        }
        self.disposed = true;
        info!("event=controller_dispose module=controller status=ok");
    }

    /// Query used for `trigger` under the configured commit policy.
    fn effective_query(&self, trigger: Trigger) -> QueryState {
        let search_term = match (self.config.search_policy, trigger) {
            (SearchCommitPolicy::SubmittedOnly, Trigger::CollectionsLoaded)
            | (SearchCommitPolicy::SubmittedOnly, Trigger::SortOrderChanged) => {
                self.submitted_term.clone()
            }
            _ => self.query.search_term.clone(),
        };
        QueryState::new(search_term, self.query.sort_order)
    }

    fn recompute(&mut self, trigger: Trigger) {
        let query = self.effective_query(trigger);
        let owned = compute_view(Some(self.owned.as_slice()), &query);
        let shared = compute_view(Some(self.shared.as_slice()), &query);
        let revision = self.views.revision + 1;

        debug!(
            "event=views_recompute module=controller status=ok trigger={} revision={} sort={} term_len={} owned={} shared={}",
            trigger.as_str(),
            revision,
            query.sort_order.as_wire(),
            query.search_term.chars().count(),
            owned.len(),
            shared.len()
        );

        self.views = Arc::new(ContainerViews {
            owned,
            shared,
            query,
            revision,
            trigger: Some(trigger),
        });
    }
}
