//! The favorite store: the single owner of the restaurant list shown to the
//! user and of the persisted favorite ids.
//!
//! Every mutation runs under one mutex for its whole read-modify-write,
//! persistence access included, so reconciliations and toggles never
//! interleave. Observers follow the list through a `watch` channel; each
//! change publishes a new `Arc`, never an edited one.

use crate::domain::{
    FAVORITES_KEY, FavoriteIds, FetchError, PersistenceError, Restaurant, RestaurantId,
    RestaurantList, StoreError, StoreResult, apply_to_favorites, reconcile, toggle,
};
use crate::infrastructure::{EntitySource, PersistenceHandle};
use std::panic;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::{mpsc, watch};
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, warn};

/// Receives failures that have no direct caller to return to.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &StoreError);
}

/// Logs reported errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &StoreError) {
        error!("{error}");
    }
}

/// Logs reported errors and forwards their message to a receiver, so a
/// front-end can show them.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    sender: mpsc::UnboundedSender<String>,
}

impl ChannelReporter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ErrorReporter for ChannelReporter {
    fn report(&self, error: &StoreError) {
        error!("{error}");
        // A closed receiver means nobody is displaying errors any more.
        let _ = self.sender.send(error.to_string());
    }
}

struct Shared {
    list: Mutex<RestaurantList>,
    sender: watch::Sender<RestaurantList>,
    persistence: Arc<dyn PersistenceHandle>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Shared {
    fn lock_list(&self) -> MutexGuard<'_, RestaurantList> {
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_persisted(&self) -> Result<Option<FavoriteIds>, PersistenceError> {
        Ok(self.persistence.get(FAVORITES_KEY)?.map(FavoriteIds::from))
    }

    fn publish(&self, current: &mut RestaurantList, next: Vec<Restaurant>) -> RestaurantList {
        let next = Arc::new(next);
        *current = Arc::clone(&next);
        self.sender.send_replace(Arc::clone(&next));
        next
    }

    fn replace_reconciled(&self, entities: &[Restaurant]) -> RestaurantList {
        let mut current = self.lock_list();

        let persisted = self.read_persisted().unwrap_or_else(|e| {
            self.reporter.report(&e.into());
            None
        });

        match &persisted {
            Some(ids) => info!(
                restaurants = entities.len(),
                favorites = ids.len(),
                "restoring saved favorites"
            ),
            None => debug!(restaurants = entities.len(), "no saved favorites"),
        }

        let merged = reconcile(entities, persisted.as_ref());
        self.publish(&mut current, merged)
    }

    fn toggle(&self, id: RestaurantId) -> StoreResult<Restaurant> {
        let mut current = self.lock_list();

        let (next, toggled) = toggle(&current, id).inspect_err(|e| warn!("toggle rejected: {e}"))?;

        let mut ids = self.read_persisted()?.unwrap_or_default();
        apply_to_favorites(&mut ids, &toggled);
        self.persistence
            .set(FAVORITES_KEY, ids.as_slice())
            .inspect_err(|e| warn!(id, "favorite not saved, keeping previous state: {e}"))?;

        debug!(id, favorite = toggled.is_favorite, "favorite toggled");
        self.publish(&mut current, next);
        Ok(toggled)
    }

    fn apply_fetch(&self, result: Result<Vec<Restaurant>, FetchError>) -> StoreResult<()> {
        match result {
            Ok(entities) => {
                info!(count = entities.len(), "restaurants loaded");
                self.replace_reconciled(&entities);
                Ok(())
            }
            Err(e) => {
                let error = StoreError::from(e);
                self.reporter.report(&error);
                Err(error)
            }
        }
    }
}

/// Applies a fetch result on the blocking pool, since reconciling reads the
/// saved favorites while holding the list lock.
async fn apply_blocking(
    shared: Arc<Shared>,
    result: Result<Vec<Restaurant>, FetchError>,
) -> StoreResult<()> {
    match task::spawn_blocking(move || shared.apply_fetch(result)).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => panic::resume_unwind(e.into_panic()),
        Err(_) => {
            debug!("runtime shutting down, fetch result dropped");
            Ok(())
        }
    }
}

/// Hands a finished fetch to the store, if it still exists.
async fn deliver(shared: Weak<Shared>, result: Result<Vec<Restaurant>, FetchError>) {
    let Some(shared) = shared.upgrade() else {
        debug!("store gone, dropping fetch result");
        return;
    };
    // Failures were already reported.
    let _ = apply_blocking(shared, result).await;
}

/// Holds the current restaurant list and keeps the saved favorite ids in
/// step with it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use restaurants::application::{FavoriteStore, TracingReporter};
/// use restaurants::domain::Restaurant;
/// use restaurants::infrastructure::{MemoryStore, PersistenceHandle};
///
/// let saved = Arc::new(MemoryStore::new());
/// let store = FavoriteStore::new(saved.clone(), Arc::new(TracingReporter));
/// store.initialize(vec![Restaurant::new(1, "A", "a"), Restaurant::new(2, "B", "b")]);
///
/// store.toggle_favorite(2).unwrap();
/// assert!(store.current()[1].is_favorite);
/// assert_eq!(saved.get("favorites").unwrap(), Some(vec![2]));
/// ```
pub struct FavoriteStore {
    shared: Arc<Shared>,
    fetch: Mutex<Option<JoinHandle<()>>>,
}

impl FavoriteStore {
    /// Creates a store holding an empty list.
    pub fn new(persistence: Arc<dyn PersistenceHandle>, reporter: Arc<dyn ErrorReporter>) -> Self {
        let empty: RestaurantList = Arc::new(Vec::new());
        let (sender, _) = watch::channel(Arc::clone(&empty));

        Self {
            shared: Arc::new(Shared {
                list: Mutex::new(empty),
                sender,
                persistence,
                reporter,
            }),
            fetch: Mutex::new(None),
        }
    }

    /// Replaces the list with `entities`, restoring saved favorites if any
    /// were persisted. Nothing is written back.
    pub fn initialize(&self, entities: Vec<Restaurant>) -> RestaurantList {
        self.shared.replace_reconciled(&entities)
    }

    /// Same reconciliation as [`initialize`](Self::initialize), for lists
    /// that arrive after the store was set up.
    pub fn on_entities_loaded(&self, entities: Vec<Restaurant>) {
        self.shared.replace_reconciled(&entities);
    }

    /// Flips the favorite flag of `id` and saves the new favorite set before
    /// returning the toggled restaurant.
    ///
    /// # Errors
    ///
    /// [`StoreError::Domain`] when no restaurant has that id, and
    /// [`StoreError::Persistence`] when the favorite set could not be read or
    /// written. The list is unchanged in both cases.
    pub fn toggle_favorite(&self, id: RestaurantId) -> StoreResult<Restaurant> {
        self.shared.toggle(id)
    }

    pub fn current(&self) -> RestaurantList {
        Arc::clone(&self.shared.lock_list())
    }

    pub fn subscribe(&self) -> watch::Receiver<RestaurantList> {
        self.shared.sender.subscribe()
    }

    /// The favorite ids as currently persisted.
    pub fn persisted_favorites(&self) -> StoreResult<Option<FavoriteIds>> {
        let _current = self.shared.lock_list();
        Ok(self.shared.read_persisted()?)
    }

    /// Fetches from `source` and applies the result in place.
    ///
    /// A failed fetch is reported, returned, and leaves the list as it was.
    pub async fn refresh(&self, source: &dyn EntitySource) -> StoreResult<()> {
        let result = source.fetch().await;
        apply_blocking(Arc::clone(&self.shared), result).await
    }

    /// Starts a background fetch from `source`, cancelling any fetch still
    /// outstanding. Must be called from within a tokio runtime.
    pub fn load_from(&self, source: Arc<dyn EntitySource>) {
        let shared = Arc::downgrade(&self.shared);
        info!("fetching restaurants from {}", source.describe());

        let handle = tokio::spawn(async move {
            let result = source.fetch().await;
            deliver(shared, result).await;
        });

        if let Some(previous) = self.lock_fetch().replace(handle) {
            previous.abort();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock_fetch()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels an outstanding background fetch. Its result, if it still
    /// arrives, is dropped.
    pub fn shutdown(&self) {
        if let Some(handle) = self.lock_fetch().take() {
            if !handle.is_finished() {
                debug!("cancelling outstanding fetch");
            }
            handle.abort();
        }
    }

    fn lock_fetch(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.fetch.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FavoriteStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}
