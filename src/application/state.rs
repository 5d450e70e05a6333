//! Application state for the terminal front-end.
//!
//! The front-end only ever reads the restaurant list; every change goes
//! through the [`FavoriteStore`], and the app picks the result up from the
//! store's watch channel on the next tick.

use super::store::FavoriteStore;
use crate::domain::{Restaurant, RestaurantList};
use crate::infrastructure::EntitySource;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the list
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state containing the store handle and UI state.
pub struct App {
    /// Owner of the list and the saved favorites
    pub store: FavoriteStore,
    /// Where restaurants are fetched from on refresh
    pub source: Arc<dyn EntitySource>,
    /// Latest list seen on the watch channel
    pub restaurants: RestaurantList,
    /// Currently selected row (zero-based)
    pub selected: usize,
    /// Top row visible in the viewport
    pub scroll: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Viewport height in rows (for scrolling calculations)
    pub viewport_rows: usize,
    updates: watch::Receiver<RestaurantList>,
    errors: mpsc::UnboundedReceiver<String>,
}

impl App {
    pub fn new(
        store: FavoriteStore,
        source: Arc<dyn EntitySource>,
        errors: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        let mut updates = store.subscribe();
        let restaurants = updates.borrow_and_update().clone();

        Self {
            store,
            source,
            restaurants,
            selected: 0,
            scroll: 0,
            mode: AppMode::Normal,
            help_scroll: 0,
            status_message: None,
            viewport_rows: 20,
            updates,
            errors,
        }
    }

    /// Pulls the newest list and any reported errors.
    ///
    /// Called once per tick before rendering.
    pub fn sync(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            self.restaurants = self.updates.borrow_and_update().clone();
            self.clamp_selection();
        }

        while let Ok(message) = self.errors.try_recv() {
            self.status_message = Some(message);
        }
    }

    /// Starts a background fetch from the configured source.
    pub fn refresh(&mut self) {
        self.store.load_from(Arc::clone(&self.source));
        self.status_message = Some(format!("Loading restaurants from {}...", self.source.describe()));
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.restaurants.get(self.selected)
    }

    pub fn favorite_count(&self) -> usize {
        self.restaurants.iter().filter(|r| r.is_favorite).count()
    }

    /// Toggles the favorite flag of the selected restaurant.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_restaurant().map(|r| r.id) else {
            return;
        };

        match self.store.toggle_favorite(id) {
            Ok(restaurant) => {
                self.status_message = Some(if restaurant.is_favorite {
                    format!("Added {} to favorites", restaurant.title)
                } else {
                    format!("Removed {} from favorites", restaurant.title)
                });
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
        self.sync();
    }

    /// Moves the selection by `delta` rows, stopping at either end.
    pub fn move_selection(&mut self, delta: isize) {
        if self.restaurants.is_empty() {
            return;
        }
        let last = self.restaurants.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.ensure_selection_visible();
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.ensure_selection_visible();
    }

    pub fn select_last(&mut self) {
        self.selected = self.restaurants.len().saturating_sub(1);
        self.ensure_selection_visible();
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Updates the viewport size for proper scrolling calculations.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.ensure_selection_visible();
    }

    /// Ensures the selected row is visible by adjusting scroll position.
    pub fn ensure_selection_visible(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.viewport_rows {
            self.scroll = self.selected + 1 - self.viewport_rows;
        }
    }

    /// Cancels any background fetch.
    pub fn shutdown(&self) {
        self.store.shutdown();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.restaurants.len().saturating_sub(1));
        self.scroll = self.scroll.min(self.selected);
        self.ensure_selection_visible();
    }
}
