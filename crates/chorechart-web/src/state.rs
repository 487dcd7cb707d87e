//! Application state.

use chorechart_core::tally::TallyWindow;
use chorechart_db::DbPool;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub window: TallyWindow,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, window: TallyWindow) -> Self {
        Self { db, window }
    }
}
