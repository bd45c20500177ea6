use crate::models::Habit;
use crate::store::HabitStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HabitStore>,
    /// Last known derived habits, including optimistic edits not yet confirmed.
    pub habits: Arc<Mutex<Vec<Habit>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn HabitStore>) -> Self {
        Self {
            store,
            habits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}
