use kontext_core::{PartsExtractor, Session};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared by every IPC command. The session lock is never held across an await.
pub struct AppState {
    session: Mutex<Session>,
    extractor: Arc<dyn PartsExtractor>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn PartsExtractor>) -> Self {
        Self {
            session: Mutex::new(Session::new()),
            extractor,
        }
    }

    pub fn session(&self) -> Result<MutexGuard<'_, Session>, String> {
        self.session
            .lock()
            .map_err(|_| "Session state is unavailable".to_string())
    }

    pub fn extractor(&self) -> Arc<dyn PartsExtractor> {
        Arc::clone(&self.extractor)
    }
}
