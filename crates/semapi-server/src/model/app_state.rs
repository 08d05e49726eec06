use semapi_core::LockManager;

/// Shared state handed to every request handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub lock_manager: LockManager,
}

impl AppState {
    pub fn new(lock_manager: LockManager) -> Self {
        Self { lock_manager }
    }
}
