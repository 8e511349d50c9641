use crate::infra::Store;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    /// Repository handle for a use case. Both backends clone cheaply.
    pub fn repo(&self) -> Store {
        self.store.clone()
    }
}
