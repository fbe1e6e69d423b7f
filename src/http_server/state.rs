//! Shared handler state.

use std::sync::Arc;

use super::errors::ApiResult;
use crate::service::{ServiceResult, SocialService};

/// State shared by every route module
pub struct AppState {
    pub service: SocialService,
}

impl AppState {
    pub fn new(service: SocialService) -> Arc<Self> {
        Arc::new(Self { service })
    }

    /// Runs a service call on the blocking pool.
    ///
    /// Every service call holds the store lock for a whole SQLite
    /// transaction, which must not happen on an async worker thread.
    pub async fn run<T, F>(&self, call: F) -> ApiResult<T>
    where
        F: FnOnce(&SocialService) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service.clone();
        let result = tokio::task::spawn_blocking(move || call(&service)).await?;
        Ok(result?)
    }
}
