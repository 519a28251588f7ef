//! Search history service implementation

use async_trait::async_trait;
use tracing::debug;

use crate::database::SearchRepository;
use crate::engine::HistoryStore;
use crate::models::{CreateSearchRequest, SearchRecord};
use crate::utils::errors::Result;

/// Completed-search history service
#[derive(Debug, Clone)]
pub struct HistoryService {
    searches: SearchRepository,
    limit: i64,
}

impl HistoryService {
    pub fn new(searches: SearchRepository, limit: i64) -> Self {
        Self { searches, limit }
    }

    /// Latest searches for a user, newest first
    pub async fn recent(&self, user_id: i64) -> Result<Vec<SearchRecord>> {
        self.searches.recent_for_user(user_id, self.limit).await
    }
}

#[async_trait]
impl HistoryStore for HistoryService {
    async fn record(&self, request: CreateSearchRequest) -> Result<()> {
        let record = self.searches.create(request).await?;
        debug!(id = record.id, user_id = record.user_id, "Search recorded");
        Ok(())
    }
}
