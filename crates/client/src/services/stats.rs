//! Statistics endpoints
//!
//! Aggregates for the dashboard screens; all computation is server-side.

use std::sync::Arc;

use peakform_domain::{PersonalRecord, StatsSummary, WeeklyStats};
use serde::Serialize;

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WeeklyQuery {
    weeks: u32,
}

/// Statistics operations
pub struct StatsService {
    api: Arc<ApiClient>,
}

impl StatsService {
    /// Create the service over a shared client
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch the all-time summary
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn summary(&self) -> Result<StatsSummary, ApiError> {
        self.api.get("/stats/summary").await
    }

    /// Fetch per-week aggregates for the trailing `weeks` weeks
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn weekly(&self, weeks: u32) -> Result<Vec<WeeklyStats>, ApiError> {
        self.api.get_query("/stats/weekly", &WeeklyQuery { weeks }).await
    }

    /// Fetch the viewer's personal records
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn personal_records(&self) -> Result<Vec<PersonalRecord>, ApiError> {
        self.api.get("/stats/records").await
    }
}
