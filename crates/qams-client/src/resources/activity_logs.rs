//! Activity log endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use qams_core::result::AppResult;
use qams_core::types::{QueryParams, UserId};
use qams_entity::activity::{ActivityLogPage, EntityTag, Operation};

use crate::gateway::ApiGateway;
use crate::traits::ActivityLogSource;

/// A fully resolved activity log query.
///
/// Rebuilt from the view's filters on every change; unset criteria are
/// left out of the query string entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLogQuery {
    /// Page number (1-based).
    pub page: u64,
    /// Entries per page.
    pub page_size: u64,
    /// Only changes made by this user.
    pub actor_id: Option<UserId>,
    /// Only changes to this entity instance.
    pub entity_id: Option<String>,
    /// Free-text match on the entity name.
    pub entity_name: Option<String>,
    /// Only changes to this kind of entity.
    pub entity_type: Option<EntityTag>,
    /// Only this kind of change.
    pub operation: Option<Operation>,
    /// Inclusive lower bound.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub to: Option<DateTime<Utc>>,
}

impl ActivityLogQuery {
    /// An unfiltered query for `page`.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            actor_id: None,
            entity_id: None,
            entity_name: None,
            entity_type: None,
            operation: None,
            from: None,
            to: None,
        }
    }

    /// Query-string parameters as the backend names them.
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with("page", self.page)
            .with("pageSize", self.page_size)
            .with_opt("by", self.actor_id.as_ref())
            .with_opt("entityId", self.entity_id.as_deref())
            .with_opt("entityName", self.entity_name.as_deref())
            .with_opt("entity", self.entity_type.as_ref())
            .with_opt("operation", self.operation)
            .with_opt("fromDate", self.from.map(iso))
            .with_opt("toDate", self.to.map(iso))
    }
}

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `/activity-logs` endpoint.
#[derive(Debug, Clone)]
pub struct ActivityLogsApi {
    gateway: Arc<ApiGateway>,
}

impl ActivityLogsApi {
    /// Create the module over a shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ActivityLogSource for ActivityLogsApi {
    async fn fetch_page(&self, query: &ActivityLogQuery) -> AppResult<ActivityLogPage> {
        debug!(page = query.page, page_size = query.page_size, "Fetching activity logs");
        self.gateway
            .get("/activity-logs", &query.to_params())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_only_set_filters_are_sent() {
        let mut query = ActivityLogQuery::new(3, 20);
        query.entity_type = Some(EntityTag::new("user"));
        query.entity_name = Some(String::new());
        query.operation = Some(Operation::Delete);
        query.to = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).single();

        let params = query.to_params();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["page", "pageSize", "entity", "operation", "toDate"]);
        assert_eq!(params.get("operation"), Some("delete"));
        assert_eq!(params.get("toDate"), Some("2024-01-05T23:59:59.000Z"));
    }
}
