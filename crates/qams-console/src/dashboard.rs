//! Headline statistics for the dashboard page.

use serde::Serialize;
use tracing::debug;

use qams_client::traits::Resource;
use qams_core::config::ConsoleConfig;
use qams_core::result::AppResult;
use qams_core::types::PageRequest;
use qams_entity::user::User;

/// Counts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Clients loaded.
    pub total_clients: u64,
    /// Users loaded.
    pub total_users: u64,
    /// Users whose status is active.
    pub active_users: u64,
    /// Users in any status other than active.
    pub inactive_users: u64,
}

impl DashboardStats {
    /// Fetch clients and users concurrently and count them.
    ///
    /// Users are fetched as a single page of `lookup_limit` entries and
    /// counted as loaded.
    pub async fn load<C, U>(clients: &C, users: &U, config: &ConsoleConfig) -> AppResult<Self>
    where
        C: Resource,
        U: Resource<Item = User>,
    {
        let page = PageRequest::first(config.lookup_limit);
        let (client_filters, user_filters) = (C::Filters::default(), U::Filters::default());
        let (clients, users) = tokio::try_join!(
            clients.list(&client_filters, page),
            users.list(&user_filters, page),
        )?;

        Ok(Self::count(clients.data.len(), &users.data))
    }

    fn count(clients: usize, users: &[User]) -> Self {
        let active = users.iter().filter(|u| u.status.is_active()).count() as u64;
        let stats = Self {
            total_clients: clients as u64,
            total_users: users.len() as u64,
            active_users: active,
            inactive_users: users.len() as u64 - active,
        };
        debug!(?stats, "Dashboard statistics computed");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::json;

    use qams_core::error::AppError;
    use qams_core::types::{Paginated, UserId};
    use qams_entity::user::{CreateUser, UpdateUser};

    struct Users(Vec<User>);

    #[async_trait]
    impl Resource for Users {
        type Item = User;
        type Id = UserId;
        type Filters = ();
        type Create = CreateUser;
        type Update = UpdateUser;
        const ENTITY: &'static str = "User";

        async fn list(&self, _: &(), page: PageRequest) -> AppResult<Paginated<User>> {
            Ok(Paginated::from_items(self.0.iter().take(page.limit as usize).cloned().collect()))
        }

        async fn create(&self, _: &CreateUser) -> AppResult<User> {
            Err(AppError::internal("unused"))
        }

        async fn update(&self, _: &UserId, _: &UpdateUser) -> AppResult<User> {
            Err(AppError::internal("unused"))
        }

        async fn delete(&self, _: &UserId) -> AppResult<()> {
            Err(AppError::internal("unused"))
        }
    }

    fn user(id: &str, status: &str) -> User {
        serde_json::from_value(json!({"_id": id, "email": format!("{id}@example.com"), "status": status})).unwrap()
    }

    #[tokio::test]
    async fn test_counts_active_and_other_statuses() {
        let clients = Users(vec![user("c1", "active"), user("c2", "active")]);
        let users = Users(vec![
            user("u1", "active"),
            user("u2", "invited"),
            user("u3", "active"),
            user("u4", "suspended"),
        ]);

        let stats = DashboardStats::load(&clients, &users, &ConsoleConfig::default())
            .await
            .unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_clients: 2,
                total_users: 4,
                active_users: 2,
                inactive_users: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_counts_are_capped_by_lookup_limit() {
        let users = Users((0..5).map(|i| user(&format!("u{i}"), "active")).collect());
        let config = ConsoleConfig {
            lookup_limit: 3,
            ..ConsoleConfig::default()
        };
        let stats = DashboardStats::load(&Users(Vec::new()), &users, &config).await.unwrap();
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_clients, 0);
    }
}
