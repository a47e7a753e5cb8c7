//! Persistence gateway.
//!
//! Every read and write the service performs goes through [`Store`], so the
//! HTTP layer never touches SQL directly. [`PgStore`] is the production
//! implementation; tests run against the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
pub mod memory;
mod postgres;
pub mod repo_types;

pub use postgres::PgStore;
pub use repo_types::{Entity, Quest, QuestSummary, RecentUser, UpdatedUser, User, UserSummary};

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Returns `None` when `email` is already taken.
    async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>>;

    async fn count(&self, entity: Entity) -> anyhow::Result<i64>;
    /// Newest quests first, at most `limit`.
    async fn recent_quests(&self, limit: i64) -> anyhow::Result<Vec<QuestSummary>>;
    /// Newest users first, at most `limit`.
    async fn recent_users(&self, limit: i64) -> anyhow::Result<Vec<RecentUser>>;
    /// Whole roster, newest first.
    async fn list_users(&self) -> anyhow::Result<Vec<UserSummary>>;
    /// Returns `None` when no user has `id`; nothing is written in that case.
    async fn set_admin_flag(&self, id: Uuid, is_admin: bool)
        -> anyhow::Result<Option<UpdatedUser>>;

    async fn list_quests(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Quest>>;
}
