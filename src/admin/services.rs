use uuid::Uuid;

use super::dto::{Stats, UpdatedUser, UserSummary};
use crate::store::{Entity, Store};

/// How many quests and users the dashboard's "recent" panels show.
pub const RECENT_LIMIT: i64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Reads every dashboard figure concurrently. The first failing read aborts
/// the whole call.
pub async fn get_stats(store: &dyn Store) -> anyhow::Result<Stats> {
    let (total_quests, total_trees, total_users, total_badges, recent_quests, recent_users) =
        tokio::try_join!(
            store.count(Entity::Quest),
            store.count(Entity::QuestTree),
            store.count(Entity::User),
            store.count(Entity::Badge),
            store.recent_quests(RECENT_LIMIT),
            store.recent_users(RECENT_LIMIT),
        )?;

    Ok(Stats {
        total_quests,
        total_trees,
        total_users,
        total_badges,
        recent_quests,
        recent_users,
    })
}

pub async fn list_users(store: &dyn Store) -> anyhow::Result<Vec<UserSummary>> {
    store.list_users().await
}

pub async fn set_admin_flag(
    store: &dyn Store,
    user_id: Uuid,
    is_admin: bool,
) -> Result<UpdatedUser, MutationError> {
    store
        .set_admin_flag(user_id, is_admin)
        .await?
        .ok_or(MutationError::NotFound)
}
