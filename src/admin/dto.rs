use serde::{Deserialize, Serialize};

pub use crate::store::{QuestSummary, RecentUser, UpdatedUser, UserSummary};

/// Dashboard totals plus the newest quests and users.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_quests: i64,
    pub total_trees: i64,
    pub total_users: i64,
    pub total_badges: i64,
    pub recent_quests: Vec<QuestSummary>,
    pub recent_users: Vec<RecentUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminRequest {
    pub is_admin: bool,
}
