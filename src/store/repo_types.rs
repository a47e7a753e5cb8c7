use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Entities the admin dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Quest,
    QuestTree,
    Badge,
}

impl Entity {
    pub fn table(self) -> &'static str {
        match self {
            Entity::User => "users",
            Entity::Quest => "quests",
            Entity::QuestTree => "quest_trees",
            Entity::Badge => "badges",
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub current_level: i32,
    pub total_xp: i32,
    pub role_path: Option<String>,
    pub is_admin: bool,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: Uuid,
    pub tree_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub xp_reward: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Quest projection shown in the dashboard's "recent quests" panel.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuestSummary {
    pub id: Uuid,
    pub name: String,
    pub difficulty: String,
    pub xp_reward: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// User projection shown in the dashboard's "recent users" panel.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub current_level: i32,
    #[serde(rename = "totalXP")]
    pub total_xp: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Roster row returned to admins.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub current_level: i32,
    #[serde(rename = "totalXP")]
    pub total_xp: i32,
    pub role_path: Option<String>,
    pub is_admin: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            image: u.image.clone(),
            current_level: u.current_level,
            total_xp: u.total_xp,
            role_path: u.role_path.clone(),
            is_admin: u.is_admin,
            created_at: u.created_at,
        }
    }
}

impl From<&User> for RecentUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            current_level: u.current_level,
            total_xp: u.total_xp,
            created_at: u.created_at,
        }
    }
}

impl From<&User> for UpdatedUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            is_admin: u.is_admin,
        }
    }
}

impl From<&Quest> for QuestSummary {
    fn from(q: &Quest) -> Self {
        Self {
            id: q.id,
            name: q.name.clone(),
            difficulty: q.difficulty.clone(),
            xp_reward: q.xp_reward,
            created_at: q.created_at,
        }
    }
}
