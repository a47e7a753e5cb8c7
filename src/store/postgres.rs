use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::{Entity, Quest, QuestSummary, RecentUser, Store, UpdatedUser, User, UserSummary};

const USER_COLUMNS: &str = "id, name, email, image, current_level, total_xp, role_path, \
                            is_admin, password_hash, created_at";

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn count(&self, entity: Entity) -> anyhow::Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", entity.table());
        let n = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.db)
            .await
            .with_context(|| format!("count {}", entity.table()))?;
        Ok(n)
    }

    async fn recent_quests(&self, limit: i64) -> anyhow::Result<Vec<QuestSummary>> {
        let rows = sqlx::query_as::<_, QuestSummary>(
            r#"
            SELECT id, name, difficulty, xp_reward, created_at
            FROM quests
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn recent_users(&self, limit: i64) -> anyhow::Result<Vec<RecentUser>> {
        let rows = sqlx::query_as::<_, RecentUser>(
            r#"
            SELECT id, name, email, current_level, total_xp, created_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_users(&self) -> anyhow::Result<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, name, email, image, current_level, total_xp, role_path,
                   is_admin, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn set_admin_flag(
        &self,
        id: Uuid,
        is_admin: bool,
    ) -> anyhow::Result<Option<UpdatedUser>> {
        let row = sqlx::query_as::<_, UpdatedUser>(
            r#"
            UPDATE users
            SET is_admin = $2
            WHERE id = $1
            RETURNING id, name, email, is_admin
            "#,
        )
        .bind(id)
        .bind(is_admin)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_quests(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Quest>> {
        let rows = sqlx::query_as::<_, Quest>(
            r#"
            SELECT id, tree_id, name, description, difficulty, xp_reward, created_at
            FROM quests
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
