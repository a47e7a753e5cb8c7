use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Entity, Quest, QuestSummary, RecentUser, Store, UpdatedUser, User, UserSummary};

/// In-memory [`Store`] for tests. Counts reads and writes and can be told to
/// start failing.
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    quests: Mutex<Vec<Quest>>,
    trees: AtomicUsize,
    badges: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads_after: AtomicUsize,
    fail_writes: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            quests: Mutex::new(Vec::new()),
            trees: AtomicUsize::new(0),
            badges: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            fail_reads_after: AtomicUsize::new(usize::MAX),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Every read and write fails from now on.
    pub fn set_failing(&self, failing: bool) {
        let after = if failing { 0 } else { usize::MAX };
        self.fail_reads_after.store(after, Ordering::SeqCst);
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Lets `n` more reads succeed, then fails every read after them.
    pub fn fail_reads_after(&self, n: usize) {
        let done = self.reads();
        self.fail_reads_after.store(done + n, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn insert_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn insert_quest(&self, quest: Quest) {
        self.quests.lock().unwrap().push(quest);
    }

    pub fn set_tree_count(&self, n: usize) {
        self.trees.store(n, Ordering::SeqCst);
    }

    pub fn set_badge_count(&self, n: usize) {
        self.badges.store(n, Ordering::SeqCst);
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn read(&self) -> anyhow::Result<()> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        if n >= self.fail_reads_after.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        Ok(())
    }
}

/// Builds a user row for seeding.
pub fn user(email: &str, is_admin: bool, created_at: OffsetDateTime) -> User {
    User {
        id: Uuid::new_v4(),
        name: Some(email.split('@').next().unwrap_or(email).to_string()),
        email: email.to_string(),
        image: None,
        current_level: 1,
        total_xp: 0,
        role_path: None,
        is_admin,
        password_hash: String::new(),
        created_at,
    }
}

/// Builds a quest row for seeding.
pub fn quest(name: &str, created_at: OffsetDateTime) -> Quest {
    Quest {
        id: Uuid::new_v4(),
        tree_id: None,
        name: name.to_string(),
        description: None,
        difficulty: "easy".to_string(),
        xp_reward: 50,
        created_at,
    }
}

fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> OffsetDateTime,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.read()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.read()?;
        Ok(self.user(id))
    }

    async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Ok(None);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id: Uuid::new_v4(),
            name: name.map(str::to_string),
            email: email.to_string(),
            image: None,
            current_level: 1,
            total_xp: 0,
            role_path: None,
            is_admin: false,
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(Some(user))
    }

    async fn count(&self, entity: Entity) -> anyhow::Result<i64> {
        self.read()?;
        let n = match entity {
            Entity::User => self.users.lock().unwrap().len(),
            Entity::Quest => self.quests.lock().unwrap().len(),
            Entity::QuestTree => self.trees.load(Ordering::SeqCst),
            Entity::Badge => self.badges.load(Ordering::SeqCst),
        };
        Ok(n as i64)
    }

    async fn recent_quests(&self, limit: i64) -> anyhow::Result<Vec<QuestSummary>> {
        self.read()?;
        let mut quests = self.quests.lock().unwrap().clone();
        newest_first(&mut quests, |q| q.created_at);
        Ok(quests
            .iter()
            .take(limit.max(0) as usize)
            .map(QuestSummary::from)
            .collect())
    }

    async fn recent_users(&self, limit: i64) -> anyhow::Result<Vec<RecentUser>> {
        self.read()?;
        let mut users = self.users.lock().unwrap().clone();
        newest_first(&mut users, |u| u.created_at);
        Ok(users
            .iter()
            .take(limit.max(0) as usize)
            .map(RecentUser::from)
            .collect())
    }

    async fn list_users(&self) -> anyhow::Result<Vec<UserSummary>> {
        self.read()?;
        let mut users = self.users.lock().unwrap().clone();
        newest_first(&mut users, |u| u.created_at);
        Ok(users.iter().map(UserSummary::from).collect())
    }

    async fn set_admin_flag(
        &self,
        id: Uuid,
        is_admin: bool,
    ) -> anyhow::Result<Option<UpdatedUser>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.is_admin = is_admin;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(UpdatedUser::from(&*user)))
    }

    async fn list_quests(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Quest>> {
        self.read()?;
        let mut quests = self.quests.lock().unwrap().clone();
        newest_first(&mut quests, |q| q.created_at);
        Ok(quests
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}
