//! Per-session key/value storage standing in for browser local storage.
//!
//! Each login opens a session id; the session's `user` and `userRole`
//! entries are written on login/register, read on every authenticated
//! request and cleared on logout.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};
use tracing::warn;
use uuid::Uuid;

use crate::auth::{dto::PublicUser, role::Role};

pub const USER_KEY: &str = "user";
pub const ROLE_KEY: &str = "userRole";

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get_item(&self, sid: Uuid, key: &str) -> Option<String>;
    async fn set_item(&self, sid: Uuid, key: &str, value: String);
    async fn remove_item(&self, sid: Uuid, key: &str);
    /// Forgets sessions not read or written for `max_idle`. Returns how many
    /// were dropped.
    async fn evict_idle(&self, max_idle: Duration) -> usize;
}

struct SessionItems {
    items: HashMap<String, String>,
    last_touched: Instant,
}

impl Default for SessionItems {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            last_touched: Instant::now(),
        }
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    sessions: RwLock<HashMap<Uuid, SessionItems>>,
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get_item(&self, sid: Uuid, key: &str) -> Option<String> {
        let mut guard = self.sessions.write().await;
        let session = guard.get_mut(&sid)?;
        session.last_touched = Instant::now();
        session.items.get(key).cloned()
    }

    async fn set_item(&self, sid: Uuid, key: &str, value: String) {
        let mut guard = self.sessions.write().await;
        let session = guard.entry(sid).or_default();
        session.last_touched = Instant::now();
        session.items.insert(key.to_string(), value);
    }

    async fn remove_item(&self, sid: Uuid, key: &str) {
        let mut guard = self.sessions.write().await;
        if let Some(session) = guard.get_mut(&sid) {
            session.items.remove(key);
            if session.items.is_empty() {
                guard.remove(&sid);
            }
        }
    }

    async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut guard = self.sessions.write().await;
        let before = guard.len();
        guard.retain(|_, session| now.duration_since(session.last_touched) < max_idle);
        before - guard.len()
    }
}

/// Writes the user record and its role into the session.
pub async fn persist_user(
    storage: &dyn SessionStorage,
    sid: Uuid,
    user: &PublicUser,
) -> anyhow::Result<()> {
    let record = serde_json::to_string(user)?;
    storage.set_item(sid, USER_KEY, record).await;
    storage
        .set_item(sid, ROLE_KEY, user.role.as_str().to_string())
        .await;
    Ok(())
}

/// Restores the user persisted for a session. A malformed record is treated
/// as absent.
pub async fn load_user(storage: &dyn SessionStorage, sid: Uuid) -> Option<PublicUser> {
    let raw = storage.get_item(sid, USER_KEY).await?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, %sid, "discarding malformed stored user");
            None
        }
    }
}

/// Role persisted for a session, falling back to student.
pub async fn stored_role(storage: &dyn SessionStorage, sid: Uuid) -> Role {
    let raw = storage.get_item(sid, ROLE_KEY).await;
    Role::from_stored(raw.as_deref())
}

pub async fn clear_user(storage: &dyn SessionStorage, sid: Uuid) {
    storage.remove_item(sid, USER_KEY).await;
    storage.remove_item(sid, ROLE_KEY).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> PublicUser {
        PublicUser {
            id: "student-1".into(),
            name: "Student User".into(),
            email: "student@securepath.com".into(),
            role: Role::Student,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn persisted_user_is_restored_with_role() {
        let storage = MemoryStorage::default();
        let sid = Uuid::new_v4();
        persist_user(&storage, sid, &student()).await.unwrap();

        assert_eq!(load_user(&storage, sid).await, Some(student()));
        assert_eq!(
            storage.get_item(sid, ROLE_KEY).await.as_deref(),
            Some("student")
        );
        assert_eq!(stored_role(&storage, sid).await, Role::Student);
    }

    #[tokio::test]
    async fn clear_removes_both_keys() {
        let storage = MemoryStorage::default();
        let sid = Uuid::new_v4();
        persist_user(&storage, sid, &student()).await.unwrap();
        clear_user(&storage, sid).await;

        assert!(load_user(&storage, sid).await.is_none());
        assert!(storage.get_item(sid, ROLE_KEY).await.is_none());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let storage = MemoryStorage::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        persist_user(&storage, a, &student()).await.unwrap();
        assert!(load_user(&storage, b).await.is_none());
    }

    #[tokio::test]
    async fn malformed_record_reads_as_logged_out() {
        let storage = MemoryStorage::default();
        let sid = Uuid::new_v4();
        storage.set_item(sid, USER_KEY, "{not json".into()).await;
        assert!(load_user(&storage, sid).await.is_none());
    }

    #[tokio::test]
    async fn tampered_role_falls_back_to_student() {
        let storage = MemoryStorage::default();
        let sid = Uuid::new_v4();
        storage.set_item(sid, ROLE_KEY, "superadmin".into()).await;
        assert_eq!(stored_role(&storage, sid).await, Role::Student);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_forgotten() {
        let storage = MemoryStorage::default();
        let idle = Uuid::new_v4();
        let active = Uuid::new_v4();
        persist_user(&storage, idle, &student()).await.unwrap();
        persist_user(&storage, active, &student()).await.unwrap();

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(load_user(&storage, active).await.is_some());
        tokio::time::advance(Duration::from_secs(40)).await;

        assert_eq!(storage.evict_idle(Duration::from_secs(60)).await, 1);
        assert!(load_user(&storage, idle).await.is_none());
        assert!(load_user(&storage, active).await.is_some());
    }
}
