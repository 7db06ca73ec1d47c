use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;

use super::{repo_types::User, role::Role};

/// Accounts every fresh directory starts with: (id, name, email, password, role).
pub const DEMO_USERS: [(&str, &str, &str, &str, Role); 3] = [
    ("admin-1", "Admin User", "admin@securepath.com", "admin123", Role::Admin),
    (
        "instructor-1",
        "Instructor User",
        "instructor@securepath.com",
        "instructor123",
        Role::Instructor,
    ),
    ("student-1", "Student User", "student@securepath.com", "student123", Role::Student),
];

/// In-memory user directory keyed by lowercase email.
#[derive(Default)]
pub struct UserDirectory {
    by_email: RwLock<HashMap<String, User>>,
}

impl UserDirectory {
    /// Directory pre-populated with the demo accounts.
    pub fn with_demo_users() -> anyhow::Result<Self> {
        let mut by_email = HashMap::with_capacity(DEMO_USERS.len());
        for (id, name, email, password, role) in DEMO_USERS {
            let user = User::with_password(
                id.to_string(),
                name.to_string(),
                email.to_string(),
                role,
                password,
            )?;
            by_email.insert(user.email.clone(), user);
        }
        info!(count = by_email.len(), "demo users seeded");
        Ok(Self {
            by_email: RwLock::new(by_email),
        })
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.by_email.read().await.get(email).cloned()
    }

    /// Insert a new user. Returns `false` and leaves the directory untouched
    /// when the email is already taken.
    pub async fn insert(&self, user: User) -> bool {
        let mut guard = self.by_email.write().await;
        if guard.contains_key(&user.email) {
            return false;
        }
        guard.insert(user.email.clone(), user);
        true
    }

    pub async fn len(&self) -> usize {
        self.by_email.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_demo_accounts_with_hashed_passwords() {
        let dir = UserDirectory::with_demo_users().expect("seed");
        assert_eq!(dir.len().await, 3);

        let admin = dir.find_by_email("admin@securepath.com").await.expect("admin");
        assert_eq!(admin.id, "admin-1");
        assert_eq!(admin.role, Role::Admin);
        assert_ne!(admin.password_hash, "admin123");
    }

    #[tokio::test]
    async fn insert_refuses_duplicate_email() {
        let dir = UserDirectory::with_demo_users().expect("seed");
        let dup = User {
            id: "student-2".into(),
            name: "Copycat".into(),
            email: "student@securepath.com".into(),
            role: Role::Student,
            avatar: None,
            password_hash: "x".into(),
        };
        assert!(!dir.insert(dup).await);
        let kept = dir.find_by_email("student@securepath.com").await.expect("kept");
        assert_eq!(kept.id, "student-1");
        assert_eq!(dir.len().await, 3);
    }
}
