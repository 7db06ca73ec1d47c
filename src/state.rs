use crate::auth::repo::UserDirectory;
use crate::config::AppConfig;
use crate::game::service::GameRegistry;
use crate::quiz::service::QuizRegistry;
use crate::storage::{MemoryStorage, SessionStorage};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<UserDirectory>,
    pub sessions: Arc<dyn SessionStorage>,
    pub games: Arc<GameRegistry>,
    pub quizzes: Arc<QuizRegistry>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let users = Arc::new(UserDirectory::with_demo_users()?);
        Ok(Self::from_parts(config, users))
    }

    pub fn from_parts(config: Arc<AppConfig>, users: Arc<UserDirectory>) -> Self {
        Self {
            config,
            users,
            sessions: Arc::new(MemoryStorage::default()) as Arc<dyn SessionStorage>,
            games: Arc::new(GameRegistry::default()),
            quizzes: Arc::new(QuizRegistry::default()),
        }
    }

    /// State for tests: demo users, no auth delay, fixed JWT settings.
    #[cfg(test)]
    pub fn fake() -> Self {
        use std::time::Duration;

        let config = Arc::new(AppConfig {
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            auth_delay: Duration::ZERO,
            game_tick: Duration::from_secs(1),
            default_difficulty: crate::game::engine::Difficulty::Medium,
            idle_ttl: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
        });
        let users = UserDirectory::with_demo_users().expect("demo users hash");
        Self::from_parts(config, Arc::new(users))
    }
}
