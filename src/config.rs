use std::time::Duration;

use serde::Deserialize;

use crate::game::engine::Difficulty;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    /// Simulated network latency applied to login and register.
    pub auth_delay: Duration,
    /// Period of the CodeBreaker countdown.
    pub game_tick: Duration,
    pub default_difficulty: Difficulty,
    /// Sessions, games and quizzes untouched this long are evicted.
    pub idle_ttl: Duration,
    pub sweep_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "securepath".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "securepath-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES").unwrap_or(60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES").unwrap_or(60 * 24 * 14),
        };
        let auth_delay = Duration::from_millis(env_parse("AUTH_DELAY_MS").unwrap_or(1000));
        let game_tick = Duration::from_millis(env_parse("GAME_TICK_MS").unwrap_or(1000));
        if game_tick.is_zero() {
            anyhow::bail!("GAME_TICK_MS must be greater than zero");
        }
        let default_difficulty = std::env::var("GAME_DEFAULT_DIFFICULTY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let idle_ttl = Duration::from_secs(env_parse("SESSION_IDLE_TTL_SECS").unwrap_or(30 * 60));
        let sweep_interval = Duration::from_secs(env_parse("SWEEP_INTERVAL_SECS").unwrap_or(60));
        if sweep_interval.is_zero() {
            anyhow::bail!("SWEEP_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            jwt,
            auth_delay,
            game_tick,
            default_difficulty,
            idle_ttl,
            sweep_interval,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
