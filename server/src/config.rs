use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_PREFERENCES_PATH: &str = "data/preferences.json";
pub const DEFAULT_STATIC_DIR: &str = "web/dist";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600; // 1 hour idle
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
pub const SESSION_EVICTION_INTERVAL_SECS: u64 = 300; // 5 minutes

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

/// Alternate catalogue file. `None` means the embedded catalogue.
pub fn catalogue_path() -> Option<PathBuf> {
    std::env::var("CATALOGUE_PATH")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn preferences_path() -> PathBuf {
    std::env::var("PREFERENCES_PATH")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFERENCES_PATH))
}

pub fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

pub fn session_ttl_secs() -> i64 {
    std::env::var("SESSION_TTL_SECS")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_SECS)
}

pub fn max_sessions() -> usize {
    std::env::var("MAX_SESSIONS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_MAX_SESSIONS)
}

pub fn session_eviction_interval() -> Duration {
    Duration::from_secs(SESSION_EVICTION_INTERVAL_SECS)
}
