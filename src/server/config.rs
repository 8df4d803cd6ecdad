use std::env;

use crate::leaderboard::{MAX_RETAINED, TOP_N};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 16 * 1024;

/// Leaderboard server settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub max_entries: usize,
    pub top_n: usize,
    pub json_limit_bytes: usize,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_entries: MAX_RETAINED,
            top_n: TOP_N,
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
            workers: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let (max_entries, top_n) = clamp_limits(
            read_env_usize("LEADERBOARD_MAX_ENTRIES", MAX_RETAINED),
            read_env_usize("LEADERBOARD_TOP_N", TOP_N),
        );

        Self {
            bind_addr: read_env_string("LEADERBOARD_BIND_ADDR", DEFAULT_BIND_ADDR),
            max_entries,
            top_n,
            json_limit_bytes: read_env_usize("JSON_LIMIT_BYTES", DEFAULT_JSON_LIMIT_BYTES),
            workers: read_env_optional_usize("HTTP_WORKERS"),
        }
    }
}

/// Retained set never exceeds `MAX_RETAINED`; the listing never exceeds the retained set
fn clamp_limits(max_entries: usize, top_n: usize) -> (usize, usize) {
    let mut max_entries = max_entries;
    if max_entries > MAX_RETAINED {
        log::warn!(
            "LEADERBOARD_MAX_ENTRIES ({}) > {}. Clamping.",
            max_entries,
            MAX_RETAINED
        );
        max_entries = MAX_RETAINED;
    }

    let mut top_n = top_n;
    if top_n > max_entries {
        log::warn!(
            "LEADERBOARD_TOP_N ({}) > LEADERBOARD_MAX_ENTRIES ({}). Clamping.",
            top_n,
            max_entries
        );
        top_n = max_entries;
    }
    (max_entries, top_n)
}

pub(crate) fn read_env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn read_env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_optional_usize(name: &str) -> Option<usize> {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        // Names nobody sets
        assert_eq!(read_env_usize("BENJI_TEST_UNSET_USIZE", 7), 7);
        assert_eq!(read_env_optional_usize("BENJI_TEST_UNSET_USIZE"), None);
        assert_eq!(read_env_string("BENJI_TEST_UNSET_STRING", "x"), "x");
    }

    #[test]
    fn default_config_matches_leaderboard_limits() {
        let config = ServerConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.top_n, 100);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn limits_are_clamped() {
        assert_eq!(clamp_limits(5000, 100), (1000, 100));
        assert_eq!(clamp_limits(50, 100), (50, 50));
        assert_eq!(clamp_limits(1000, 100), (1000, 100));
    }
}
