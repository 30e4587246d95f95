use std::env;
use std::path::PathBuf;

use crate::distribution::DEFAULT_BINS;

/// Hub configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub bind: String,
    pub port: u16,
    /// Bearer token for API auth.  Empty ⇒ auth disabled.
    pub token: String,

    /// SQLite database holding the `trades` table.
    pub trades_db: PathBuf,

    /// Default number of percentile bins per distribution curve.
    pub bins: usize,
    /// How many top-traded assets make up the default selection.
    pub top_k: usize,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl HubConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("CVF_HUB_BIND", "127.0.0.1"),
            port: env_u16("CVF_HUB_PORT", 61030),
            token: env_str("CVF_HUB_TOKEN", ""),
            trades_db: PathBuf::from(env_str("CVF_HUB_DB", "trades.db")),
            bins: env_usize("CVF_HUB_BINS", DEFAULT_BINS).clamp(1, DEFAULT_BINS),
            top_k: env_usize("CVF_HUB_TOP_K", 5).max(1),
        }
    }
}
