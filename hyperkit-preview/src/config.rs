//! Server configuration.

use std::time::Duration;

use clap::Parser;

use crate::sweeper::DEFAULT_RETENTION_SECS;

#[derive(Parser, Debug, Clone)]
#[command(name = "hyperkit-preview", about = "Prompt-to-project generator with live preview")]
pub struct ServerConfig {
    /// Address to listen on for HTTP.
    #[arg(long, env = "HYPERKIT_LISTEN_ADDR", default_value = "127.0.0.1:3000")]
    pub listen_addr: String,

    /// How long a built project stays servable, in seconds.
    #[arg(long, env = "HYPERKIT_RETENTION_SECS", default_value_t = DEFAULT_RETENTION_SECS)]
    pub retention_secs: u64,

    /// Background sweep interval in seconds (0 = only sweep on build).
    #[arg(long, env = "HYPERKIT_SWEEP_INTERVAL_SECS", default_value_t = 60)]
    pub sweep_interval_secs: u64,

    /// Maximum number of stored projects (0 = unbounded).
    #[arg(long, env = "HYPERKIT_MAX_PROJECTS", default_value_t = 0)]
    pub max_projects: usize,

    /// Maximum prompt length in characters.
    #[arg(long, env = "HYPERKIT_MAX_PROMPT_LEN", default_value_t = 500)]
    pub max_prompt_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
            retention_secs: DEFAULT_RETENTION_SECS,
            sweep_interval_secs: 60,
            max_projects: 0,
            max_prompt_len: 500,
        }
    }
}

impl ServerConfig {
    pub fn max_age_ms(&self) -> i64 {
        i64::try_from(self.retention_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli() {
        let parsed = ServerConfig::parse_from(["hyperkit-preview"]);
        let default = ServerConfig::default();
        assert_eq!(parsed.listen_addr, default.listen_addr);
        assert_eq!(parsed.retention_secs, default.retention_secs);
        assert_eq!(parsed.sweep_interval_secs, default.sweep_interval_secs);
        assert_eq!(parsed.max_projects, default.max_projects);
        assert_eq!(parsed.max_prompt_len, default.max_prompt_len);
        assert_eq!(parsed.retention_secs, DEFAULT_RETENTION_SECS);
        assert_eq!(default.max_age_ms(), 3_600_000);
    }

    #[test]
    fn zero_interval_disables_background_sweep() {
        let config = ServerConfig::parse_from(["hyperkit-preview", "--sweep-interval-secs", "0"]);
        assert!(config.sweep_interval().is_none());
    }
}
