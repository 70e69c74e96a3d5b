use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub session_inactivity: time::Duration,
    /// Artificial delay on every mock accessor call.
    pub mock_latency: Duration,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_owned())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let minutes: i64 = match lookup("SESSION_INACTIVITY_MINUTES") {
            Some(raw) => raw
                .parse()
                .context("SESSION_INACTIVITY_MINUTES is not an integer")?,
            None => 5,
        };
        if minutes <= 0 {
            bail!("SESSION_INACTIVITY_MINUTES must be positive, got {minutes}");
        }

        let latency_ms: u64 = match lookup("MOCK_LATENCY_MS") {
            Some(raw) => raw.parse().context("MOCK_LATENCY_MS is not an integer")?,
            None => 0,
        };

        Ok(Self {
            bind_addr,
            session_inactivity: time::Duration::minutes(minutes),
            mock_latency: Duration::from_millis(latency_ms),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session_inactivity: time::Duration::minutes(5),
            mock_latency: Duration::ZERO,
        }
    }
}
