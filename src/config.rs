//! Runtime configuration, read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TALLY_ADDR` | `127.0.0.1:5000` | socket address to listen on |
//! | `TALLY_LOG` | `info` | tracing filter, used when `RUST_LOG` is unset |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::Error;

pub const ADDR_VAR: &str = "TALLY_ADDR";
pub const LOG_VAR: &str = "TALLY_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000),
            log_filter: "info".to_owned(),
        }
    }
}

impl Config {
    /// Reads the process environment on top of the defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ADDR_VAR) {
            config.bind_addr = raw
                .parse()
                .map_err(|e| Error::Config(format!("{ADDR_VAR}={raw:?}: {e}")))?;
        }
        if let Some(filter) = lookup(LOG_VAR).filter(|f| !f.is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}
