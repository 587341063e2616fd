use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use log::debug;

use crate::clients::{
    ItunesClient,
    errors::{Error, Result},
    itunes::DEFAULT_SEARCH_URL,
};

const DEFAULT_COUNT: usize = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BIND: &str = "127.0.0.1:3000";

// Runtime configuration shared by the CLI and the HTTP API
#[derive(Debug, Clone)]
pub struct Config {
    pub search_url: String,
    pub count: usize,
    pub timeout: Duration,
    pub bind: SocketAddr,
}

impl Config {
    pub fn search_client(&self) -> Result<ItunesClient> {
        ItunesClient::with_timeout(self.search_url.clone(), self.timeout)
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    search_url: Option<String>,
    count: Option<usize>,
    timeout: Option<Duration>,
    bind: Option<SocketAddr>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = Some(url.into());
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn bind(mut self, bind: SocketAddr) -> Self {
        self.bind = Some(bind);
        self
    }

    // Explicit values win, then SONGDAY_* environment variables, then defaults
    pub fn build(self) -> Result<Config> {
        self.build_with(|key| std::env::var(key).ok())
    }

    fn build_with(self, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let search_url = match self.search_url {
            Some(url) => url,
            None => env("SONGDAY_SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
        };
        let count = match self.count {
            Some(c) => c,
            None => parse_var(&env, "SONGDAY_COUNT")?.unwrap_or(DEFAULT_COUNT),
        };
        let timeout = match self.timeout {
            Some(t) => t,
            None => Duration::from_secs(
                parse_var(&env, "SONGDAY_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };
        let bind = match self.bind {
            Some(b) => b,
            None => match parse_var(&env, "SONGDAY_BIND")? {
                Some(b) => b,
                None => DEFAULT_BIND.parse().map_err(|e| {
                    Error::ConfigurationError(format!("invalid default bind address: {e}"))
                })?,
            },
        };

        let config = Config {
            search_url,
            count,
            timeout,
            bind,
        };
        debug!("Loaded configuration: {config:?}");
        Ok(config)
    }
}

fn parse_var<T>(env: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::ConfigurationError(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}
