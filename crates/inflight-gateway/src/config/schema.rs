use std::net::SocketAddr;

use serde::Deserialize;
use inflight_core::error::{InflightError, Result};
use inflight_core::DEFAULT_CAPACITY;

const MAX_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InflightConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub tracker: TrackerSection,

    #[serde(default)]
    pub request_id: RequestIdSection,

    #[serde(default)]
    pub info: InfoSection,
}

impl Default for InflightConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            tracker: TrackerSection::default(),
            request_id: RequestIdSection::default(),
            info: InfoSection::default(),
        }
    }
}

impl InflightConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(InflightError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.tracker.validate()?;
        self.request_id.validate()?;
        self.info.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|_| InflightError::BadConfig("server.listen must be a valid SocketAddr".into()))
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerSection {
    /// Number of concurrency peaks retained.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for TrackerSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl TrackerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(InflightError::BadConfig(format!(
                "tracker.capacity must be between 1 and {MAX_CAPACITY}"
            )));
        }
        Ok(())
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestIdSourceKind {
    /// Read from a request header set by the hosting proxy/runtime.
    #[default]
    Header,
    /// Mint a process-unique id per request.
    Generate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestIdSection {
    #[serde(default)]
    pub source: RequestIdSourceKind,

    #[serde(default = "default_request_id_header")]
    pub header: String,
}

impl Default for RequestIdSection {
    fn default() -> Self {
        Self {
            source: RequestIdSourceKind::default(),
            header: default_request_id_header(),
        }
    }
}

impl RequestIdSection {
    pub fn validate(&self) -> Result<()> {
        if self.source == RequestIdSourceKind::Header && self.header.trim().is_empty() {
            return Err(InflightError::BadConfig(
                "request_id.header must not be empty when source is header".into(),
            ));
        }
        Ok(())
    }
}

fn default_request_id_header() -> String {
    "x-request-id".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InfoSection {
    /// Route of the HTML report; the JSON view is served at `{path}.json`.
    #[serde(default = "default_info_path")]
    pub path: String,

    /// Environment variable holding the runtime name shown in the report.
    #[serde(default = "default_runtime_env")]
    pub runtime_env: String,
}

impl Default for InfoSection {
    fn default() -> Self {
        Self {
            path: default_info_path(),
            runtime_env: default_runtime_env(),
        }
    }
}

impl InfoSection {
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(InflightError::BadConfig(
                "info.path must start with '/' and name a route".into(),
            ));
        }
        // `:` `*` `{` `}` are route syntax; the rest never reach a handler.
        if let Some(c) = self
            .path
            .chars()
            .find(|c| matches!(*c, ':' | '*' | '{' | '}' | '?' | '#') || c.is_whitespace())
        {
            return Err(InflightError::BadConfig(format!(
                "info.path must be a literal route; found {c:?} in {}",
                self.path
            )));
        }
        if self.path.contains("//") {
            return Err(InflightError::BadConfig("info.path must not contain empty segments".into()));
        }
        if matches!(self.path.as_str(), "/healthz" | "/metrics") {
            return Err(InflightError::BadConfig(format!(
                "info.path collides with a built-in route: {}",
                self.path
            )));
        }
        Ok(())
    }

    pub fn json_path(&self) -> String {
        format!("{}.json", self.path)
    }
}

fn default_info_path() -> String {
    "/_info".into()
}
fn default_runtime_env() -> String {
    "APP_RUNTIME".into()
}
