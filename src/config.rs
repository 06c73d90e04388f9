//! Provider configuration
//!
//! Each provider kind has its own configuration struct. Configurations can be
//! built in code or loaded from JSON documents such as:
//!
//! ```json
//! {
//!     "address": "10.0.0.1",
//!     "username": "admin",
//!     "password": "admin",
//!     "port": 830,
//!     "repository": "/var/cache/ydk",
//!     "protocol": "ssh"
//! }
//! ```
//!
//! Defaults for empty fields (NETCONF sub-protocol, RESTCONF URL roots) are
//! not applied here; providers fill them in when they connect.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// NETCONF transport used when none is configured
pub const DEFAULT_NETCONF_PROTOCOL: &str = "ssh";

/// RESTCONF data resource root used when none is configured
pub const DEFAULT_URL_ROOT: &str = "/data";

/// Encoding of YANG data exchanged with a provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    #[default]
    Xml,
    Json,
}

impl fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingFormat::Xml => f.write_str("XML"),
            EncodingFormat::Json => f.write_str("JSON"),
        }
    }
}

/// Protocol spoken between an OpenDaylight controller and its nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Netconf,
    Restconf,
}

/// Location of the YANG module cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if no location was configured
    pub fn is_unset(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

/// Endpoint and credentials shared by all transport providers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConnectionParams {
    pub address: String,
    pub username: String,
    pub password: String,
    pub port: u16,
}

impl ConnectionParams {
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
            port,
        }
    }

    /// Check the fields every engine needs
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("address is required".into()));
        }
        if self.port == 0 {
            return Err(ProviderError::InvalidConfig("port is required".into()));
        }
        Ok(())
    }
}

/// NETCONF provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NetconfConfig {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    pub repository: Repository,
    /// Transport sub-protocol ("ssh", "tcp", ...)
    pub protocol: String,
    /// Download models from the device only when they are needed
    pub on_demand: bool,
    /// Share one model cache between devices
    pub common_cache: bool,
    /// Session timeout in seconds, `None` waits forever
    pub timeout: Option<u32>,
}

impl Default for NetconfConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionParams::default(),
            repository: Repository::default(),
            protocol: String::new(),
            on_demand: true,
            common_cache: false,
            timeout: None,
        }
    }
}

impl NetconfConfig {
    pub fn new(connection: ConnectionParams) -> Self {
        Self {
            connection,
            ..Self::default()
        }
    }

    pub(crate) fn apply_defaults(&mut self) {
        if self.protocol.is_empty() {
            self.protocol = DEFAULT_NETCONF_PROTOCOL.to_string();
        }
    }
}

/// RESTCONF provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RestconfConfig {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    pub repository: Repository,
    pub encoding: EncodingFormat,
    pub state_url_root: String,
    pub config_url_root: String,
}

impl RestconfConfig {
    pub fn new(connection: ConnectionParams) -> Self {
        Self {
            connection,
            ..Self::default()
        }
    }

    pub(crate) fn apply_defaults(&mut self) {
        if self.state_url_root.is_empty() {
            self.state_url_root = DEFAULT_URL_ROOT.to_string();
        }
        if self.config_url_root.is_empty() {
            self.config_url_root = DEFAULT_URL_ROOT.to_string();
        }
    }
}

/// OpenDaylight controller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OpenDaylightConfig {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    pub repository: Repository,
    pub encoding: EncodingFormat,
    /// Protocol used by the node providers derived from this controller
    pub protocol: Protocol,
}

impl OpenDaylightConfig {
    pub fn new(connection: ConnectionParams) -> Self {
        Self {
            connection,
            ..Self::default()
        }
    }
}

fn from_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_json::from_str(content)?)
}

macro_rules! json_config {
    ($ty:ty) => {
        impl $ty {
            /// Parse a configuration from a JSON string
            pub fn from_json_str(content: &str) -> Result<Self> {
                from_json(content)
            }

            /// Parse a configuration from a JSON file
            pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
                let content = fs::read_to_string(path.as_ref())?;
                Self::from_json_str(&content)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ProviderError;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_json_str(s)
            }
        }
    };
}

json_config!(NetconfConfig);
json_config!(RestconfConfig);
json_config!(OpenDaylightConfig);
