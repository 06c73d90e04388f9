//! rust-ydk-providers - service provider session management for YANG clients
//!
//! This library manages sessions of NETCONF, RESTCONF and OpenDaylight service
//! providers, and the schema cache of a local codec provider. Protocol work is
//! delegated to an [`Engine`], which hands out opaque handles the providers own
//! until they disconnect.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//! use rust_ydk_providers::{Engine, NetconfConfig, NetconfServiceProvider, ServiceProvider};
//!
//! fn run(engine: Rc<dyn Engine>) -> rust_ydk_providers::Result<()> {
//!     // Load provider settings
//!     let config = NetconfConfig::from_file("netconf.json")?;
//!
//!     // Connect, inspect the session, disconnect
//!     let mut provider = NetconfServiceProvider::new(engine, config);
//!     provider.connect()?;
//!     assert!(provider.state().is_connected());
//!     provider.disconnect();
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod engine;
mod error;
pub mod netconf;
pub mod opendaylight;
pub mod payload;
mod provider;
pub mod restconf;
pub mod session;

pub use codec::CodecServiceProvider;
pub use config::{
    ConnectionParams, EncodingFormat, NetconfConfig, OpenDaylightConfig, Protocol, Repository,
    RestconfConfig,
};
pub use engine::{Engine, EngineHandle, EngineResult, Entity, RootSchemaHandle};
pub use error::{ErrorCode, ErrorDescriptor, ProviderError, Result};
pub use netconf::NetconfServiceProvider;
pub use opendaylight::{NodeProvider, OpenDaylightServiceProvider, SharedNodeProvider};
pub use provider::{ProviderKind, ServiceProvider};
pub use restconf::RestconfServiceProvider;
pub use session::{SessionState, SessionStatus};
