//! Boundary to the engine performing protocol I/O and schema compilation
//!
//! Providers never talk to devices themselves. Every session operation is
//! forwarded to an [`Engine`], which hands back opaque handles that the
//! providers own until they disconnect.

use std::fmt;

use crate::config::{NetconfConfig, OpenDaylightConfig, Repository, RestconfConfig};
use crate::error::ErrorDescriptor;

/// Result of an engine call
pub type EngineResult<T> = std::result::Result<T, ErrorDescriptor>;

/// Engine-side session object owned by a provider
///
/// Handles are not `Clone`: a handle is given back to the engine exactly once,
/// when its provider disconnects.
#[derive(PartialEq, Eq, Hash)]
pub struct EngineHandle {
    id: u64,
}

impl EngineHandle {
    /// Wrap an engine-side session id
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Engine-side session id
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineHandle({:#x})", self.id)
    }
}

/// Compiled root schema of a bundle, owned by the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootSchemaHandle {
    id: u64,
}

impl RootSchemaHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A YANG modeled object handed to the codec provider
pub trait Entity {
    /// Name of the bundle of modules the entity was generated from
    fn bundle_name(&self) -> &str;

    /// Name of the YANG module defining the entity
    fn module_name(&self) -> &str;
}

/// Operations the engine must provide
pub trait Engine: fmt::Debug {
    fn connect_netconf(&self, config: &NetconfConfig) -> EngineResult<EngineHandle>;

    fn connect_restconf(&self, config: &RestconfConfig) -> EngineResult<EngineHandle>;

    fn connect_opendaylight(&self, config: &OpenDaylightConfig) -> EngineResult<EngineHandle>;

    fn disconnect_netconf(&self, handle: EngineHandle);

    fn disconnect_restconf(&self, handle: EngineHandle);

    fn disconnect_opendaylight(&self, handle: EngineHandle);

    /// Identifiers of the devices mounted on an OpenDaylight controller
    fn opendaylight_node_ids(&self, hub: &EngineHandle) -> EngineResult<Vec<String>>;

    /// Session with one device mounted on an OpenDaylight controller
    fn opendaylight_node_provider(
        &self,
        hub: &EngineHandle,
        node_id: &str,
    ) -> EngineResult<EngineHandle>;

    /// Compile the root schema of the entity's bundle from `repository`
    fn compile_root_schema(
        &self,
        entity: &dyn Entity,
        repository: &Repository,
    ) -> EngineResult<RootSchemaHandle>;
}
