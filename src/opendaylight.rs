//! OpenDaylight service provider
//!
//! An OpenDaylight controller proxies many devices. After connecting to the
//! controller, per-device providers can be derived with
//! [`OpenDaylightServiceProvider::node_provider`]. Derived providers are
//! already connected: their sessions are created by the controller, not by
//! calling [`ServiceProvider::connect`] on them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{EncodingFormat, OpenDaylightConfig, Protocol};
use crate::engine::{Engine, EngineHandle};
use crate::error::Result;
use crate::netconf::NetconfServiceProvider;
use crate::provider::{ProviderKind, ServiceProvider};
use crate::restconf::RestconfServiceProvider;
use crate::session::{Session, SessionState};

/// Provider for one device behind the controller
#[derive(Debug)]
pub enum NodeProvider {
    Netconf(NetconfServiceProvider),
    Restconf(RestconfServiceProvider),
}

impl NodeProvider {
    pub fn as_netconf(&self) -> Option<&NetconfServiceProvider> {
        match self {
            NodeProvider::Netconf(provider) => Some(provider),
            NodeProvider::Restconf(_) => None,
        }
    }

    pub fn as_restconf(&self) -> Option<&RestconfServiceProvider> {
        match self {
            NodeProvider::Restconf(provider) => Some(provider),
            NodeProvider::Netconf(_) => None,
        }
    }

    fn inner(&self) -> &dyn ServiceProvider {
        match self {
            NodeProvider::Netconf(provider) => provider,
            NodeProvider::Restconf(provider) => provider,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ServiceProvider {
        match self {
            NodeProvider::Netconf(provider) => provider,
            NodeProvider::Restconf(provider) => provider,
        }
    }
}

impl ServiceProvider for NodeProvider {
    fn kind(&self) -> ProviderKind {
        self.inner().kind()
    }

    fn connect(&mut self) -> Result<()> {
        self.inner_mut().connect()
    }

    fn disconnect(&mut self) {
        self.inner_mut().disconnect()
    }

    fn state(&self) -> &SessionState {
        self.inner().state()
    }
}

/// Node provider shared between the controller and its caller
pub type SharedNodeProvider = Rc<RefCell<NodeProvider>>;

/// Service provider for an OpenDaylight controller
#[derive(Debug)]
pub struct OpenDaylightServiceProvider {
    config: OpenDaylightConfig,
    session: Session,
    providers: Vec<SharedNodeProvider>,
}

impl OpenDaylightServiceProvider {
    /// Create an unconnected provider
    pub fn new(engine: Rc<dyn Engine>, config: OpenDaylightConfig) -> Self {
        Self {
            config,
            session: Session::new(engine, ProviderKind::OpenDaylight),
            providers: Vec::new(),
        }
    }

    /// Controller settings
    pub fn config(&self) -> &OpenDaylightConfig {
        &self.config
    }

    /// Changes take effect on the next connect
    pub fn config_mut(&mut self) -> &mut OpenDaylightConfig {
        &mut self.config
    }

    /// Payload encoding used towards the controller
    pub fn encoding(&self) -> EncodingFormat {
        self.config.encoding
    }

    /// Identifiers of the devices known to the controller
    pub fn node_ids(&mut self) -> Result<Vec<String>> {
        self.session
            .query(|engine, hub| engine.opendaylight_node_ids(hub))
    }

    /// Derive a provider for one device
    ///
    /// Every call creates a new provider, even for a node id that was
    /// requested before. The controller keeps a reference to each of them
    /// and disconnects them all before its own session goes away.
    pub fn node_provider(&mut self, node_id: &str) -> Result<SharedNodeProvider> {
        let handle = self
            .session
            .query(|engine, hub| engine.opendaylight_node_provider(hub, node_id))?;

        log::debug!(
            "derived {:?} provider for node {}",
            self.config.protocol,
            node_id
        );
        let provider = Rc::new(RefCell::new(self.derive(handle)));
        self.providers.push(Rc::clone(&provider));
        Ok(provider)
    }

    /// Providers derived since the last connect, in creation order
    pub fn providers(&self) -> &[SharedNodeProvider] {
        &self.providers
    }

    fn derive(&self, handle: EngineHandle) -> NodeProvider {
        let engine = Rc::clone(self.session.engine());
        let connection = self.config.connection.clone();
        match self.config.protocol {
            Protocol::Restconf => NodeProvider::Restconf(RestconfServiceProvider::from_node(
                engine, connection, handle,
            )),
            Protocol::Netconf => NodeProvider::Netconf(NetconfServiceProvider::from_node(
                engine, connection, handle,
            )),
        }
    }
}

impl ServiceProvider for OpenDaylightServiceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenDaylight
    }

    fn connect(&mut self) -> Result<()> {
        self.session.ensure_idle()?;
        if let Err(error) = self.config.connection.validate() {
            return Err(self.session.reject(error));
        }

        let config = &self.config;
        self.session
            .establish(|engine| engine.connect_opendaylight(config))
    }

    /// Disconnect every derived provider, then the controller session
    fn disconnect(&mut self) {
        for provider in self.providers.drain(..) {
            match provider.try_borrow_mut() {
                Ok(mut node) => node.disconnect(),
                Err(_) => log::warn!("node provider is borrowed, leaving it connected"),
            }
        }
        self.session
            .release(|engine, handle| engine.disconnect_opendaylight(handle));
    }

    fn state(&self) -> &SessionState {
        &self.session.state
    }
}

impl Drop for OpenDaylightServiceProvider {
    fn drop(&mut self) {
        self.disconnect();
    }
}
