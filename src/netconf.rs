//! NETCONF service provider (RFC 6241)

use std::rc::Rc;

use crate::config::{ConnectionParams, NetconfConfig};
use crate::engine::{Engine, EngineHandle};
use crate::error::Result;
use crate::provider::{ProviderKind, ServiceProvider};
use crate::session::{Session, SessionState};

/// Service provider speaking NETCONF to a single device
#[derive(Debug)]
pub struct NetconfServiceProvider {
    config: NetconfConfig,
    session: Session,
}

impl NetconfServiceProvider {
    /// Create an unconnected provider
    pub fn new(engine: Rc<dyn Engine>, config: NetconfConfig) -> Self {
        Self {
            config,
            session: Session::new(engine, ProviderKind::Netconf),
        }
    }

    /// Wrap a device session created by an OpenDaylight controller
    pub(crate) fn from_node(
        engine: Rc<dyn Engine>,
        connection: ConnectionParams,
        handle: EngineHandle,
    ) -> Self {
        Self {
            config: NetconfConfig::new(connection),
            session: Session::with_state(
                engine,
                ProviderKind::Netconf,
                SessionState::connected(handle),
            ),
        }
    }

    /// Device settings, defaulted once connected
    pub fn config(&self) -> &NetconfConfig {
        &self.config
    }

    /// Changes take effect on the next connect
    pub fn config_mut(&mut self) -> &mut NetconfConfig {
        &mut self.config
    }
}

impl ServiceProvider for NetconfServiceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Netconf
    }

    fn connect(&mut self) -> Result<()> {
        self.session.ensure_idle()?;
        if let Err(error) = self.config.connection.validate() {
            return Err(self.session.reject(error));
        }
        self.config.apply_defaults();

        let config = &self.config;
        self.session.establish(|engine| engine.connect_netconf(config))
    }

    fn disconnect(&mut self) {
        self.session
            .release(|engine, handle| engine.disconnect_netconf(handle));
    }

    fn state(&self) -> &SessionState {
        &self.session.state
    }
}

impl Drop for NetconfServiceProvider {
    fn drop(&mut self) {
        self.disconnect();
    }
}
