//! RESTCONF service provider (RFC 8040)

use std::rc::Rc;

use crate::config::{ConnectionParams, EncodingFormat, RestconfConfig};
use crate::engine::{Engine, EngineHandle};
use crate::error::Result;
use crate::provider::{ProviderKind, ServiceProvider};
use crate::session::{Session, SessionState};

/// Service provider speaking RESTCONF to a single server
#[derive(Debug)]
pub struct RestconfServiceProvider {
    config: RestconfConfig,
    session: Session,
}

impl RestconfServiceProvider {
    /// Create an unconnected provider
    pub fn new(engine: Rc<dyn Engine>, config: RestconfConfig) -> Self {
        Self {
            config,
            session: Session::new(engine, ProviderKind::Restconf),
        }
    }

    /// Wrap a device session created by an OpenDaylight controller
    pub(crate) fn from_node(
        engine: Rc<dyn Engine>,
        connection: ConnectionParams,
        handle: EngineHandle,
    ) -> Self {
        Self {
            config: RestconfConfig::new(connection),
            session: Session::with_state(
                engine,
                ProviderKind::Restconf,
                SessionState::connected(handle),
            ),
        }
    }

    /// Device settings, defaulted once connected
    pub fn config(&self) -> &RestconfConfig {
        &self.config
    }

    /// Changes take effect on the next connect
    pub fn config_mut(&mut self) -> &mut RestconfConfig {
        &mut self.config
    }

    /// Payload encoding used towards the device
    pub fn encoding(&self) -> EncodingFormat {
        self.config.encoding
    }
}

impl ServiceProvider for RestconfServiceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Restconf
    }

    fn connect(&mut self) -> Result<()> {
        self.session.ensure_idle()?;
        if let Err(error) = self.config.connection.validate() {
            return Err(self.session.reject(error));
        }
        self.config.apply_defaults();

        let config = &self.config;
        self.session
            .establish(|engine| engine.connect_restconf(config))
    }

    fn disconnect(&mut self) {
        self.session
            .release(|engine, handle| engine.disconnect_restconf(handle));
    }

    fn state(&self) -> &SessionState {
        &self.session.state
    }
}

impl Drop for RestconfServiceProvider {
    fn drop(&mut self) {
        self.disconnect();
    }
}
