//! Common surface of the transport service providers

use std::fmt;

use crate::engine::EngineHandle;
use crate::error::Result;
use crate::session::SessionState;

/// Transport provider variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Netconf,
    Restconf,
    OpenDaylight,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Netconf => f.write_str("NETCONF"),
            ProviderKind::Restconf => f.write_str("RESTCONF"),
            ProviderKind::OpenDaylight => f.write_str("OpenDaylight"),
        }
    }
}

/// A session against a device or controller
///
/// Failures of [`connect`](ServiceProvider::connect) are returned and also
/// recorded in the [`SessionState`], so callers holding only a provider
/// reference can inspect them later through [`state`](ServiceProvider::state).
pub trait ServiceProvider {
    fn kind(&self) -> ProviderKind;

    /// Establish the session using the current configuration
    fn connect(&mut self) -> Result<()>;

    /// Release the session. Does nothing if there is no engine handle.
    fn disconnect(&mut self);

    fn state(&self) -> &SessionState;

    /// Engine handle of the live session
    fn private_handle(&self) -> Option<&EngineHandle> {
        self.state().handle()
    }
}
