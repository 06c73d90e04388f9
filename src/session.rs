//! Per-provider session state
//!
//! A [`SessionState`] records where a provider is in its lifecycle, the
//! engine handle it holds while connected and the last error reported for it.

use std::rc::Rc;

use crate::engine::{Engine, EngineHandle, EngineResult};
use crate::error::{ErrorCode, ErrorDescriptor, ProviderError, Result};
use crate::provider::ProviderKind;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Uninitialized,
    Connected,
    Disconnected,
}

/// Status, engine handle and last error of one provider
#[derive(Debug, Default)]
pub struct SessionState {
    status: SessionStatus,
    handle: Option<EngineHandle>,
    error: Option<ErrorDescriptor>,
    error_record: bool,
}

impl SessionState {
    /// Uninitialized state without a handle or error record
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a session whose handle came straight from the engine
    pub(crate) fn connected(handle: EngineHandle) -> Self {
        let mut state = Self::new();
        state.allocate_error_record();
        state.handle = Some(handle);
        state.status = SessionStatus::Connected;
        state
    }

    /// Current lifecycle status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether the session holds a live engine handle
    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected && self.handle.is_some()
    }

    /// Engine handle while connected
    pub fn handle(&self) -> Option<&EngineHandle> {
        self.handle.as_ref()
    }

    /// Last error recorded, if any
    pub fn error(&self) -> Option<&ErrorDescriptor> {
        self.error.as_ref()
    }

    /// Whether an error descriptor is set
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the error-state record is currently allocated
    pub fn has_error_record(&self) -> bool {
        self.error_record
    }

    pub(crate) fn allocate_error_record(&mut self) {
        self.error_record = true;
        self.error = None;
    }

    pub(crate) fn record_error(&mut self, error: ErrorDescriptor) {
        self.error = Some(error);
    }

    fn clean_up(&mut self) {
        self.error_record = false;
        self.error = None;
    }
}

/// Engine connection shared by all transport providers
#[derive(Debug)]
pub(crate) struct Session {
    engine: Rc<dyn Engine>,
    kind: ProviderKind,
    pub(crate) state: SessionState,
}

impl Session {
    pub(crate) fn new(engine: Rc<dyn Engine>, kind: ProviderKind) -> Self {
        Self {
            engine,
            kind,
            state: SessionState::new(),
        }
    }

    pub(crate) fn with_state(
        engine: Rc<dyn Engine>,
        kind: ProviderKind,
        state: SessionState,
    ) -> Self {
        Self {
            engine,
            kind,
            state,
        }
    }

    pub(crate) fn engine(&self) -> &Rc<dyn Engine> {
        &self.engine
    }

    /// Fail if the session already holds a live handle
    pub(crate) fn ensure_idle(&mut self) -> Result<()> {
        if self.state.is_connected() {
            self.state.record_error(ErrorDescriptor::new(
                ErrorCode::IllegalState,
                "session is already connected",
            ));
            return Err(ProviderError::AlreadyConnected(self.kind));
        }
        Ok(())
    }

    /// Run `connect` and keep the handle it returns
    pub(crate) fn establish<F>(&mut self, connect: F) -> Result<()>
    where
        F: FnOnce(&dyn Engine) -> EngineResult<EngineHandle>,
    {
        self.ensure_idle()?;
        self.state.allocate_error_record();
        log::debug!("connecting {} provider", self.kind);
        match connect(&*self.engine) {
            Ok(handle) => {
                log::info!("{} provider connected ({:?})", self.kind, handle);
                self.state.handle = Some(handle);
                self.state.status = SessionStatus::Connected;
                Ok(())
            }
            Err(error) => {
                log::warn!("{} provider failed to connect: {}", self.kind, error);
                self.state.record_error(error.clone());
                Err(ProviderError::Engine(error))
            }
        }
    }

    /// Record a configuration problem found before reaching the engine
    pub(crate) fn reject(&mut self, error: ProviderError) -> ProviderError {
        self.state.allocate_error_record();
        self.state.record_error(ErrorDescriptor::new(
            ErrorCode::InvalidArgument,
            error.to_string(),
        ));
        error
    }

    /// Give the handle back to the engine; nothing happens without a handle
    pub(crate) fn release<F>(&mut self, disconnect: F)
    where
        F: FnOnce(&dyn Engine, EngineHandle),
    {
        let Some(handle) = self.state.handle.take() else {
            return;
        };

        log::debug!("disconnecting {} provider ({:?})", self.kind, handle);
        disconnect(&*self.engine, handle);
        self.state.clean_up();
        self.state.status = SessionStatus::Disconnected;
        log::info!("{} provider disconnected", self.kind);
    }

    /// Run an engine query against the live handle
    pub(crate) fn query<T, F>(&mut self, query: F) -> Result<T>
    where
        F: FnOnce(&dyn Engine, &EngineHandle) -> EngineResult<T>,
    {
        let Some(handle) = self.state.handle.as_ref() else {
            self.state.record_error(ErrorDescriptor::new(
                ErrorCode::IllegalState,
                "session is not connected",
            ));
            return Err(ProviderError::NotConnected(self.kind));
        };

        match query(&*self.engine, handle) {
            Ok(value) => Ok(value),
            Err(error) => {
                log::warn!("{} provider query failed: {}", self.kind, error);
                self.state.record_error(error.clone());
                Err(ProviderError::Engine(error))
            }
        }
    }
}
